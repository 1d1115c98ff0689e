//! The `Coder` trait and the standard XML-RPC codec

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::NaiveDateTime;
use xmltree::{Element, XMLNode};

use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Wire format for `<dateTime.iso8601>`, e.g. `19980717T14:08:55`
const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// Translation between [`Value`] and the `<value>` element grammar
///
/// The client depends on this trait, never on a concrete codec, so the
/// codec can be substituted for testing or for servers speaking a
/// non-standard dialect. Implementations must be safe for concurrent
/// read-only use; the client shares one instance across calls.
pub trait Coder: Send + Sync {
    /// Encode a value as a complete `<value>` element
    fn encode(&self, value: &Value) -> Result<Element, EncodeError>;

    /// Decode a `<value>` element into a value
    fn decode(&self, node: &Element) -> Result<Value, DecodeError>;
}

/// The standard XML-RPC codec
///
/// Encodes integers as `<i4>`, accepts both `<i4>` and `<int>` on decode,
/// and treats a `<value>` with no type element as an untyped string.
#[derive(Debug, Clone, Default)]
pub struct StandardCoder;

impl StandardCoder {
    pub fn new() -> Self {
        Self
    }

    fn encode_inner(&self, value: &Value) -> Result<Element, EncodeError> {
        let node = match value {
            Value::Int(n) => text_element("i4", n.to_string()),
            Value::Long(n) => text_element("i8", n.to_string()),
            Value::Bool(b) => text_element("boolean", if *b { "1" } else { "0" }.to_string()),
            Value::String(s) => text_element("string", s.clone()),
            Value::Double(d) => {
                if !d.is_finite() {
                    return Err(EncodeError::Unrepresentable(format!(
                        "non-finite double {}",
                        d
                    )));
                }
                text_element("double", d.to_string())
            }
            Value::DateTime(dt) => {
                text_element("dateTime.iso8601", dt.format(DATETIME_FORMAT).to_string())
            }
            Value::Base64(bytes) => text_element("base64", BASE64.encode(bytes)),
            Value::Array(items) => {
                let mut data = Element::new("data");
                for item in items {
                    data.children.push(XMLNode::Element(self.encode(item)?));
                }
                let mut array = Element::new("array");
                array.children.push(XMLNode::Element(data));
                array
            }
            Value::Struct(members) => {
                let mut node = Element::new("struct");
                for (name, member_value) in members {
                    let mut member = Element::new("member");
                    member
                        .children
                        .push(XMLNode::Element(text_element("name", name.clone())));
                    member
                        .children
                        .push(XMLNode::Element(self.encode(member_value)?));
                    node.children.push(XMLNode::Element(member));
                }
                node
            }
        };
        Ok(node)
    }

    fn decode_typed(&self, node: &Element) -> Result<Value, DecodeError> {
        let text = || element_text(node);
        match node.name.as_str() {
            "i4" | "int" => parse_scalar(&text(), "int").map(Value::Int),
            "i8" => parse_scalar(&text(), "i8").map(Value::Long),
            "boolean" => match text().trim() {
                "1" | "true" => Ok(Value::Bool(true)),
                "0" | "false" => Ok(Value::Bool(false)),
                other => Err(DecodeError::InvalidScalar {
                    kind: "boolean",
                    text: other.to_string(),
                }),
            },
            "string" => Ok(Value::String(text())),
            "double" => parse_scalar(&text(), "double").map(Value::Double),
            "dateTime.iso8601" => {
                let raw = text();
                NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
                    .map(Value::DateTime)
                    .map_err(|_| DecodeError::InvalidScalar {
                        kind: "dateTime.iso8601",
                        text: raw,
                    })
            }
            "base64" => {
                let raw = text();
                let compact: String = raw.split_whitespace().collect();
                BASE64
                    .decode(compact.as_bytes())
                    .map(Value::Base64)
                    .map_err(|_| DecodeError::InvalidScalar {
                        kind: "base64",
                        text: raw,
                    })
            }
            "array" => {
                let data = node
                    .get_child("data")
                    .ok_or_else(|| DecodeError::MalformedValue("<array> without <data>".into()))?;
                let mut items = Vec::new();
                for child in child_elements(data) {
                    if child.name != "value" {
                        return Err(DecodeError::MalformedValue(format!(
                            "unexpected <{}> inside <data>",
                            child.name
                        )));
                    }
                    items.push(self.decode(child)?);
                }
                Ok(Value::Array(items))
            }
            "struct" => {
                let mut members = BTreeMap::new();
                for member in child_elements(node) {
                    if member.name != "member" {
                        return Err(DecodeError::MalformedValue(format!(
                            "unexpected <{}> inside <struct>",
                            member.name
                        )));
                    }
                    let name = member
                        .get_child("name")
                        .map(element_text)
                        .ok_or_else(|| {
                            DecodeError::MalformedValue("<member> without <name>".into())
                        })?;
                    let value_node = member.get_child("value").ok_or_else(|| {
                        DecodeError::MalformedValue("<member> without <value>".into())
                    })?;
                    members.insert(name, self.decode(value_node)?);
                }
                Ok(Value::Struct(members))
            }
            other => Err(DecodeError::UnknownType(other.to_string())),
        }
    }
}

impl Coder for StandardCoder {
    fn encode(&self, value: &Value) -> Result<Element, EncodeError> {
        let mut wrapper = Element::new("value");
        wrapper
            .children
            .push(XMLNode::Element(self.encode_inner(value)?));
        Ok(wrapper)
    }

    fn decode(&self, node: &Element) -> Result<Value, DecodeError> {
        if node.name != "value" {
            return Err(DecodeError::MalformedValue(format!(
                "expected <value>, got <{}>",
                node.name
            )));
        }
        let children: Vec<&Element> = child_elements(node).collect();
        match children.as_slice() {
            // Untyped content defaults to string
            [] => Ok(Value::String(element_text(node))),
            [inner] => self.decode_typed(inner),
            _ => Err(DecodeError::MalformedValue(
                "<value> carries more than one type element".into(),
            )),
        }
    }
}

fn text_element(name: &str, text: String) -> Element {
    let mut el = Element::new(name);
    if !text.is_empty() {
        el.children.push(XMLNode::Text(text));
    }
    el
}

fn element_text(el: &Element) -> String {
    el.get_text().map(|t| t.into_owned()).unwrap_or_default()
}

fn child_elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(XMLNode::as_element)
}

fn parse_scalar<T: std::str::FromStr>(raw: &str, kind: &'static str) -> Result<T, DecodeError> {
    raw.trim().parse().map_err(|_| DecodeError::InvalidScalar {
        kind,
        text: raw.to_string(),
    })
}
