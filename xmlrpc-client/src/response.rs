//! XML-RPC `methodResponse` grammar walking
//!
//! The parser owns the response skeleton (`methodResponse` → `fault` |
//! `params` → `param` → `value`); everything inside a single type element
//! belongs to the coder. The split matters for classification: skeleton
//! violations are [`MalformedResponse`](ResponseParsingError::MalformedResponse),
//! coder failures on the params branch are
//! [`Decoding`](ResponseParsingError::Decoding), and callers branch on the
//! difference.

use xmltree::{Element, XMLNode};

use xmlrpc_codec::{Coder, Decode, Value};

use crate::error::ResponseParsingError;

/// Parser for one `methodResponse` document
///
/// Borrows the client's coder; a response document yields exactly one
/// outcome, either the decoded value or one classified error.
pub struct ResponseParser<'a> {
    coder: &'a dyn Coder,
}

impl<'a> ResponseParser<'a> {
    pub fn new(coder: &'a dyn Coder) -> Self {
        Self { coder }
    }

    /// Parse raw bytes; invalid XML is indistinguishable from a grammar violation
    pub fn parse_bytes<D: Decode>(&self, bytes: &[u8]) -> Result<D, ResponseParsingError> {
        let document =
            Element::parse(bytes).map_err(|_| ResponseParsingError::MalformedResponse)?;
        self.parse(&document)
    }

    /// Parse response text
    pub fn parse_str<D: Decode>(&self, text: &str) -> Result<D, ResponseParsingError> {
        self.parse_bytes(text.as_bytes())
    }

    /// Walk an already-parsed `methodResponse` document
    pub fn parse<D: Decode>(&self, document: &Element) -> Result<D, ResponseParsingError> {
        if document.name != "methodResponse" {
            return Err(ResponseParsingError::MalformedResponse);
        }

        let children: Vec<&Element> = child_elements(document).collect();
        let [child] = children.as_slice() else {
            return Err(ResponseParsingError::MalformedResponse);
        };

        match child.name.as_str() {
            "fault" => Err(self.parse_fault(child)),
            "params" => self.parse_params(child),
            _ => Err(ResponseParsingError::MalformedResponse),
        }
    }

    /// Extract `{faultCode, faultString}` from the fault branch
    ///
    /// Any structural deviation here, including a coder failure on the
    /// fault struct, is a malformed response rather than a decoding error.
    fn parse_fault(&self, fault: &Element) -> ResponseParsingError {
        let children: Vec<&Element> = child_elements(fault).collect();
        let [value] = children.as_slice() else {
            return ResponseParsingError::MalformedResponse;
        };
        if value.name != "value" {
            return ResponseParsingError::MalformedResponse;
        }

        let decoded = match self.coder.decode(value) {
            Ok(decoded) => decoded,
            Err(_) => return ResponseParsingError::MalformedResponse,
        };
        let Value::Struct(mut members) = decoded else {
            return ResponseParsingError::MalformedResponse;
        };
        let Some(Value::Int(code)) = members.remove("faultCode") else {
            return ResponseParsingError::MalformedResponse;
        };
        let Some(Value::String(message)) = members.remove("faultString") else {
            return ResponseParsingError::MalformedResponse;
        };

        ResponseParsingError::Fault { code, message }
    }

    fn parse_params<D: Decode>(&self, params: &Element) -> Result<D, ResponseParsingError> {
        let params_children: Vec<&Element> = child_elements(params).collect();
        let [param] = params_children.as_slice() else {
            return Err(ResponseParsingError::MalformedResponse);
        };
        if param.name != "param" {
            return Err(ResponseParsingError::MalformedResponse);
        }

        let param_children: Vec<&Element> = child_elements(param).collect();
        let [value] = param_children.as_slice() else {
            return Err(ResponseParsingError::MalformedResponse);
        };
        if value.name != "value" {
            return Err(ResponseParsingError::MalformedResponse);
        }
        // Several type elements inside one <value> is a grammar violation,
        // not a decode failure
        if child_elements(value).count() > 1 {
            return Err(ResponseParsingError::MalformedResponse);
        }

        let decoded = self
            .coder
            .decode(value)
            .map_err(ResponseParsingError::Decoding)?;
        D::from_value(decoded).map_err(ResponseParsingError::Decoding)
    }
}

fn child_elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(XMLNode::as_element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlrpc_codec::StandardCoder;

    fn parse<D: Decode>(body: &str) -> Result<D, ResponseParsingError> {
        let coder = StandardCoder::new();
        ResponseParser::new(&coder).parse_str(body)
    }

    const FAULT_BODY: &str = "<methodResponse><fault><value><struct>\
        <member><name>faultCode</name><value><int>4</int></value></member>\
        <member><name>faultString</name><value><string>Too many parameters.</string></value></member>\
        </struct></value></fault></methodResponse>";

    const STRING_BODY: &str = "<methodResponse><params><param>\
        <value><string>South Dakota</string></value>\
        </param></params></methodResponse>";

    #[test]
    fn test_string_response_decodes() {
        let got: String = parse(STRING_BODY).unwrap();
        assert_eq!(got, "South Dakota");
    }

    #[test]
    fn test_fault_yields_code_and_message() {
        let error = parse::<String>(FAULT_BODY).unwrap_err();
        match error {
            ResponseParsingError::Fault { code, message } => {
                assert_eq!(code, 4);
                assert_eq!(message, "Too many parameters.");
            }
            other => panic!("expected Fault, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let error = parse::<String>("").unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_invalid_xml_is_malformed() {
        let error = parse::<String>("<methodResponse><params>").unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        let error = parse::<String>("<methodCall><params/></methodCall>").unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_type_mismatch_is_decoding_error_not_malformed() {
        // Grammar is valid; only the requested target type is wrong
        let error = parse::<i32>(STRING_BODY).unwrap_err();
        assert!(matches!(error, ResponseParsingError::Decoding(_)));
    }

    #[test]
    fn test_two_params_is_malformed() {
        let body = "<methodResponse><params>\
            <param><value><i4>1</i4></value></param>\
            <param><value><i4>2</i4></value></param>\
            </params></methodResponse>";
        let error = parse::<i32>(body).unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_value_with_two_type_elements_is_malformed() {
        let body = "<methodResponse><params><param>\
            <value><i4>1</i4><i4>2</i4></value>\
            </param></params></methodResponse>";
        let error = parse::<i32>(body).unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_fault_missing_fault_string_is_malformed() {
        let body = "<methodResponse><fault><value><struct>\
            <member><name>faultCode</name><value><int>4</int></value></member>\
            </struct></value></fault></methodResponse>";
        let error = parse::<String>(body).unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_fault_with_non_struct_value_is_malformed() {
        let body = "<methodResponse><fault>\
            <value><string>nope</string></value>\
            </fault></methodResponse>";
        let error = parse::<String>(body).unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }

    #[test]
    fn test_untyped_value_decodes_as_string() {
        let body = "<methodResponse><params><param>\
            <value>South Dakota</value>\
            </param></params></methodResponse>";
        let got: String = parse(body).unwrap();
        assert_eq!(got, "South Dakota");
    }

    #[test]
    fn test_fault_and_params_never_both() {
        // Two children under methodResponse violate the grammar outright
        let body = format!(
            "<methodResponse><params><param><value><i4>1</i4></value></param></params>\
             {}</methodResponse>",
            "<fault><value><struct></struct></value></fault>"
        );
        let error = parse::<i32>(&body).unwrap_err();
        assert!(matches!(error, ResponseParsingError::MalformedResponse));
    }
}
