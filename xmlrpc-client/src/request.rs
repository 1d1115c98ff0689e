//! XML-RPC `methodCall` document construction

use xmltree::{Element, XMLNode};

use xmlrpc_codec::{Coder, EncodeError, Value};

/// One XML-RPC request: a method name and its positional parameters
///
/// Immutable once constructed; produces exactly one document. Parameter
/// order is preserved and semantically significant. `None` params omit the
/// `<params>` element entirely, `Some(vec![])` emits an empty `<params/>` -
/// some servers distinguish the two.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    method: String,
    params: Option<Vec<Value>>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Option<Vec<Value>>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Render the `methodCall` document via the given coder
    ///
    /// Each parameter is encoded independently. If the coder fails on any
    /// of them, construction aborts and no partial request is produced.
    pub fn to_document(&self, coder: &dyn Coder) -> Result<Element, EncodeError> {
        let mut root = Element::new("methodCall");

        let mut method_name = Element::new("methodName");
        method_name
            .children
            .push(XMLNode::Text(self.method.clone()));
        root.children.push(XMLNode::Element(method_name));

        if let Some(params) = &self.params {
            let mut params_el = Element::new("params");
            for value in params {
                let mut param = Element::new("param");
                param.children.push(XMLNode::Element(coder.encode(value)?));
                params_el.children.push(XMLNode::Element(param));
            }
            root.children.push(XMLNode::Element(params_el));
        }

        Ok(root)
    }

    /// Serialize the request to UTF-8 bytes with an XML 1.0 declaration
    pub fn to_bytes(&self, coder: &dyn Coder) -> Result<Vec<u8>, EncodeError> {
        let document = self.to_document(coder)?;
        let mut out = Vec::new();
        document.write(&mut out).map_err(|e| {
            EncodeError::Unrepresentable(format!("request document could not be serialized: {}", e))
        })?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlrpc_codec::StandardCoder;

    fn render(request: &RpcRequest) -> String {
        let bytes = request.to_bytes(&StandardCoder::new()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_get_state_name_request_shape() {
        let request = RpcRequest::new("examples.getStateName", Some(vec![Value::Int(41)]));
        let xml = render(&request);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("version=\"1.0\""));
        assert!(xml.contains("<methodCall>"));
        assert!(xml.contains("<methodName>examples.getStateName</methodName>"));
        assert!(xml.contains("<params><param><value><i4>41</i4></value></param></params>"));
    }

    #[test]
    fn test_nil_params_omit_params_element() {
        let request = RpcRequest::new("system.listMethods", None);
        let xml = render(&request);

        assert!(xml.contains("<methodName>system.listMethods</methodName>"));
        assert!(!xml.contains("<params"));
    }

    #[test]
    fn test_empty_params_emit_empty_element() {
        let request = RpcRequest::new("system.listMethods", Some(vec![]));
        let xml = render(&request);

        assert!(xml.contains("<params />") || xml.contains("<params/>"));
    }

    #[test]
    fn test_parameter_order_is_preserved() {
        let request = RpcRequest::new(
            "math.sub",
            Some(vec![Value::Int(10), Value::Int(3)]),
        );
        let xml = render(&request);

        let first = xml.find("<i4>10</i4>").unwrap();
        let second = xml.find("<i4>3</i4>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_encoder_failure_aborts_construction() {
        let request = RpcRequest::new(
            "math.store",
            Some(vec![Value::Int(1), Value::Double(f64::NAN)]),
        );
        assert!(request.to_bytes(&StandardCoder::new()).is_err());
    }
}
