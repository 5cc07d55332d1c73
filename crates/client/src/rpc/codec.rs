//! XML-RPC envelope encoding and decoding
//!
//! Wire formatting is delegated to the `xmlrpc` crate. HTTP is not: the body
//! is sent through our own transport, and the bytes that come back are fed
//! to the `xmlrpc` response parser through a buffered [`Transport`].

use std::io::Cursor;

use infusionsoft_domain::{InfusionsoftError, Result};
use xmlrpc::{Request, Transport, Value};

/// Serialize a method call with positional arguments.
///
/// # Errors
/// Returns `InfusionsoftError::RemoteCall` if the document cannot be written.
pub fn encode_call(method: &str, args: &[Value]) -> Result<Vec<u8>> {
    let request =
        args.iter().cloned().fold(Request::new(method), |request, arg| request.arg(arg));

    let mut body = Vec::new();
    request.write_as_xml(&mut body).map_err(|err| InfusionsoftError::RemoteCall {
        message: format!("Failed to encode XML-RPC request: {err}"),
        code: 0,
    })?;

    Ok(body)
}

/// Parse a `methodResponse` document.
///
/// # Errors
/// Returns `InfusionsoftError::RemoteCall` carrying the fault string and code
/// for fault responses, or the parser message with code `0` for malformed
/// documents.
pub fn decode_response(method: &str, body: Vec<u8>) -> Result<Value> {
    Request::new(method).call(Buffered(body)).map_err(|err| match err.fault() {
        Some(fault) => InfusionsoftError::RemoteCall {
            message: fault.fault_string.clone(),
            code: fault.fault_code,
        },
        None => InfusionsoftError::RemoteCall { message: err.to_string(), code: 0 },
    })
}

/// Hands an already-received response body to the parser.
struct Buffered(Vec<u8>);

impl Transport for Buffered {
    type Stream = Cursor<Vec<u8>>;

    fn transmit(
        self,
        _request: &Request<'_>,
    ) -> std::result::Result<Self::Stream, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Cursor::new(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_method_name_and_params_in_order() {
        let body = encode_call(
            "ContactService.findByEmail",
            &[Value::from("key"), Value::from("a@b.com"), Value::Int(3)],
        )
        .expect("encode");
        let xml = String::from_utf8(body).expect("utf8");

        assert!(xml.contains("<methodName>ContactService.findByEmail</methodName>"));
        let key = xml.find("key").expect("key param");
        let email = xml.find("a@b.com").expect("email param");
        assert!(key < email);
        assert!(xml.contains("<int>3</int>") || xml.contains("<i4>3</i4>"));
    }

    #[test]
    fn decodes_success_value() {
        let body = br#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param><value><array><data>
      <value><struct>
        <member><name>Id</name><value><i4>42</i4></value></member>
      </struct></value>
    </data></array></value></param>
  </params>
</methodResponse>"#;

        let value = decode_response("ContactService.findByEmail", body.to_vec()).expect("value");

        assert_eq!(value[0]["Id"], Value::Int(42));
    }

    #[test]
    fn decodes_fault_into_message_and_code() {
        let body = br#"<?xml version="1.0"?>
<methodResponse>
  <fault>
    <value><struct>
      <member><name>faultCode</name><value><i4>2</i4></value></member>
      <member><name>faultString</name><value><string>[InvalidKey]Invalid Key</string></value></member>
    </struct></value>
  </fault>
</methodResponse>"#;

        let err = decode_response("DataService.echo", body.to_vec()).unwrap_err();

        assert_eq!(
            err,
            InfusionsoftError::RemoteCall { message: "[InvalidKey]Invalid Key".to_string(), code: 2 }
        );
    }

    #[test]
    fn malformed_document_has_zero_code() {
        let err = decode_response("DataService.echo", b"<html>nope</html>".to_vec()).unwrap_err();

        assert_eq!(err.code(), Some(0));
    }
}
