//! SMTP sending account

use super::method_type::{MethodType, METHOD_TYPES};
use crate::constants::{FROM_ADDRESS_TAG, HOST_TAG, METHOD_TAG, PORT_TAG};
use herald_core::dispatch::TaggedVariant;
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::{require, require_non_empty, validate_email};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

/// SMTP relay used by email channels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SmtpAccount {
    host: String,
    port: i32,
    method: MethodType,
    from_address: String,
}

impl SmtpAccount {
    /// Create an account
    ///
    /// # Errors
    ///
    /// Fails if `host` is empty, `port` is not positive, or `from_address`
    /// is not a valid email address.
    pub fn new(
        host: impl Into<String>,
        port: i32,
        method: MethodType,
        from_address: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let host = host.into();
        let from_address = from_address.into();
        require_non_empty(&host, "SmtpAccount", "host")?;
        require(port > 0, "SmtpAccount", "port should be positive value")?;
        validate_email(&from_address, "SmtpAccount")?;
        Ok(SmtpAccount {
            host,
            port,
            method,
            from_address,
        })
    }

    /// Relay host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Relay port
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Connection security
    pub fn method(&self) -> MethodType {
        self.method
    }

    /// Sender address
    pub fn from_address(&self) -> &str {
        &self.from_address
    }
}

impl Writeable for SmtpAccount {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.host);
        out.write_i32(self.port);
        out.write_enum(self.method);
        out.write_string(&self.from_address);
    }
}

impl Readable for SmtpAccount {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let host = input.read_string()?;
        let port = input.read_i32()?;
        let method = input.read_enum()?;
        let from_address = input.read_string()?;
        Ok(SmtpAccount::new(host, port, method, from_address)?)
    }
}

impl ToDocument for SmtpAccount {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(HOST_TAG, self.host.as_str())
            .field(PORT_TAG, self.port)
            .field(METHOD_TAG, self.method.tag())
            .field(FROM_ADDRESS_TAG, self.from_address.as_str())
            .build()
    }
}

impl FromDocument for SmtpAccount {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut host = None;
        let mut port = None;
        let mut method = None;
        let mut from_address = None;
        parse_object(stream, "SmtpAccount", |field, stream| {
            match field {
                HOST_TAG => host = Some(stream.text()?),
                PORT_TAG => port = Some(stream.i32_value()?),
                METHOD_TAG => method = Some(METHOD_TYPES.resolve_current(stream)?),
                FROM_ADDRESS_TAG => from_address = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let host = required(host, "SmtpAccount", HOST_TAG)?;
        let port = required(port, "SmtpAccount", PORT_TAG)?;
        let method = required(method, "SmtpAccount", METHOD_TAG)?;
        let from_address = required(from_address, "SmtpAccount", FROM_ADDRESS_TAG)?;
        Ok(SmtpAccount::new(host, port, method, from_address)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};
    use herald_core::{DocumentError, Error};

    fn sample() -> SmtpAccount {
        SmtpAccount::new("http://dummy.com", 11, MethodType::Ssl, "sample@dummy.com").unwrap()
    }

    #[test]
    fn test_invariants() {
        assert_eq!(
            SmtpAccount::new("", 25, MethodType::None, "a@b.com")
                .unwrap_err()
                .message,
            "host is null or empty"
        );
        assert_eq!(
            SmtpAccount::new("smtp", 0, MethodType::None, "a@b.com")
                .unwrap_err()
                .message,
            "port should be positive value"
        );
        assert_eq!(
            SmtpAccount::new("smtp", 25, MethodType::None, "nobody")
                .unwrap_err()
                .message,
            "Invalid email address"
        );
    }

    #[test]
    fn test_parse_sample_document() {
        let account = from_json_str::<SmtpAccount>(
            r#"{"host":"http://dummy.com", "port":11,"method": "ssl", "from_address": "sample@dummy.com" }"#,
        )
        .unwrap();
        assert_eq!(account, sample());
    }

    #[test]
    fn test_each_field_required() {
        for (field, text) in [
            ("host", r#"{"port":11,"method":"ssl","from_address":"a@b.com"}"#),
            ("port", r#"{"host":"h","method":"ssl","from_address":"a@b.com"}"#),
            ("method", r#"{"host":"h","port":11,"from_address":"a@b.com"}"#),
            ("from_address", r#"{"host":"h","port":11,"method":"ssl"}"#),
        ] {
            let err = from_json_str::<SmtpAccount>(text).unwrap_err();
            match err {
                Error::Document(DocumentError::MissingField { field: missing, .. }) => {
                    assert_eq!(missing, field)
                }
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_round_trips() {
        let account = sample();
        assert_eq!(from_bytes::<SmtpAccount>(&to_bytes(&account)).unwrap(), account);
        assert_eq!(
            from_json_str::<SmtpAccount>(&to_json_string(&account)).unwrap(),
            account
        );
    }

    #[test]
    fn test_truncated_binary() {
        let bytes = to_bytes(&sample());
        let err = from_bytes::<SmtpAccount>(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(err.is_structural());
    }
}
