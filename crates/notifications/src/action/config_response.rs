//! Responses to config create and update requests

use crate::constants::CONFIG_ID_TAG;
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::require_non_empty;
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

fn parse_config_id(stream: &mut TokenStream, record: &'static str) -> Result<String> {
    let mut config_id = None;
    parse_object(stream, record, |field, stream| {
        match field {
            CONFIG_ID_TAG => config_id = Some(stream.text()?),
            _ => return Ok(FieldAction::Skip),
        }
        Ok(FieldAction::Consumed)
    })?;
    Ok(required(config_id, record, CONFIG_ID_TAG)?)
}

/// Id assigned to a newly created config
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreateNotificationConfigResponse {
    config_id: String,
}

impl CreateNotificationConfigResponse {
    /// Create a response
    pub fn new(config_id: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let config_id = config_id.into();
        require_non_empty(&config_id, "CreateNotificationConfigResponse", "configId")?;
        Ok(CreateNotificationConfigResponse { config_id })
    }

    /// Assigned id
    pub fn config_id(&self) -> &str {
        &self.config_id
    }
}

impl Writeable for CreateNotificationConfigResponse {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.config_id);
    }
}

impl Readable for CreateNotificationConfigResponse {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(CreateNotificationConfigResponse::new(input.read_string()?)?)
    }
}

impl ToDocument for CreateNotificationConfigResponse {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(CONFIG_ID_TAG, self.config_id.as_str())
            .build()
    }
}

impl FromDocument for CreateNotificationConfigResponse {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let config_id = parse_config_id(stream, "CreateNotificationConfigResponse")?;
        Ok(CreateNotificationConfigResponse::new(config_id)?)
    }
}

/// Id of the config that was replaced
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateNotificationConfigResponse {
    config_id: String,
}

impl UpdateNotificationConfigResponse {
    /// Create a response
    pub fn new(config_id: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let config_id = config_id.into();
        require_non_empty(&config_id, "UpdateNotificationConfigResponse", "configId")?;
        Ok(UpdateNotificationConfigResponse { config_id })
    }

    /// Updated config id
    pub fn config_id(&self) -> &str {
        &self.config_id
    }
}

impl Writeable for UpdateNotificationConfigResponse {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.config_id);
    }
}

impl Readable for UpdateNotificationConfigResponse {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(UpdateNotificationConfigResponse::new(input.read_string()?)?)
    }
}

impl ToDocument for UpdateNotificationConfigResponse {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(CONFIG_ID_TAG, self.config_id.as_str())
            .build()
    }
}

impl FromDocument for UpdateNotificationConfigResponse {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let config_id = parse_config_id(stream, "UpdateNotificationConfigResponse")?;
        Ok(UpdateNotificationConfigResponse::new(config_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    #[test]
    fn test_create_response() {
        let response = CreateNotificationConfigResponse::new("sample_config_id").unwrap();
        assert_eq!(to_json_string(&response), r#"{"config_id":"sample_config_id"}"#);
        assert_eq!(
            from_bytes::<CreateNotificationConfigResponse>(&to_bytes(&response)).unwrap(),
            response
        );
    }

    #[test]
    fn test_update_response_tolerates_extra_fields() {
        let response = from_json_str::<UpdateNotificationConfigResponse>(
            r#"{"config_id":"id","extra_field_1":["extra","value"],"extra_field_2":{"extra":"value"}}"#,
        )
        .unwrap();
        assert_eq!(response.config_id(), "id");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(CreateNotificationConfigResponse::new("").is_err());
        assert!(from_json_str::<UpdateNotificationConfigResponse>(r#"{"config_id":""}"#)
            .unwrap_err()
            .is_validation());
    }
}
