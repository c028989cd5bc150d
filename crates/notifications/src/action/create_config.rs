//! Create a channel configuration

use crate::constants::{CONFIG_ID_TAG, CONFIG_TAG};
use crate::model::NotificationConfig;
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{ActionRequest, RequestValidationErrors, Result};
use serde_json::Value;

/// Create a config, optionally with a caller-chosen id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNotificationConfigRequest {
    config_id: Option<String>,
    config: NotificationConfig,
}

impl CreateNotificationConfigRequest {
    /// Create a request; the host assigns an id when `config_id` is `None`
    pub fn new(config_id: Option<String>, config: NotificationConfig) -> Self {
        CreateNotificationConfigRequest { config_id, config }
    }

    /// Requested config id
    pub fn config_id(&self) -> Option<&str> {
        self.config_id.as_deref()
    }

    /// Config to store
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }
}

impl ActionRequest for CreateNotificationConfigRequest {
    fn validate(&self) -> Option<RequestValidationErrors> {
        match self.config_id.as_deref() {
            Some(id) if id.trim().is_empty() => RequestValidationErrors::add(None, "configId is empty"),
            _ => None,
        }
    }
}

impl Writeable for CreateNotificationConfigRequest {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_optional_string(self.config_id.as_deref());
        self.config.write_to(out);
    }
}

impl Readable for CreateNotificationConfigRequest {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let config_id = input.read_optional_string()?;
        let config = NotificationConfig::read_from(input)?;
        Ok(CreateNotificationConfigRequest::new(config_id, config))
    }
}

impl ToDocument for CreateNotificationConfigRequest {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field_if_some(CONFIG_ID_TAG, self.config_id.as_deref())
            .object(CONFIG_TAG, &self.config)
            .build()
    }
}

impl FromDocument for CreateNotificationConfigRequest {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut config_id = None;
        let mut config = None;
        parse_object(stream, "CreateNotificationConfigRequest", |field, stream| {
            match field {
                CONFIG_ID_TAG => config_id = stream.text_or_null()?,
                CONFIG_TAG => config = Some(NotificationConfig::parse(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let config = required(config, "CreateNotificationConfigRequest", CONFIG_TAG)?;
        Ok(CreateNotificationConfigRequest::new(config_id, config))
    }
}
