//! Replace an existing channel configuration

use crate::constants::{CONFIG_ID_TAG, CONFIG_TAG};
use crate::model::NotificationConfig;
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{ActionRequest, RequestValidationErrors, Result};
use serde_json::Value;

const RECORD: &str = "UpdateNotificationConfigRequest";

/// Replace the config stored under `config_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotificationConfigRequest {
    config_id: String,
    config: NotificationConfig,
}

impl UpdateNotificationConfigRequest {
    /// Create a request
    pub fn new(config_id: impl Into<String>, config: NotificationConfig) -> Self {
        UpdateNotificationConfigRequest {
            config_id: config_id.into(),
            config,
        }
    }

    /// Id of the config to replace
    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    /// Replacement config
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }
}

impl ActionRequest for UpdateNotificationConfigRequest {
    fn validate(&self) -> Option<RequestValidationErrors> {
        if self.config_id.trim().is_empty() {
            RequestValidationErrors::add(None, "configId is null or empty")
        } else {
            None
        }
    }
}

impl Writeable for UpdateNotificationConfigRequest {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.config_id);
        self.config.write_to(out);
    }
}

impl Readable for UpdateNotificationConfigRequest {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let config_id = input.read_string()?;
        let config = NotificationConfig::read_from(input)?;
        Ok(UpdateNotificationConfigRequest::new(config_id, config))
    }
}

impl ToDocument for UpdateNotificationConfigRequest {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(CONFIG_ID_TAG, self.config_id.as_str())
            .object(CONFIG_TAG, &self.config)
            .build()
    }
}

impl FromDocument for UpdateNotificationConfigRequest {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut config_id = None;
        let mut config = None;
        parse_object(stream, RECORD, |field, stream| {
            match field {
                CONFIG_ID_TAG => config_id = Some(stream.text()?),
                CONFIG_TAG => config = Some(NotificationConfig::parse(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let config_id = required(config_id, RECORD, CONFIG_ID_TAG)?;
        let config = required(config, RECORD, CONFIG_TAG)?;
        Ok(UpdateNotificationConfigRequest::new(config_id, config))
    }
}
