//! Notification channel configuration
//!
//! The wrapper record of the [`ConfigData`] family.
//!
//! ## Document Form
//!
//! ```json
//! {
//!   "name": "ops",
//!   "description": "",
//!   "config_type": "slack",
//!   "is_enabled": true,
//!   "slack": { "url": "https://hooks.slack.com/..." }
//! }
//! ```
//!
//! The payload is keyed by its variant tag. It may appear before or after
//! `config_type`; the two are reconciled once the whole object is read. A
//! second payload key is an error. Keys that are not a registered payload tag
//! (including `feature_list` and payloads of unknown types) are skipped.
//!
//! ## Binary Form
//!
//! ```text
//! [name][description][config_type: enum][is_enabled: bool][present: bool][payload]
//! ```
//!
//! The payload decoder is chosen from the `config_type` read just before it.

use super::config_data::{ConfigData, CONFIG_DATA};
use super::config_type::{ConfigType, CONFIG_TYPES};
use crate::constants::{CONFIG_TYPE_TAG, DESCRIPTION_TAG, IS_ENABLED_TAG, NAME_TAG};
use herald_core::dispatch::TaggedVariant;
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::{require, require_non_empty};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{DocumentError, Result, ValidationError};
use serde_json::Value;
use tracing::info;

const RECORD: &str = "NotificationConfig";

/// A named, typed notification channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationConfig {
    name: String,
    description: String,
    config_type: ConfigType,
    is_enabled: bool,
    config_data: Option<ConfigData>,
}

impl NotificationConfig {
    /// Create a config
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty, or if `config_type` and `config_data`
    /// disagree. [`ConfigType::None`] must carry no payload; every other type
    /// must carry a payload of that type.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config_type: ConfigType,
        config_data: Option<ConfigData>,
        is_enabled: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        require_non_empty(&name, RECORD, "name")?;
        let matches = match &config_data {
            Some(data) => data.config_type() == config_type,
            None => config_type == ConfigType::None,
        };
        require(
            matches,
            RECORD,
            format!("ConfigType: {} and data doesn't match", config_type),
        )?;
        if config_type == ConfigType::None {
            info!(target: "herald::notifications", name = %name, "Some config field not recognized");
        }
        Ok(NotificationConfig {
            name,
            description: description.into(),
            config_type,
            is_enabled,
            config_data,
        })
    }

    /// Create an enabled config whose type is taken from the payload
    pub fn from_data(
        name: impl Into<String>,
        description: impl Into<String>,
        config_data: impl Into<ConfigData>,
    ) -> std::result::Result<Self, ValidationError> {
        let data = config_data.into();
        Self::new(name, description, data.config_type(), Some(data), true)
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description, empty if none
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Channel type
    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Whether the channel accepts notifications
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Channel payload, absent only for [`ConfigType::None`]
    pub fn config_data(&self) -> Option<&ConfigData> {
        self.config_data.as_ref()
    }
}

impl Writeable for NotificationConfig {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.name);
        out.write_string(&self.description);
        out.write_enum(self.config_type);
        out.write_bool(self.is_enabled);
        out.write_optional(self.config_data.as_ref());
    }
}

impl Readable for NotificationConfig {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let name = input.read_string()?;
        let description = input.read_string()?;
        let config_type: ConfigType = input.read_enum()?;
        let is_enabled = input.read_bool()?;
        let config_data = if input.read_bool()? {
            Some(CONFIG_DATA.read(config_type, input)?)
        } else {
            None
        };
        Ok(NotificationConfig::new(
            name,
            description,
            config_type,
            config_data,
            is_enabled,
        )?)
    }
}

impl ToDocument for NotificationConfig {
    fn to_document(&self) -> Value {
        let builder = DocumentBuilder::new()
            .field(NAME_TAG, self.name.as_str())
            .field(DESCRIPTION_TAG, self.description.as_str())
            .field(CONFIG_TYPE_TAG, self.config_type.tag())
            .field(IS_ENABLED_TAG, self.is_enabled);
        match &self.config_data {
            Some(data) => builder.object(data.config_type().tag(), data).build(),
            None => builder.build(),
        }
    }
}

impl FromDocument for NotificationConfig {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut name = None;
        let mut description = String::new();
        let mut config_type = None;
        let mut is_enabled = true;
        let mut config_data: Option<ConfigData> = None;
        parse_object(stream, RECORD, |field, stream| {
            match field {
                NAME_TAG => name = Some(stream.text()?),
                DESCRIPTION_TAG => description = stream.text()?,
                CONFIG_TYPE_TAG => config_type = Some(CONFIG_TYPES.resolve_current(stream)?),
                IS_ENABLED_TAG => is_enabled = stream.bool_value()?,
                other => {
                    let Some(key) = ConfigType::from_tag(other).filter(|t| CONFIG_DATA.contains(*t))
                    else {
                        return Ok(FieldAction::Skip);
                    };
                    if let Some(first) = &config_data {
                        return Err(DocumentError::DuplicateVariant {
                            record: RECORD,
                            first: first.config_type().tag().to_string(),
                            second: key.tag().to_string(),
                        }
                        .into());
                    }
                    config_data = Some(CONFIG_DATA.parse(key, stream)?);
                }
            }
            Ok(FieldAction::Consumed)
        })?;
        let name = required(name, RECORD, NAME_TAG)?;
        let config_type = required(config_type, RECORD, CONFIG_TYPE_TAG)?;
        Ok(NotificationConfig::new(
            name,
            description,
            config_type,
            config_data,
            is_enabled,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chime, Slack};
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};
    use herald_core::Error;

    const SLACK_URL: &str = "https://domain.com/sample_slack_url#1234567890";

    fn slack_config() -> NotificationConfig {
        NotificationConfig::new(
            "name",
            "description",
            ConfigType::Slack,
            Some(Slack::new(SLACK_URL).unwrap().into()),
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_name_required() {
        let err = NotificationConfig::new("", "", ConfigType::None, None, true).unwrap_err();
        assert_eq!(err.message, "name is null or empty");
    }

    #[test]
    fn test_type_and_payload_must_agree() {
        let chime: ConfigData = Chime::new("https://chime.aws/x").unwrap().into();
        let err = NotificationConfig::new("n", "", ConfigType::Slack, Some(chime.clone()), true)
            .unwrap_err();
        assert_eq!(err.message, "ConfigType: slack and data doesn't match");

        assert!(NotificationConfig::new("n", "", ConfigType::Slack, None, true).is_err());
        assert!(NotificationConfig::new("n", "", ConfigType::None, Some(chime), true).is_err());
        assert!(NotificationConfig::new("n", "", ConfigType::None, None, true).is_ok());
    }

    #[test]
    fn test_document_shape() {
        assert_eq!(
            to_json_string(&slack_config()),
            format!(
                r#"{{"name":"name","description":"description","config_type":"slack","is_enabled":true,"slack":{{"url":"{}"}}}}"#,
                SLACK_URL
            )
        );
    }

    #[test]
    fn test_discriminator_after_payload() {
        let config = from_json_str::<NotificationConfig>(&format!(
            r#"{{"slack":{{"url":"{}"}},"name":"name","description":"description","config_type":"slack"}}"#,
            SLACK_URL
        ))
        .unwrap();
        assert_eq!(config, slack_config());
    }

    #[test]
    fn test_defaults() {
        let config =
            from_json_str::<NotificationConfig>(r#"{"name":"n","config_type":"none"}"#).unwrap();
        assert_eq!(config.description(), "");
        assert!(config.is_enabled());
        assert_eq!(config.config_data(), None);
    }

    #[test]
    fn test_duplicate_payload_rejected() {
        let err = from_json_str::<NotificationConfig>(
            r#"{"name":"n","config_type":"slack",
                "slack":{"url":"https://a.com"},
                "chime":{"url":"https://b.com"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::Document(DocumentError::DuplicateVariant {
                record: "NotificationConfig",
                first: "slack".to_string(),
                second: "chime".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_type_becomes_none() {
        let config = from_json_str::<NotificationConfig>(
            r#"{"name":"n","config_type":"pager_duty","pager_duty":{"key":"abc"}}"#,
        )
        .unwrap();
        assert_eq!(config.config_type(), ConfigType::None);
        assert_eq!(config.config_data(), None);
    }

    #[test]
    fn test_missing_config_type() {
        let err = from_json_str::<NotificationConfig>(r#"{"name":"n"}"#).unwrap_err();
        assert_eq!(err.to_string(), "document error: config_type field absent while parsing NotificationConfig");
    }

    #[test]
    fn test_binary_round_trip() {
        let config = slack_config();
        assert_eq!(from_bytes::<NotificationConfig>(&to_bytes(&config)).unwrap(), config);

        let none = NotificationConfig::new("n", "d", ConfigType::None, None, false).unwrap();
        assert_eq!(from_bytes::<NotificationConfig>(&to_bytes(&none)).unwrap(), none);
    }

    #[test]
    fn test_binary_payload_missing_for_typed_config() {
        let mut out = WireOutput::new();
        out.write_string("n");
        out.write_string("");
        out.write_enum(ConfigType::Slack);
        out.write_bool(true);
        out.write_bool(false);
        let err = from_bytes::<NotificationConfig>(out.as_bytes()).unwrap_err();
        assert!(err.is_validation());
    }
}
