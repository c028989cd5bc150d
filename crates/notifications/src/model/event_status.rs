//! Per-channel delivery outcome of a notification event

use super::config_type::{ConfigType, CONFIG_TYPES};
use crate::constants::{
    CONFIG_ID_TAG, CONFIG_NAME_TAG, CONFIG_TYPE_TAG, DELIVERY_STATUS_TAG,
    EMAIL_RECIPIENT_STATUS_TAG, RECIPIENT_TAG, STATUS_CODE_TAG, STATUS_TEXT_TAG,
};
use herald_core::dispatch::TaggedVariant;
use herald_core::document::{
    object_list, parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    TokenStream,
};
use herald_core::validation::{require, require_non_empty, validate_email};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;
use tracing::info;

/// Status returned by a channel endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryStatus {
    status_code: String,
    status_text: String,
}

impl DeliveryStatus {
    /// Create a status; both parts must be non-empty
    pub fn new(
        status_code: impl Into<String>,
        status_text: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let status_code = status_code.into();
        let status_text = status_text.into();
        require_non_empty(&status_code, "DeliveryStatus", "StatusCode")?;
        require_non_empty(&status_text, "DeliveryStatus", "statusText")?;
        Ok(DeliveryStatus {
            status_code,
            status_text,
        })
    }

    /// Endpoint status code, e.g. `"200"`
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Endpoint status text
    pub fn status_text(&self) -> &str {
        &self.status_text
    }
}

impl Writeable for DeliveryStatus {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.status_code);
        out.write_string(&self.status_text);
    }
}

impl Readable for DeliveryStatus {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let status_code = input.read_string()?;
        let status_text = input.read_string()?;
        Ok(DeliveryStatus::new(status_code, status_text)?)
    }
}

impl ToDocument for DeliveryStatus {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(STATUS_CODE_TAG, self.status_code.as_str())
            .field(STATUS_TEXT_TAG, self.status_text.as_str())
            .build()
    }
}

impl FromDocument for DeliveryStatus {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut status_code = None;
        let mut status_text = None;
        parse_object(stream, "DeliveryStatus", |field, stream| {
            match field {
                STATUS_CODE_TAG => status_code = Some(stream.text()?),
                STATUS_TEXT_TAG => status_text = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let status_code = required(status_code, "DeliveryStatus", STATUS_CODE_TAG)?;
        let status_text = required(status_text, "DeliveryStatus", STATUS_TEXT_TAG)?;
        Ok(DeliveryStatus::new(status_code, status_text)?)
    }
}

/// Delivery status for one email recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailRecipientStatus {
    recipient: String,
    delivery_status: DeliveryStatus,
}

impl EmailRecipientStatus {
    /// Create a recipient status
    pub fn new(
        recipient: impl Into<String>,
        delivery_status: DeliveryStatus,
    ) -> std::result::Result<Self, ValidationError> {
        let recipient = recipient.into();
        validate_email(&recipient, "EmailRecipientStatus")?;
        Ok(EmailRecipientStatus {
            recipient,
            delivery_status,
        })
    }

    /// Recipient address
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Outcome for this recipient
    pub fn delivery_status(&self) -> &DeliveryStatus {
        &self.delivery_status
    }
}

impl Writeable for EmailRecipientStatus {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.recipient);
        self.delivery_status.write_to(out);
    }
}

impl Readable for EmailRecipientStatus {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let recipient = input.read_string()?;
        let delivery_status = DeliveryStatus::read_from(input)?;
        Ok(EmailRecipientStatus::new(recipient, delivery_status)?)
    }
}

impl ToDocument for EmailRecipientStatus {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(RECIPIENT_TAG, self.recipient.as_str())
            .object(DELIVERY_STATUS_TAG, &self.delivery_status)
            .build()
    }
}

impl FromDocument for EmailRecipientStatus {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut recipient = None;
        let mut delivery_status = None;
        parse_object(stream, "EmailRecipientStatus", |field, stream| {
            match field {
                RECIPIENT_TAG => recipient = Some(stream.text()?),
                DELIVERY_STATUS_TAG => delivery_status = Some(DeliveryStatus::parse(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let recipient = required(recipient, "EmailRecipientStatus", RECIPIENT_TAG)?;
        let delivery_status =
            required(delivery_status, "EmailRecipientStatus", DELIVERY_STATUS_TAG)?;
        Ok(EmailRecipientStatus::new(recipient, delivery_status)?)
    }
}

/// Outcome of sending one event to one channel
///
/// Which status fields must be present depends on the channel type:
///
/// | ConfigType | Requirement |
/// |------------|-------------|
/// | chime, slack, microsoft_teams, webhook, sns | `delivery_status` present |
/// | email | `email_recipient_status` non-empty |
/// | anything else | none (logged) |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventStatus {
    config_id: String,
    config_name: String,
    config_type: ConfigType,
    email_recipient_status: Vec<EmailRecipientStatus>,
    delivery_status: Option<DeliveryStatus>,
}

impl EventStatus {
    /// Create a status, enforcing the per-type requirements
    pub fn new(
        config_id: impl Into<String>,
        config_name: impl Into<String>,
        config_type: ConfigType,
        email_recipient_status: Vec<EmailRecipientStatus>,
        delivery_status: Option<DeliveryStatus>,
    ) -> std::result::Result<Self, ValidationError> {
        let config_id = config_id.into();
        let config_name = config_name.into();
        require_non_empty(&config_id, "EventStatus", "config id")?;
        require_non_empty(&config_name, "EventStatus", "config name")?;
        match config_type {
            ConfigType::Chime | ConfigType::Slack | ConfigType::Webhook | ConfigType::Sns => require(
                delivery_status.is_some(),
                "EventStatus",
                format!("delivery status is required for {}", config_type),
            )?,
            ConfigType::Email => require(
                !email_recipient_status.is_empty(),
                "EventStatus",
                "email recipient status is required for email",
            )?,
            ConfigType::None => {
                info!(target: "herald::notifications", config_id = %config_id, "Some config field not recognized")
            }
            other => {
                info!(target: "herald::notifications", config_type = %other, "non-allowed config type for Status")
            }
        }
        Ok(EventStatus {
            config_id,
            config_name,
            config_type,
            email_recipient_status,
            delivery_status,
        })
    }

    /// Channel config id
    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    /// Channel config name
    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    /// Channel type
    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Per-recipient statuses (email channels)
    pub fn email_recipient_status(&self) -> &[EmailRecipientStatus] {
        &self.email_recipient_status
    }

    /// Channel-level status
    pub fn delivery_status(&self) -> Option<&DeliveryStatus> {
        self.delivery_status.as_ref()
    }
}

impl Writeable for EventStatus {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.config_id);
        out.write_string(&self.config_name);
        out.write_enum(self.config_type);
        out.write_list(&self.email_recipient_status);
        out.write_optional(self.delivery_status.as_ref());
    }
}

impl Readable for EventStatus {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let config_id = input.read_string()?;
        let config_name = input.read_string()?;
        let config_type = input.read_enum()?;
        let email_recipient_status = input.read_list()?;
        let delivery_status = input.read_optional()?;
        Ok(EventStatus::new(
            config_id,
            config_name,
            config_type,
            email_recipient_status,
            delivery_status,
        )?)
    }
}

impl ToDocument for EventStatus {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(CONFIG_ID_TAG, self.config_id.as_str())
            .field(CONFIG_TYPE_TAG, self.config_type.tag())
            .field(CONFIG_NAME_TAG, self.config_name.as_str())
            .object_list(EMAIL_RECIPIENT_STATUS_TAG, &self.email_recipient_status)
            .object_if_some(DELIVERY_STATUS_TAG, self.delivery_status.as_ref())
            .build()
    }
}

impl FromDocument for EventStatus {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut config_id = None;
        let mut config_name = None;
        let mut config_type = None;
        let mut email_recipient_status = Vec::new();
        let mut delivery_status = None;
        parse_object(stream, "EventStatus", |field, stream| {
            match field {
                CONFIG_ID_TAG => config_id = Some(stream.text()?),
                CONFIG_NAME_TAG => config_name = Some(stream.text()?),
                CONFIG_TYPE_TAG => config_type = Some(CONFIG_TYPES.resolve_current(stream)?),
                EMAIL_RECIPIENT_STATUS_TAG => {
                    email_recipient_status = object_list(stream, EmailRecipientStatus::parse)?
                }
                DELIVERY_STATUS_TAG => delivery_status = Some(DeliveryStatus::parse(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let config_name = required(config_name, "EventStatus", CONFIG_NAME_TAG)?;
        let config_id = required(config_id, "EventStatus", CONFIG_ID_TAG)?;
        let config_type = required(config_type, "EventStatus", CONFIG_TYPE_TAG)?;
        Ok(EventStatus::new(
            config_id,
            config_name,
            config_type,
            email_recipient_status,
            delivery_status,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    fn ok_status() -> DeliveryStatus {
        DeliveryStatus::new("200", "OK").unwrap()
    }

    #[test]
    fn test_delivery_status_requires_parts() {
        assert!(DeliveryStatus::new("", "OK").is_err());
        assert!(DeliveryStatus::new("404", "").is_err());
    }

    #[test]
    fn test_webhook_types_require_delivery_status() {
        for config_type in [
            ConfigType::Chime,
            ConfigType::Slack,
            ConfigType::Webhook,
            ConfigType::Sns,
        ] {
            let err = EventStatus::new("id", "name", config_type, vec![], None).unwrap_err();
            assert!(err.message.contains("delivery status is required"), "{}", config_type);
            assert!(EventStatus::new("id", "name", config_type, vec![], Some(ok_status())).is_ok());
        }
    }

    #[test]
    fn test_email_requires_recipient_status() {
        assert!(EventStatus::new("id", "name", ConfigType::Email, vec![], Some(ok_status())).is_err());
        let recipient = EmailRecipientStatus::new("a@b.com", ok_status()).unwrap();
        assert!(EventStatus::new("id", "name", ConfigType::Email, vec![recipient], None).is_ok());
    }

    #[test]
    fn test_other_types_are_permissive() {
        assert!(EventStatus::new("id", "name", ConfigType::None, vec![], None).is_ok());
        assert!(EventStatus::new("id", "name", ConfigType::SmtpAccount, vec![], None).is_ok());
    }

    #[test]
    fn test_microsoft_teams_status_needs_no_delivery_status() {
        let status =
            EventStatus::new("id", "name", ConfigType::MicrosoftTeams, vec![], None).unwrap();
        assert_eq!(status.config_type(), ConfigType::MicrosoftTeams);
        assert_eq!(status.delivery_status(), None);
    }

    #[test]
    fn test_identifiers_required() {
        let err = EventStatus::new("", "name", ConfigType::None, vec![], None).unwrap_err();
        assert_eq!(err.message, "config id is null or empty");
        let err = EventStatus::new("id", "", ConfigType::None, vec![], None).unwrap_err();
        assert_eq!(err.message, "config name is null or empty");
    }

    #[test]
    fn test_email_status_round_trips() {
        let status = EventStatus::new(
            "config_id",
            "name",
            ConfigType::Email,
            vec![
                EmailRecipientStatus::new("a@b.com", ok_status()).unwrap(),
                EmailRecipientStatus::new("c@d.com", DeliveryStatus::new("500", "Bounced").unwrap())
                    .unwrap(),
            ],
            None,
        )
        .unwrap();
        assert_eq!(from_bytes::<EventStatus>(&to_bytes(&status)).unwrap(), status);
        assert_eq!(
            from_json_str::<EventStatus>(&to_json_string(&status)).unwrap(),
            status
        );
    }

    #[test]
    fn test_parse_with_unknown_type() {
        let status = from_json_str::<EventStatus>(
            r#"{"config_id":"id","config_type":"carrier_pigeon","config_name":"n"}"#,
        )
        .unwrap();
        assert_eq!(status.config_type(), ConfigType::None);
        assert!(status.email_recipient_status().is_empty());
    }
}
