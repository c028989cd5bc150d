//! The channel configuration family
//!
//! [`ConfigData`] is the payload of a [`NotificationConfig`](super::NotificationConfig).
//! Each variant is keyed by a [`ConfigType`]; [`CONFIG_DATA`] is the table the
//! decoders use to pick a variant from that key.
//!
//! | ConfigType | Payload |
//! |------------|---------|
//! | slack | [`Slack`] |
//! | chime | [`Chime`] |
//! | microsoft_teams | [`MicrosoftTeams`] |
//! | webhook | [`Webhook`] |
//! | email | [`Email`] |
//! | sns | [`Sns`] |
//! | ses_account | [`SesAccount`] |
//! | smtp_account | [`SmtpAccount`] |
//! | email_group | [`EmailGroup`] |
//!
//! `none` has no payload.

use super::aws::{SesAccount, Sns};
use super::channel::{Chime, MicrosoftTeams, Slack, Webhook};
use super::config_type::ConfigType;
use super::email::{Email, EmailGroup};
use super::smtp_account::SmtpAccount;
use herald_core::dispatch::{VariantCodec, VariantRegistry};
use herald_core::document::ToDocument;
use herald_core::wire::{WireOutput, Writeable};
use serde_json::Value;

/// Payload of a notification channel configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigData {
    /// Slack webhook
    Slack(Slack),
    /// Chime webhook
    Chime(Chime),
    /// Microsoft Teams webhook
    MicrosoftTeams(MicrosoftTeams),
    /// Generic webhook
    Webhook(Webhook),
    /// Email channel
    Email(Email),
    /// SNS topic
    Sns(Sns),
    /// SES account
    SesAccount(SesAccount),
    /// SMTP account
    SmtpAccount(SmtpAccount),
    /// Email group
    EmailGroup(EmailGroup),
}

static CODECS: [VariantCodec<ConfigType, ConfigData>; 9] = [
    VariantCodec::of::<Slack>(ConfigType::Slack),
    VariantCodec::of::<Chime>(ConfigType::Chime),
    VariantCodec::of::<MicrosoftTeams>(ConfigType::MicrosoftTeams),
    VariantCodec::of::<Webhook>(ConfigType::Webhook),
    VariantCodec::of::<Email>(ConfigType::Email),
    VariantCodec::of::<Sns>(ConfigType::Sns),
    VariantCodec::of::<SesAccount>(ConfigType::SesAccount),
    VariantCodec::of::<SmtpAccount>(ConfigType::SmtpAccount),
    VariantCodec::of::<EmailGroup>(ConfigType::EmailGroup),
];

/// Decoder table for [`ConfigData`]
pub static CONFIG_DATA: VariantRegistry<ConfigType, ConfigData> =
    VariantRegistry::new("ConfigData", &CODECS);

impl ConfigData {
    /// The tag this payload is keyed by
    pub fn config_type(&self) -> ConfigType {
        match self {
            ConfigData::Slack(_) => ConfigType::Slack,
            ConfigData::Chime(_) => ConfigType::Chime,
            ConfigData::MicrosoftTeams(_) => ConfigType::MicrosoftTeams,
            ConfigData::Webhook(_) => ConfigType::Webhook,
            ConfigData::Email(_) => ConfigType::Email,
            ConfigData::Sns(_) => ConfigType::Sns,
            ConfigData::SesAccount(_) => ConfigType::SesAccount,
            ConfigData::SmtpAccount(_) => ConfigType::SmtpAccount,
            ConfigData::EmailGroup(_) => ConfigType::EmailGroup,
        }
    }
}

impl Writeable for ConfigData {
    fn write_to(&self, out: &mut WireOutput) {
        match self {
            ConfigData::Slack(v) => v.write_to(out),
            ConfigData::Chime(v) => v.write_to(out),
            ConfigData::MicrosoftTeams(v) => v.write_to(out),
            ConfigData::Webhook(v) => v.write_to(out),
            ConfigData::Email(v) => v.write_to(out),
            ConfigData::Sns(v) => v.write_to(out),
            ConfigData::SesAccount(v) => v.write_to(out),
            ConfigData::SmtpAccount(v) => v.write_to(out),
            ConfigData::EmailGroup(v) => v.write_to(out),
        }
    }
}

impl ToDocument for ConfigData {
    fn to_document(&self) -> Value {
        match self {
            ConfigData::Slack(v) => v.to_document(),
            ConfigData::Chime(v) => v.to_document(),
            ConfigData::MicrosoftTeams(v) => v.to_document(),
            ConfigData::Webhook(v) => v.to_document(),
            ConfigData::Email(v) => v.to_document(),
            ConfigData::Sns(v) => v.to_document(),
            ConfigData::SesAccount(v) => v.to_document(),
            ConfigData::SmtpAccount(v) => v.to_document(),
            ConfigData::EmailGroup(v) => v.to_document(),
        }
    }
}

impl From<Slack> for ConfigData {
    fn from(v: Slack) -> Self {
        ConfigData::Slack(v)
    }
}

impl From<Chime> for ConfigData {
    fn from(v: Chime) -> Self {
        ConfigData::Chime(v)
    }
}

impl From<MicrosoftTeams> for ConfigData {
    fn from(v: MicrosoftTeams) -> Self {
        ConfigData::MicrosoftTeams(v)
    }
}

impl From<Webhook> for ConfigData {
    fn from(v: Webhook) -> Self {
        ConfigData::Webhook(v)
    }
}

impl From<Email> for ConfigData {
    fn from(v: Email) -> Self {
        ConfigData::Email(v)
    }
}

impl From<Sns> for ConfigData {
    fn from(v: Sns) -> Self {
        ConfigData::Sns(v)
    }
}

impl From<SesAccount> for ConfigData {
    fn from(v: SesAccount) -> Self {
        ConfigData::SesAccount(v)
    }
}

impl From<SmtpAccount> for ConfigData {
    fn from(v: SmtpAccount) -> Self {
        ConfigData::SmtpAccount(v)
    }
}

impl From<EmailGroup> for ConfigData {
    fn from(v: EmailGroup) -> Self {
        ConfigData::EmailGroup(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::dispatch::TaggedVariant;
    use herald_core::document::TokenStream;
    use herald_core::wire::{to_bytes, WireInput};

    #[test]
    fn test_every_payload_type_registered() {
        for config_type in ConfigType::ALL {
            assert_eq!(
                CONFIG_DATA.contains(*config_type),
                *config_type != ConfigType::None,
                "{}",
                config_type
            );
        }
    }

    #[test]
    fn test_registry_key_matches_variant() {
        let data = ConfigData::from(Slack::new("https://hooks.slack.com/x").unwrap());
        let bytes = to_bytes(&data);
        let decoded = CONFIG_DATA
            .read(data.config_type(), &mut WireInput::new(&bytes))
            .unwrap();
        assert_eq!(decoded, data);

        let mut stream = TokenStream::from_value(&data.to_document()).unwrap();
        let parsed = CONFIG_DATA.parse(ConfigType::Slack, &mut stream).unwrap();
        assert_eq!(parsed.config_type(), ConfigType::Slack);
    }

    #[test]
    fn test_none_has_no_decoder() {
        let mut stream = TokenStream::from_json_str("{}").unwrap();
        assert!(CONFIG_DATA.parse(ConfigType::None, &mut stream).is_err());
    }
}
