//! Channel configuration type
//!
//! The discriminator of the [`ConfigData`](super::ConfigData) family.
//!
//! ## Unknown Tags
//!
//! Unknown tags resolve to [`ConfigType::None`]. A config stored by a newer
//! plugin with a channel type this build does not know still loads; its
//! payload is skipped as an unknown field and the config comes back with no
//! data.

use herald_core::dispatch::{TagRegistry, TaggedVariant};
use std::fmt;

/// Notification channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigType {
    /// Unrecognized or absent type
    None,
    /// Slack incoming webhook
    Slack,
    /// Amazon Chime webhook
    Chime,
    /// Microsoft Teams webhook
    MicrosoftTeams,
    /// Generic HTTP webhook
    Webhook,
    /// Email through an SMTP or SES account
    Email,
    /// Amazon SNS topic
    Sns,
    /// Amazon SES sending account
    SesAccount,
    /// SMTP sending account
    SmtpAccount,
    /// Named list of email recipients
    EmailGroup,
}

/// Tag resolver for [`ConfigType`], falling back to [`ConfigType::None`]
pub static CONFIG_TYPES: TagRegistry<ConfigType> = TagRegistry::with_fallback(ConfigType::None);

impl ConfigType {
    /// Resolve a tag, mapping unknown tags to [`ConfigType::None`]
    pub fn from_tag_or_default(tag: &str) -> Self {
        CONFIG_TYPES.lookup(tag).unwrap_or(ConfigType::None)
    }
}

impl TaggedVariant for ConfigType {
    const FAMILY: &'static str = "ConfigType";
    const ALL: &'static [Self] = &[
        ConfigType::None,
        ConfigType::Slack,
        ConfigType::Chime,
        ConfigType::MicrosoftTeams,
        ConfigType::Webhook,
        ConfigType::Email,
        ConfigType::Sns,
        ConfigType::SesAccount,
        ConfigType::SmtpAccount,
        ConfigType::EmailGroup,
    ];

    fn tag(self) -> &'static str {
        match self {
            ConfigType::None => "none",
            ConfigType::Slack => "slack",
            ConfigType::Chime => "chime",
            ConfigType::MicrosoftTeams => "microsoft_teams",
            ConfigType::Webhook => "webhook",
            ConfigType::Email => "email",
            ConfigType::Sns => "sns",
            ConfigType::SesAccount => "ses_account",
            ConfigType::SmtpAccount => "smtp_account",
            ConfigType::EmailGroup => "email_group",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for config_type in ConfigType::ALL {
            assert_eq!(ConfigType::from_tag(config_type.tag()), Some(*config_type));
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_none() {
        assert_eq!(ConfigType::from_tag_or_default("pager"), ConfigType::None);
        assert_eq!(CONFIG_TYPES.resolve("pager").unwrap(), ConfigType::None);
        assert_eq!(ConfigType::from_tag_or_default("sns"), ConfigType::Sns);
    }

    #[test]
    fn test_ordinals_are_stable() {
        assert_eq!(ConfigType::None.ordinal(), 0);
        assert_eq!(ConfigType::Slack.ordinal(), 1);
        assert_eq!(ConfigType::EmailGroup.ordinal(), 9);
    }

    #[test]
    fn test_display_uses_tag() {
        assert_eq!(ConfigType::MicrosoftTeams.to_string(), "microsoft_teams");
    }
}
