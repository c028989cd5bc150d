//! Notification records
//!
//! Channel configurations ([`NotificationConfig`] wrapping the [`ConfigData`]
//! family) and the event records exchanged when a notification is sent.

mod aws;
mod channel;
mod channel_message;
mod config_data;
mod config_type;
mod email;
mod event_source;
mod event_status;
mod method_type;
mod notification_config;
mod severity;
mod smtp_account;

pub use aws::{SesAccount, Sns};
pub use channel::{Chime, HttpMethodType, MicrosoftTeams, Slack, Webhook, HTTP_METHOD_TYPES};
pub use channel_message::{Attachment, ChannelMessage};
pub use config_data::{ConfigData, CONFIG_DATA};
pub use config_type::{ConfigType, CONFIG_TYPES};
pub use email::{Email, EmailGroup, EmailRecipient};
pub use event_source::EventSource;
pub use event_status::{DeliveryStatus, EmailRecipientStatus, EventStatus};
pub use method_type::{MethodType, METHOD_TYPES};
pub use notification_config::NotificationConfig;
pub use severity::{SeverityType, SEVERITY_TYPES};
pub use smtp_account::SmtpAccount;
