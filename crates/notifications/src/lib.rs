//! Notification data contracts for herald
//!
//! - Model: channel configurations (Slack, Chime, Teams, webhook, email, SNS,
//!   SES, SMTP, email groups), events and delivery statuses
//! - Action: config create/update and send-notification requests with their
//!   responses
//!
//! Every record has a binary form ([`Writeable`](herald_core::Writeable) /
//! [`Readable`](herald_core::Readable)) and a document form
//! ([`ToDocument`](herald_core::ToDocument) /
//! [`FromDocument`](herald_core::FromDocument)), and is validated when built.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod constants;
pub mod model;

pub use action::{
    CreateNotificationConfigRequest, CreateNotificationConfigResponse, SendNotificationRequest,
    UpdateNotificationConfigRequest, UpdateNotificationConfigResponse,
};
pub use model::{
    Attachment, ChannelMessage, Chime, ConfigData, ConfigType, DeliveryStatus, Email, EmailGroup,
    EmailRecipient, EmailRecipientStatus, EventSource, EventStatus, HttpMethodType, MethodType,
    MicrosoftTeams, NotificationConfig, SesAccount, SeverityType, Slack, SmtpAccount, Sns,
    Webhook,
};
