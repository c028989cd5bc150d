//! Herald - typed data contracts for notification and alerting plugins
//!
//! Every record has two encodings: a positional binary form for node-to-node
//! transport and a JSON document form for REST bodies and stored documents.
//! Records are validated when they are built, whichever codec builds them.
//!
//! # Quick Start
//!
//! ```ignore
//! use herald::document::{from_json_str, to_json_string};
//! use herald::notifications::{ConfigType, NotificationConfig, Slack};
//!
//! let slack = Slack::new("https://hooks.slack.com/services/T000/B000/XXX")?;
//! let config = NotificationConfig::from_data("ops", "", slack)?;
//!
//! let text = to_json_string(&config);
//! let parsed: NotificationConfig = from_json_str(&text)?;
//! assert_eq!(parsed.config_type(), ConfigType::Slack);
//! ```
//!
//! # Layout
//!
//! - [`herald_core`] provides the codecs, errors, limits and dispatch tables
//! - [`notifications`] holds channel configs and notification requests
//! - [`alerting`] holds monitors, alerts and alerting requests

pub use herald_core::*;

/// Notification channel contracts
pub use herald_notifications as notifications;

/// Monitor and alert contracts
pub use herald_alerting as alerting;
