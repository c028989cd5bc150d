//! Requests and responses exchanged with the notification host
//!
//! Every request implements [`ActionRequest`](herald_core::ActionRequest) so
//! the host can check it before dispatch.

mod config_response;
mod create_config;
mod send_notification;
mod update_config;

pub use config_response::{CreateNotificationConfigResponse, UpdateNotificationConfigResponse};
pub use create_config::CreateNotificationConfigRequest;
pub use send_notification::SendNotificationRequest;
pub use update_config::UpdateNotificationConfigRequest;
