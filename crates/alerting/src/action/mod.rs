//! Alerting transport requests and responses

pub mod get_alerts;
pub mod index_monitor;

pub use get_alerts::GetAlertsResponse;
pub use index_monitor::{IndexMonitorRequest, RefreshPolicy, RestMethod, REFRESH_POLICIES, REST_METHODS};
