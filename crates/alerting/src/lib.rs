//! Alerting data contracts for herald
//!
//! - Model: monitors with their schedules, alerts with error history and
//!   action throttling state, and the user a monitor runs as
//! - Action: the get-alerts response and the index-monitor request
//!
//! Records follow the same conventions as `herald-notifications`: a binary
//! form, a document form where one exists, and validation at construction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod model;

pub use action::{GetAlertsResponse, IndexMonitorRequest, RefreshPolicy, RestMethod};
pub use model::{
    ActionExecutionResult, Alert, AlertError, AlertFields, AlertState, Cron, IntervalUnit,
    Monitor, MonitorType, Period, Schedule, ScheduleKind, User,
};
