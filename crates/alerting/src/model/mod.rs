//! Alerting records
//!
//! - [`Monitor`]: a scheduled check and the [`Schedule`] it runs on
//! - [`Alert`]: raised when a monitor trigger fires, with its error history
//!   and per-action throttling state
//! - [`User`]: the identity a monitor runs as

pub mod alert;
pub mod monitor;
pub mod schedule;
pub mod user;

pub use alert::{ActionExecutionResult, Alert, AlertError, AlertFields, AlertState, ALERT_STATES};
pub use monitor::{Monitor, MonitorType, MONITOR_TYPES};
pub use schedule::{
    Cron, IntervalUnit, Period, Schedule, ScheduleKind, INTERVAL_UNITS, SCHEDULES, SCHEDULE_KINDS,
};
pub use user::User;
