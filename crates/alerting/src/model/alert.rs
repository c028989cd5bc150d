//! Alerts raised by monitor triggers

use super::user::User;
use chrono::{DateTime, Utc};
use herald_core::dispatch::{TagRegistry, TaggedVariant};
use herald_core::document::{
    millis_precision, object_list, optional_timestamp_millis, parse_object, required, string_list,
    timestamp_millis, DocumentBuilder, FieldAction, FromDocument, ToDocument, Token, TokenStream,
};
use herald_core::validation::require;
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;
use std::fmt;

const RECORD: &str = "Alert";

/// Id of an alert that has not been stored
pub const NO_ID: &str = "";
/// Version of an alert that has not been stored
pub const NO_VERSION: i64 = 1;

const ID_TAG: &str = "id";
const VERSION_TAG: &str = "version";
const SCHEMA_VERSION_TAG: &str = "schema_version";
const MONITOR_ID_TAG: &str = "monitor_id";
const MONITOR_VERSION_TAG: &str = "monitor_version";
const MONITOR_NAME_TAG: &str = "monitor_name";
const MONITOR_USER_TAG: &str = "monitor_user";
const TRIGGER_ID_TAG: &str = "trigger_id";
const TRIGGER_NAME_TAG: &str = "trigger_name";
const FINDING_IDS_TAG: &str = "finding_ids";
const RELATED_DOC_IDS_TAG: &str = "related_doc_ids";
const STATE_TAG: &str = "state";
const START_TIME_TAG: &str = "start_time";
const END_TIME_TAG: &str = "end_time";
const LAST_NOTIFICATION_TIME_TAG: &str = "last_notification_time";
const ACKNOWLEDGED_TIME_TAG: &str = "acknowledged_time";
const ERROR_MESSAGE_TAG: &str = "error_message";
const ALERT_HISTORY_TAG: &str = "alert_history";
const SEVERITY_TAG: &str = "severity";
const ACTION_EXECUTION_RESULTS_TAG: &str = "action_execution_results";

const TIMESTAMP_TAG: &str = "timestamp";
const MESSAGE_TAG: &str = "message";
const ACTION_ID_TAG: &str = "action_id";
const LAST_EXECUTION_TIME_TAG: &str = "last_execution_time";
const THROTTLED_COUNT_TAG: &str = "throttled_count";

/// Lifecycle state of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertState {
    /// Trigger condition currently holds
    #[default]
    Active,
    /// A user acknowledged the alert
    Acknowledged,
    /// Trigger condition no longer holds
    Completed,
    /// Monitor or trigger evaluation failed
    Error,
    /// Monitor or trigger was removed
    Deleted,
}

/// Tag resolver for [`AlertState`]; unknown states are errors
pub static ALERT_STATES: TagRegistry<AlertState> = TagRegistry::rejecting();

impl TaggedVariant for AlertState {
    const FAMILY: &'static str = "AlertState";
    const ALL: &'static [Self] = &[
        AlertState::Active,
        AlertState::Acknowledged,
        AlertState::Completed,
        AlertState::Error,
        AlertState::Deleted,
    ];

    fn tag(self) -> &'static str {
        match self {
            AlertState::Active => "ACTIVE",
            AlertState::Acknowledged => "ACKNOWLEDGED",
            AlertState::Completed => "COMPLETED",
            AlertState::Error => "ERROR",
            AlertState::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of an alert's error history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertError {
    timestamp: DateTime<Utc>,
    message: String,
}

impl AlertError {
    /// Create a history entry, dropping sub-millisecond precision
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        AlertError {
            timestamp: millis_precision(timestamp),
            message: message.into(),
        }
    }

    /// When the error occurred
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    /// Error text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Writeable for AlertError {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_timestamp(&self.timestamp);
        out.write_string(&self.message);
    }
}

impl Readable for AlertError {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let timestamp = input.read_timestamp()?;
        let message = input.read_string()?;
        Ok(AlertError::new(timestamp, message))
    }
}

impl ToDocument for AlertError {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .timestamp_millis(TIMESTAMP_TAG, &self.timestamp)
            .field(MESSAGE_TAG, self.message.as_str())
            .build()
    }
}

impl FromDocument for AlertError {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut timestamp = None;
        let mut message = None;
        parse_object(stream, "AlertError", |field, stream| {
            match field {
                TIMESTAMP_TAG => timestamp = Some(timestamp_millis(stream)?),
                MESSAGE_TAG => message = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        Ok(AlertError::new(
            required(timestamp, "AlertError", TIMESTAMP_TAG)?,
            required(message, "AlertError", MESSAGE_TAG)?,
        ))
    }
}

/// Throttling bookkeeping for one trigger action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionExecutionResult {
    action_id: String,
    last_execution_time: Option<DateTime<Utc>>,
    throttled_count: i32,
}

impl ActionExecutionResult {
    /// Create a result, dropping sub-millisecond precision
    pub fn new(
        action_id: impl Into<String>,
        last_execution_time: Option<DateTime<Utc>>,
        throttled_count: i32,
    ) -> Self {
        ActionExecutionResult {
            action_id: action_id.into(),
            last_execution_time: last_execution_time.map(millis_precision),
            throttled_count,
        }
    }

    /// Action id
    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    /// Last time the action ran
    pub fn last_execution_time(&self) -> Option<&DateTime<Utc>> {
        self.last_execution_time.as_ref()
    }

    /// Runs skipped by throttling
    pub fn throttled_count(&self) -> i32 {
        self.throttled_count
    }
}

impl Writeable for ActionExecutionResult {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.action_id);
        out.write_optional_timestamp(self.last_execution_time.as_ref());
        out.write_i32(self.throttled_count);
    }
}

impl Readable for ActionExecutionResult {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let action_id = input.read_string()?;
        let last_execution_time = input.read_optional_timestamp()?;
        let throttled_count = input.read_i32()?;
        Ok(ActionExecutionResult::new(
            action_id,
            last_execution_time,
            throttled_count,
        ))
    }
}

impl ToDocument for ActionExecutionResult {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(ACTION_ID_TAG, self.action_id.as_str())
            .timestamp_millis_if_some(LAST_EXECUTION_TIME_TAG, self.last_execution_time.as_ref())
            .field(THROTTLED_COUNT_TAG, self.throttled_count)
            .build()
    }
}

impl FromDocument for ActionExecutionResult {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut action_id = None;
        let mut last_execution_time = None;
        let mut throttled_count = 0;
        parse_object(stream, "ActionExecutionResult", |field, stream| {
            match field {
                ACTION_ID_TAG => action_id = Some(stream.text()?),
                LAST_EXECUTION_TIME_TAG => {
                    last_execution_time = optional_timestamp_millis(stream)?
                }
                THROTTLED_COUNT_TAG => throttled_count = stream.i32_value()?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        Ok(ActionExecutionResult::new(
            required(action_id, "ActionExecutionResult", ACTION_ID_TAG)?,
            last_execution_time,
            throttled_count,
        ))
    }
}

/// Everything an [`Alert`] is built from
///
/// Fill in the fields and hand it to [`Alert::new`], which checks them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertFields {
    /// Stored document id
    pub id: String,
    /// Stored document version
    pub version: i64,
    /// Document schema version
    pub schema_version: i32,
    /// Monitor that raised the alert
    pub monitor_id: String,
    /// Monitor display name
    pub monitor_name: String,
    /// Monitor version at the time the alert was raised
    pub monitor_version: i64,
    /// User the monitor ran as
    pub monitor_user: Option<User>,
    /// Trigger that fired
    pub trigger_id: String,
    /// Trigger display name
    pub trigger_name: String,
    /// Findings behind the alert
    pub finding_ids: Vec<String>,
    /// Source documents behind the alert
    pub related_doc_ids: Vec<String>,
    /// Lifecycle state
    pub state: AlertState,
    /// When the alert was raised
    pub start_time: DateTime<Utc>,
    /// When the alert ended
    pub end_time: Option<DateTime<Utc>>,
    /// Last notification sent for the alert
    pub last_notification_time: Option<DateTime<Utc>>,
    /// When the alert was acknowledged
    pub acknowledged_time: Option<DateTime<Utc>>,
    /// Current error, only in `ERROR` or `DELETED` state
    pub error_message: Option<String>,
    /// Earlier errors
    pub error_history: Vec<AlertError>,
    /// Trigger severity
    pub severity: String,
    /// Per-action throttling state
    pub action_execution_results: Vec<ActionExecutionResult>,
}

/// An alert raised by a monitor trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    fields: AlertFields,
}

impl Alert {
    /// Create an alert
    ///
    /// Times are kept to millisecond precision, the resolution of the
    /// document form.
    pub fn new(mut fields: AlertFields) -> std::result::Result<Self, ValidationError> {
        if fields.error_message.is_some() {
            require(
                matches!(fields.state, AlertState::Error | AlertState::Deleted),
                RECORD,
                format!("Attempt to create an alert with an error in state: {}", fields.state),
            )?;
        }
        fields.start_time = millis_precision(fields.start_time);
        fields.end_time = fields.end_time.map(millis_precision);
        fields.last_notification_time = fields.last_notification_time.map(millis_precision);
        fields.acknowledged_time = fields.acknowledged_time.map(millis_precision);
        Ok(Alert { fields })
    }

    /// The fields this alert was built from
    pub fn into_fields(self) -> AlertFields {
        self.fields
    }

    /// Stored document id
    pub fn id(&self) -> &str {
        &self.fields.id
    }

    /// Stored document version
    pub fn version(&self) -> i64 {
        self.fields.version
    }

    /// Document schema version
    pub fn schema_version(&self) -> i32 {
        self.fields.schema_version
    }

    /// Monitor that raised the alert
    pub fn monitor_id(&self) -> &str {
        &self.fields.monitor_id
    }

    /// Monitor display name
    pub fn monitor_name(&self) -> &str {
        &self.fields.monitor_name
    }

    /// Monitor version at the time the alert was raised
    pub fn monitor_version(&self) -> i64 {
        self.fields.monitor_version
    }

    /// User the monitor ran as
    pub fn monitor_user(&self) -> Option<&User> {
        self.fields.monitor_user.as_ref()
    }

    /// Trigger that fired
    pub fn trigger_id(&self) -> &str {
        &self.fields.trigger_id
    }

    /// Trigger display name
    pub fn trigger_name(&self) -> &str {
        &self.fields.trigger_name
    }

    /// Findings behind the alert
    pub fn finding_ids(&self) -> &[String] {
        &self.fields.finding_ids
    }

    /// Source documents behind the alert
    pub fn related_doc_ids(&self) -> &[String] {
        &self.fields.related_doc_ids
    }

    /// Lifecycle state
    pub fn state(&self) -> AlertState {
        self.fields.state
    }

    /// When the alert was raised
    pub fn start_time(&self) -> &DateTime<Utc> {
        &self.fields.start_time
    }

    /// When the alert ended
    pub fn end_time(&self) -> Option<&DateTime<Utc>> {
        self.fields.end_time.as_ref()
    }

    /// Last notification sent for the alert
    pub fn last_notification_time(&self) -> Option<&DateTime<Utc>> {
        self.fields.last_notification_time.as_ref()
    }

    /// When the alert was acknowledged
    pub fn acknowledged_time(&self) -> Option<&DateTime<Utc>> {
        self.fields.acknowledged_time.as_ref()
    }

    /// Current error
    pub fn error_message(&self) -> Option<&str> {
        self.fields.error_message.as_deref()
    }

    /// Earlier errors
    pub fn error_history(&self) -> &[AlertError] {
        &self.fields.error_history
    }

    /// Trigger severity
    pub fn severity(&self) -> &str {
        &self.fields.severity
    }

    /// Per-action throttling state
    pub fn action_execution_results(&self) -> &[ActionExecutionResult] {
        &self.fields.action_execution_results
    }
}

impl Writeable for Alert {
    fn write_to(&self, out: &mut WireOutput) {
        let f = &self.fields;
        out.write_string(&f.id);
        out.write_i64(f.version);
        out.write_i32(f.schema_version);
        out.write_string(&f.monitor_id);
        out.write_string(&f.monitor_name);
        out.write_i64(f.monitor_version);
        out.write_optional(f.monitor_user.as_ref());
        out.write_string(&f.trigger_id);
        out.write_string(&f.trigger_name);
        out.write_string_list(&f.finding_ids);
        out.write_string_list(&f.related_doc_ids);
        out.write_enum(f.state);
        out.write_timestamp(&f.start_time);
        out.write_optional_timestamp(f.end_time.as_ref());
        out.write_optional_timestamp(f.last_notification_time.as_ref());
        out.write_optional_timestamp(f.acknowledged_time.as_ref());
        out.write_optional_string(f.error_message.as_deref());
        out.write_list(&f.error_history);
        out.write_string(&f.severity);
        out.write_list(&f.action_execution_results);
    }
}

impl Readable for Alert {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let fields = AlertFields {
            id: input.read_string()?,
            version: input.read_i64()?,
            schema_version: input.read_i32()?,
            monitor_id: input.read_string()?,
            monitor_name: input.read_string()?,
            monitor_version: input.read_i64()?,
            monitor_user: input.read_optional()?,
            trigger_id: input.read_string()?,
            trigger_name: input.read_string()?,
            finding_ids: input.read_string_list()?,
            related_doc_ids: input.read_string_list()?,
            state: input.read_enum()?,
            start_time: input.read_timestamp()?,
            end_time: input.read_optional_timestamp()?,
            last_notification_time: input.read_optional_timestamp()?,
            acknowledged_time: input.read_optional_timestamp()?,
            error_message: input.read_optional_string()?,
            error_history: input.read_list()?,
            severity: input.read_string()?,
            action_execution_results: input.read_list()?,
        };
        Ok(Alert::new(fields)?)
    }
}

impl ToDocument for Alert {
    fn to_document(&self) -> Value {
        let f = &self.fields;
        DocumentBuilder::new()
            .field(ID_TAG, f.id.as_str())
            .field(VERSION_TAG, f.version)
            .field(MONITOR_ID_TAG, f.monitor_id.as_str())
            .field(SCHEMA_VERSION_TAG, f.schema_version)
            .field(MONITOR_VERSION_TAG, f.monitor_version)
            .field(MONITOR_NAME_TAG, f.monitor_name.as_str())
            .object_if_some(MONITOR_USER_TAG, f.monitor_user.as_ref())
            .field(TRIGGER_ID_TAG, f.trigger_id.as_str())
            .field(TRIGGER_NAME_TAG, f.trigger_name.as_str())
            .string_list(FINDING_IDS_TAG, &f.finding_ids)
            .string_list(RELATED_DOC_IDS_TAG, &f.related_doc_ids)
            .field(STATE_TAG, f.state.tag())
            .field_if_some(ERROR_MESSAGE_TAG, f.error_message.as_deref())
            .object_list(ALERT_HISTORY_TAG, &f.error_history)
            .field(SEVERITY_TAG, f.severity.as_str())
            .object_list(ACTION_EXECUTION_RESULTS_TAG, &f.action_execution_results)
            .timestamp_millis(START_TIME_TAG, &f.start_time)
            .timestamp_millis_if_some(LAST_NOTIFICATION_TIME_TAG, f.last_notification_time.as_ref())
            .timestamp_millis_if_some(END_TIME_TAG, f.end_time.as_ref())
            .timestamp_millis_if_some(ACKNOWLEDGED_TIME_TAG, f.acknowledged_time.as_ref())
            .build()
    }
}

impl FromDocument for Alert {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut id = NO_ID.to_string();
        let mut version = NO_VERSION;
        let mut schema_version = 0;
        let mut monitor_id = None;
        let mut monitor_name = None;
        let mut monitor_version = NO_VERSION;
        let mut monitor_user = None;
        let mut trigger_id = None;
        let mut trigger_name = None;
        let mut finding_ids = Vec::new();
        let mut related_doc_ids = Vec::new();
        let mut state = None;
        let mut start_time = None;
        let mut end_time = None;
        let mut last_notification_time = None;
        let mut acknowledged_time = None;
        let mut error_message = None;
        let mut error_history = Vec::new();
        let mut severity = None;
        let mut action_execution_results = Vec::new();
        parse_object(stream, RECORD, |field, stream| {
            match field {
                ID_TAG => id = stream.text()?,
                VERSION_TAG => version = stream.i64_value()?,
                SCHEMA_VERSION_TAG => schema_version = stream.i32_value()?,
                MONITOR_ID_TAG => monitor_id = Some(stream.text()?),
                MONITOR_NAME_TAG => monitor_name = Some(stream.text()?),
                MONITOR_VERSION_TAG => monitor_version = stream.i64_value()?,
                MONITOR_USER_TAG => {
                    monitor_user = match stream.current_token() {
                        Some(Token::Null) => None,
                        _ => Some(User::parse(stream)?),
                    }
                }
                TRIGGER_ID_TAG => trigger_id = Some(stream.text()?),
                TRIGGER_NAME_TAG => trigger_name = Some(stream.text()?),
                FINDING_IDS_TAG => finding_ids = string_list(stream)?,
                RELATED_DOC_IDS_TAG => related_doc_ids = string_list(stream)?,
                STATE_TAG => state = Some(ALERT_STATES.resolve_current(stream)?),
                START_TIME_TAG => start_time = Some(timestamp_millis(stream)?),
                END_TIME_TAG => end_time = optional_timestamp_millis(stream)?,
                LAST_NOTIFICATION_TIME_TAG => {
                    last_notification_time = optional_timestamp_millis(stream)?
                }
                ACKNOWLEDGED_TIME_TAG => acknowledged_time = optional_timestamp_millis(stream)?,
                ERROR_MESSAGE_TAG => error_message = stream.text_or_null()?,
                ALERT_HISTORY_TAG => error_history = object_list(stream, AlertError::parse)?,
                SEVERITY_TAG => severity = Some(stream.text()?),
                ACTION_EXECUTION_RESULTS_TAG => {
                    action_execution_results = object_list(stream, ActionExecutionResult::parse)?
                }
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let fields = AlertFields {
            id,
            version,
            schema_version,
            monitor_id: required(monitor_id, RECORD, MONITOR_ID_TAG)?,
            monitor_name: required(monitor_name, RECORD, MONITOR_NAME_TAG)?,
            monitor_version,
            monitor_user,
            trigger_id: required(trigger_id, RECORD, TRIGGER_ID_TAG)?,
            trigger_name: required(trigger_name, RECORD, TRIGGER_NAME_TAG)?,
            finding_ids,
            related_doc_ids,
            state: required(state, RECORD, STATE_TAG)?,
            start_time: required(start_time, RECORD, START_TIME_TAG)?,
            end_time,
            last_notification_time,
            acknowledged_time,
            error_message,
            error_history,
            severity: required(severity, RECORD, SEVERITY_TAG)?,
            action_execution_results,
        };
        Ok(Alert::new(fields)?)
    }
}
