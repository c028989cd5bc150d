//! Monitor definitions
//!
//! Stored monitor documents keep `id` and `version` on their envelope as
//! well as in the body. [`Monitor::parse_with_id`] takes the envelope's
//! values over the body's; the plain [`FromDocument`] impl reads the body
//! and falls back to [`NO_ID`] and [`NO_VERSION`].

use super::schedule::Schedule;
use super::user::User;
use chrono::{DateTime, Utc};
use herald_core::dispatch::{TagRegistry, TaggedVariant};
use herald_core::document::{
    millis_precision, optional_timestamp_millis, parse_object, required, timestamp_millis,
    DocumentBuilder, FieldAction, FromDocument, ToDocument, Token, TokenStream,
};
use herald_core::validation::{require, require_non_empty};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;
use std::fmt;
use tracing::debug;

const RECORD: &str = "Monitor";

/// Id of a monitor that has not been stored
pub const NO_ID: &str = "";
/// Version of a monitor that has not been stored
pub const NO_VERSION: i64 = 1;
/// Value of the `type` member in every monitor document
pub const MONITOR_DOC_TYPE: &str = "monitor";

const TYPE_TAG: &str = "type";
const ID_TAG: &str = "id";
const VERSION_TAG: &str = "version";
const SCHEMA_VERSION_TAG: &str = "schema_version";
const NAME_TAG: &str = "name";
const MONITOR_TYPE_TAG: &str = "monitor_type";
const USER_TAG: &str = "user";
const ENABLED_TAG: &str = "enabled";
const ENABLED_TIME_TAG: &str = "enabled_time";
const SCHEDULE_TAG: &str = "schedule";
const LAST_UPDATE_TIME_TAG: &str = "last_update_time";

/// What a monitor evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorType {
    /// Runs a query and triggers on its result
    QueryLevel,
    /// Triggers per aggregation bucket
    BucketLevel,
    /// Triggers per matching document
    DocLevel,
}

/// Tag resolver for [`MonitorType`]; unknown types are errors
pub static MONITOR_TYPES: TagRegistry<MonitorType> = TagRegistry::rejecting();

impl TaggedVariant for MonitorType {
    const FAMILY: &'static str = "MonitorType";
    const ALL: &'static [Self] = &[
        MonitorType::QueryLevel,
        MonitorType::BucketLevel,
        MonitorType::DocLevel,
    ];

    fn tag(self) -> &'static str {
        match self {
            MonitorType::QueryLevel => "query_level_monitor",
            MonitorType::BucketLevel => "bucket_level_monitor",
            MonitorType::DocLevel => "doc_level_monitor",
        }
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A scheduled check
///
/// An enabled monitor always has an enabled time and a disabled one never
/// does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    id: String,
    version: i64,
    schema_version: i32,
    name: String,
    monitor_type: MonitorType,
    enabled: bool,
    schedule: Schedule,
    last_update_time: DateTime<Utc>,
    enabled_time: Option<DateTime<Utc>>,
    user: Option<User>,
}

impl Monitor {
    /// Create a monitor
    ///
    /// Times are kept to millisecond precision, the resolution of the
    /// document form.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        version: i64,
        schema_version: i32,
        name: impl Into<String>,
        monitor_type: MonitorType,
        enabled: bool,
        schedule: Schedule,
        last_update_time: DateTime<Utc>,
        enabled_time: Option<DateTime<Utc>>,
        user: Option<User>,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        require_non_empty(&name, RECORD, "name")?;
        if enabled {
            require(enabled_time.is_some(), RECORD, "Enabled time must be present if the monitor is enabled")?;
        } else {
            require(enabled_time.is_none(), RECORD, "Enabled time must be absent if the monitor is disabled")?;
        }
        Ok(Monitor {
            id: id.into(),
            version,
            schema_version,
            name,
            monitor_type,
            enabled,
            schedule,
            last_update_time: millis_precision(last_update_time),
            enabled_time: enabled_time.map(millis_precision),
            user,
        })
    }

    /// Parse a stored monitor document, supplying the envelope's id and version
    pub fn parse_with_id(stream: &mut TokenStream, id: &str, version: i64) -> Result<Self> {
        Monitor::parse_document(stream, Some((id, version)))
    }

    fn parse_document(stream: &mut TokenStream, envelope: Option<(&str, i64)>) -> Result<Self> {
        let mut body_id = None;
        let mut body_version = None;
        let mut schema_version = 0;
        let mut name = None;
        let mut monitor_type = None;
        let mut user = None;
        let mut enabled = true;
        let mut enabled_time = None;
        let mut schedule = None;
        let mut last_update_time = None;
        parse_object(stream, RECORD, |field, stream| {
            match field {
                TYPE_TAG => {
                    let doc_type = stream.text()?;
                    if doc_type != MONITOR_DOC_TYPE {
                        debug!(target: "herald::document", record = RECORD, doc_type = %doc_type, "Unexpected document type");
                    }
                }
                ID_TAG => body_id = Some(stream.text()?),
                VERSION_TAG => body_version = Some(stream.i64_value()?),
                SCHEMA_VERSION_TAG => schema_version = stream.i32_value()?,
                NAME_TAG => name = Some(stream.text()?),
                MONITOR_TYPE_TAG => monitor_type = Some(MONITOR_TYPES.resolve_current(stream)?),
                USER_TAG => user = parse_optional_user(stream)?,
                ENABLED_TAG => enabled = stream.bool_value()?,
                ENABLED_TIME_TAG => enabled_time = optional_timestamp_millis(stream)?,
                SCHEDULE_TAG => schedule = Some(Schedule::parse(stream)?),
                LAST_UPDATE_TIME_TAG => last_update_time = Some(timestamp_millis(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let (id, version) = match envelope {
            Some((id, version)) => (id.to_string(), version),
            None => (
                body_id.unwrap_or_else(|| NO_ID.to_string()),
                body_version.unwrap_or(NO_VERSION),
            ),
        };
        Ok(Monitor::new(
            id,
            version,
            schema_version,
            required(name, RECORD, NAME_TAG)?,
            required(monitor_type, RECORD, MONITOR_TYPE_TAG)?,
            enabled,
            required(schedule, RECORD, SCHEDULE_TAG)?,
            required(last_update_time, RECORD, LAST_UPDATE_TIME_TAG)?,
            enabled_time,
            user,
        )?)
    }

    /// Stored document id, [`NO_ID`] before indexing
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stored document version
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Document schema version
    pub fn schema_version(&self) -> i32 {
        self.schema_version
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the monitor evaluates
    pub fn monitor_type(&self) -> MonitorType {
        self.monitor_type
    }

    /// Whether the monitor is scheduled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// When the monitor runs
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Last modification time
    pub fn last_update_time(&self) -> &DateTime<Utc> {
        &self.last_update_time
    }

    /// When the monitor was enabled
    pub fn enabled_time(&self) -> Option<&DateTime<Utc>> {
        self.enabled_time.as_ref()
    }

    /// User the monitor runs as
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

// `user` may be an explicit null in stored documents.
fn parse_optional_user(stream: &mut TokenStream) -> Result<Option<User>> {
    match stream.current_token() {
        Some(Token::Null) => Ok(None),
        _ => User::parse(stream).map(Some),
    }
}

impl Writeable for Monitor {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.id);
        out.write_i64(self.version);
        out.write_i32(self.schema_version);
        out.write_string(&self.name);
        out.write_enum(self.monitor_type);
        out.write_bool(self.enabled);
        self.schedule.write_to(out);
        out.write_timestamp(&self.last_update_time);
        out.write_optional_timestamp(self.enabled_time.as_ref());
        out.write_optional(self.user.as_ref());
    }
}

impl Readable for Monitor {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let id = input.read_string()?;
        let version = input.read_i64()?;
        let schema_version = input.read_i32()?;
        let name = input.read_string()?;
        let monitor_type = input.read_enum()?;
        let enabled = input.read_bool()?;
        let schedule = Schedule::read_from(input)?;
        let last_update_time = input.read_timestamp()?;
        let enabled_time = input.read_optional_timestamp()?;
        let user = input.read_optional()?;
        Ok(Monitor::new(
            id,
            version,
            schema_version,
            name,
            monitor_type,
            enabled,
            schedule,
            last_update_time,
            enabled_time,
            user,
        )?)
    }
}

impl ToDocument for Monitor {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(TYPE_TAG, MONITOR_DOC_TYPE)
            .field(ID_TAG, self.id.as_str())
            .field(VERSION_TAG, self.version)
            .field(SCHEMA_VERSION_TAG, self.schema_version)
            .field(NAME_TAG, self.name.as_str())
            .field(MONITOR_TYPE_TAG, self.monitor_type.tag())
            .object_if_some(USER_TAG, self.user.as_ref())
            .field(ENABLED_TAG, self.enabled)
            .timestamp_millis_if_some(ENABLED_TIME_TAG, self.enabled_time.as_ref())
            .object(SCHEDULE_TAG, &self.schedule)
            .timestamp_millis(LAST_UPDATE_TIME_TAG, &self.last_update_time)
            .build()
    }
}

impl FromDocument for Monitor {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        Monitor::parse_document(stream, None)
    }
}
