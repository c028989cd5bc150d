//! Monitor schedules
//!
//! A schedule is either a fixed [`Period`] or a [`Cron`] expression. The
//! document form is a single-member object keyed by the kind:
//!
//! ```json
//! {"period": {"interval": 1, "unit": "MINUTES"}}
//! {"cron": {"expression": "0 * * * *", "timezone": "UTC"}}
//! ```
//!
//! Unknown kinds and units are rejected.

use herald_core::dispatch::{TagRegistry, TaggedVariant, VariantCodec, VariantRegistry};
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::{require, require_non_empty};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{DocumentError, Result, ValidationError};
use serde_json::Value;
use std::fmt;

const INTERVAL_TAG: &str = "interval";
const UNIT_TAG: &str = "unit";
const EXPRESSION_TAG: &str = "expression";
const TIMEZONE_TAG: &str = "timezone";

/// Which kind of schedule a document or wire payload carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    /// Fixed interval
    Period,
    /// Cron expression
    Cron,
}

/// Tag resolver for [`ScheduleKind`]; unknown kinds are errors
pub static SCHEDULE_KINDS: TagRegistry<ScheduleKind> = TagRegistry::rejecting();

impl TaggedVariant for ScheduleKind {
    const FAMILY: &'static str = "Schedule";
    const ALL: &'static [Self] = &[ScheduleKind::Period, ScheduleKind::Cron];

    fn tag(self) -> &'static str {
        match self {
            ScheduleKind::Period => "period",
            ScheduleKind::Cron => "cron",
        }
    }
}

/// Unit of a [`Period`] interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Days
    Days,
}

/// Tag resolver for [`IntervalUnit`]; unknown units are errors
pub static INTERVAL_UNITS: TagRegistry<IntervalUnit> = TagRegistry::rejecting();

impl TaggedVariant for IntervalUnit {
    const FAMILY: &'static str = "IntervalUnit";
    const ALL: &'static [Self] = &[IntervalUnit::Minutes, IntervalUnit::Hours, IntervalUnit::Days];

    fn tag(self) -> &'static str {
        match self {
            IntervalUnit::Minutes => "MINUTES",
            IntervalUnit::Hours => "HOURS",
            IntervalUnit::Days => "DAYS",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Run every `interval` `unit`s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    interval: i32,
    unit: IntervalUnit,
}

impl Period {
    /// Create a period schedule; `interval` must be positive
    pub fn new(interval: i32, unit: IntervalUnit) -> std::result::Result<Self, ValidationError> {
        require(interval > 0, "Period", "interval must be a positive integer")?;
        Ok(Period { interval, unit })
    }

    /// Interval length
    pub fn interval(&self) -> i32 {
        self.interval
    }

    /// Interval unit
    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }
}

impl Writeable for Period {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_i32(self.interval);
        out.write_enum(self.unit);
    }
}

impl Readable for Period {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let interval = input.read_i32()?;
        let unit = input.read_enum()?;
        Ok(Period::new(interval, unit)?)
    }
}

impl ToDocument for Period {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(INTERVAL_TAG, self.interval)
            .field(UNIT_TAG, self.unit.tag())
            .build()
    }
}

impl FromDocument for Period {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut interval = None;
        let mut unit = None;
        parse_object(stream, "Period", |field, stream| {
            match field {
                INTERVAL_TAG => interval = Some(stream.i32_value()?),
                UNIT_TAG => unit = Some(INTERVAL_UNITS.resolve_current(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let interval = required(interval, "Period", INTERVAL_TAG)?;
        let unit = required(unit, "Period", UNIT_TAG)?;
        Ok(Period::new(interval, unit)?)
    }
}

/// Run on a cron expression evaluated in `timezone`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cron {
    expression: String,
    timezone: String,
}

impl Cron {
    /// Create a cron schedule
    ///
    /// The expression and zone id are carried verbatim; only emptiness is
    /// checked here.
    pub fn new(
        expression: impl Into<String>,
        timezone: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let expression = expression.into();
        let timezone = timezone.into();
        require_non_empty(&expression, "Cron", "expression")?;
        require_non_empty(&timezone, "Cron", "timezone")?;
        Ok(Cron {
            expression,
            timezone,
        })
    }

    /// Cron expression
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Zone id the expression is evaluated in
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

impl Writeable for Cron {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.expression);
        out.write_string(&self.timezone);
    }
}

impl Readable for Cron {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let expression = input.read_string()?;
        let timezone = input.read_string()?;
        Ok(Cron::new(expression, timezone)?)
    }
}

impl ToDocument for Cron {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(EXPRESSION_TAG, self.expression.as_str())
            .field(TIMEZONE_TAG, self.timezone.as_str())
            .build()
    }
}

impl FromDocument for Cron {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut expression = None;
        let mut timezone = None;
        parse_object(stream, "Cron", |field, stream| {
            match field {
                EXPRESSION_TAG => expression = Some(stream.text()?),
                TIMEZONE_TAG => timezone = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let expression = required(expression, "Cron", EXPRESSION_TAG)?;
        let timezone = required(timezone, "Cron", TIMEZONE_TAG)?;
        Ok(Cron::new(expression, timezone)?)
    }
}

/// When a monitor runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// Fixed interval
    Period(Period),
    /// Cron expression
    Cron(Cron),
}

static CODECS: [VariantCodec<ScheduleKind, Schedule>; 2] = [
    VariantCodec::of::<Period>(ScheduleKind::Period),
    VariantCodec::of::<Cron>(ScheduleKind::Cron),
];

/// Decoder table for [`Schedule`]
pub static SCHEDULES: VariantRegistry<ScheduleKind, Schedule> =
    VariantRegistry::new("Schedule", &CODECS);

impl Schedule {
    /// Kind of this schedule
    pub fn kind(&self) -> ScheduleKind {
        match self {
            Schedule::Period(_) => ScheduleKind::Period,
            Schedule::Cron(_) => ScheduleKind::Cron,
        }
    }
}

impl From<Period> for Schedule {
    fn from(period: Period) -> Self {
        Schedule::Period(period)
    }
}

impl From<Cron> for Schedule {
    fn from(cron: Cron) -> Self {
        Schedule::Cron(cron)
    }
}

impl Writeable for Schedule {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_enum(self.kind());
        match self {
            Schedule::Period(period) => period.write_to(out),
            Schedule::Cron(cron) => cron.write_to(out),
        }
    }
}

impl Readable for Schedule {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let kind = input.read_enum::<ScheduleKind>()?;
        SCHEDULES.read(kind, input)
    }
}

impl ToDocument for Schedule {
    fn to_document(&self) -> Value {
        let builder = DocumentBuilder::new();
        let builder = match self {
            Schedule::Period(period) => builder.object(ScheduleKind::Period.tag(), period),
            Schedule::Cron(cron) => builder.object(ScheduleKind::Cron.tag(), cron),
        };
        builder.build()
    }
}

impl FromDocument for Schedule {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut schedule: Option<Schedule> = None;
        parse_object(stream, "Schedule", |field, stream| {
            let kind = SCHEDULE_KINDS.resolve(field)?;
            if let Some(first) = &schedule {
                return Err(DocumentError::DuplicateVariant {
                    record: "Schedule",
                    first: first.kind().tag().to_string(),
                    second: kind.tag().to_string(),
                }
                .into());
            }
            schedule = Some(SCHEDULES.parse(kind, stream)?);
            Ok(FieldAction::Consumed)
        })?;
        Ok(required(schedule, "Schedule", "period")?)
    }
}
