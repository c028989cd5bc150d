//! Error types for herald records
//!
//! Two tiers exist:
//! - **Structural** errors come out of the codecs: [`WireError`] for the binary
//!   form and [`DocumentError`] for the document form.
//! - **Semantic** errors come out of record constructors: [`ValidationError`].
//!
//! Both tiers surface through the single [`Error`] type so that decode paths
//! (which rerun constructors) have one failure channel. Decode is
//! all-or-nothing: no partial record is ever returned.
//!
//! [`RequestValidationErrors`] is separate. It is the value a request hands
//! back from `validate()` before the host dispatches it, and is never raised
//! during construction.

use std::fmt;
use thiserror::Error;

/// Result type alias for herald operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for encode/decode/construct operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Binary wire form could not be read
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// Document form could not be read
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Record invariant violated at construction
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True for codec-level failures (binary or document)
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Wire(_) | Error::Document(_))
    }

    /// True for construction-time invariant failures
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Binary wire decode errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Input ended before a value could be read
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// String bytes were not UTF-8
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    /// Variable-length integer ran past 5 bytes
    #[error("malformed variable-length integer")]
    MalformedVarInt,

    /// Enum ordinal has no variant in its family
    #[error("unknown ordinal {ordinal} for {family}")]
    UnknownOrdinal {
        /// Enum family name
        family: &'static str,
        /// Ordinal read from the wire
        ordinal: u32,
    },

    /// Presence/boolean byte was neither 0 nor 1
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBoolean(u8),

    /// Timestamp components out of range
    #[error("invalid timestamp: {seconds}s + {nanos}ns")]
    InvalidTimestamp {
        /// Epoch seconds read
        seconds: i64,
        /// Nanosecond adjustment read
        nanos: i32,
    },

    /// Length or count prefix exceeds configured limits
    #[error("{what} {actual} exceeds maximum of {max}")]
    LimitExceeded {
        /// Which limit tripped
        what: &'static str,
        /// Value read from the wire
        actual: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Document decode errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Input is not well-formed JSON
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Token stream held something other than what the parser expected
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// Expected token kind
        expected: &'static str,
        /// Token kind actually found
        found: String,
    },

    /// Required field absent after the object was scanned
    #[error("{field} field absent while parsing {record}")]
    MissingField {
        /// Record being parsed
        record: &'static str,
        /// Missing field tag
        field: &'static str,
    },

    /// Field present but its value is unusable
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field tag
        field: String,
        /// What was wrong
        reason: String,
    },

    /// Discriminator tag not registered in a family that rejects unknown tags
    #[error("unknown {family} tag '{tag}'")]
    UnknownTag {
        /// Family name
        family: &'static str,
        /// Tag read from the document
        tag: String,
    },

    /// More than one variant payload appeared in one record
    #[error("{record} carries both '{first}' and '{second}' payloads")]
    DuplicateVariant {
        /// Record being parsed
        record: &'static str,
        /// First payload tag seen
        first: String,
        /// Second payload tag seen
        second: String,
    },

    /// Input exceeds configured limits
    #[error("{what} {actual} exceeds maximum of {max}")]
    LimitExceeded {
        /// Which limit tripped
        what: &'static str,
        /// Observed size
        actual: usize,
        /// Configured maximum
        max: usize,
    },
}

impl DocumentError {
    /// Create an invalid-value error for a field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DocumentError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Construction-time invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}: {message}")]
pub struct ValidationError {
    /// Record type that refused construction
    pub record: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a record
    pub fn new(record: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            record,
            message: message.into(),
        }
    }
}

/// Aggregated pre-dispatch validation failures for a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValidationErrors {
    errors: Vec<String>,
}

impl RequestValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to an optional accumulator, creating it if needed
    pub fn add(acc: Option<Self>, message: impl Into<String>) -> Option<Self> {
        let mut errors = acc.unwrap_or_default();
        errors.errors.push(message.into());
        Some(errors)
    }

    /// Messages in the order they were added
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True if no messages were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for RequestValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation Failed: ")?;
        for (index, message) in self.errors.iter().enumerate() {
            write!(f, "{}: {};", index + 1, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_tag() {
        let err = DocumentError::MissingField {
            record: "SmtpAccount",
            field: "host",
        };
        let msg = err.to_string();
        assert!(msg.contains("host field absent"));
        assert!(msg.contains("SmtpAccount"));
    }

    #[test]
    fn test_error_tiers() {
        let wire: Error = WireError::InvalidUtf8.into();
        let doc: Error = DocumentError::Syntax("eof".to_string()).into();
        let invalid: Error = ValidationError::new("Slack", "bad url").into();

        assert!(wire.is_structural());
        assert!(doc.is_structural());
        assert!(!invalid.is_structural());
        assert!(invalid.is_validation());
        assert!(invalid.to_string().contains("Slack: bad url"));
    }

    #[test]
    fn test_unexpected_eof_display() {
        let err = WireError::UnexpectedEof {
            needed: 4,
            remaining: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("needed 4"));
        assert!(msg.contains("1 remaining"));
    }

    #[test]
    fn test_request_validation_errors_accumulate() {
        let acc = RequestValidationErrors::add(None, "configId is null or empty");
        let acc = RequestValidationErrors::add(acc, "name is empty").unwrap();

        assert_eq!(acc.errors().len(), 2);
        assert_eq!(
            acc.to_string(),
            "Validation Failed: 1: configId is null or empty;2: name is empty;"
        );
    }
}
