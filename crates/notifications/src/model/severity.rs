//! Event severity
//!
//! Unknown tags resolve to [`SeverityType::None`].

use herald_core::dispatch::{TagRegistry, TaggedVariant};
use std::fmt;

/// Severity attached to an event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeverityType {
    /// Unrecognized severity
    None,
    /// High
    High,
    /// Informational
    #[default]
    Info,
    /// Critical
    Critical,
}

/// Tag resolver for [`SeverityType`], falling back to [`SeverityType::None`]
pub static SEVERITY_TYPES: TagRegistry<SeverityType> =
    TagRegistry::with_fallback(SeverityType::None);

impl TaggedVariant for SeverityType {
    const FAMILY: &'static str = "SeverityType";
    const ALL: &'static [Self] = &[
        SeverityType::None,
        SeverityType::High,
        SeverityType::Info,
        SeverityType::Critical,
    ];

    fn tag(self) -> &'static str {
        match self {
            SeverityType::None => "none",
            SeverityType::High => "high",
            SeverityType::Info => "info",
            SeverityType::Critical => "critical",
        }
    }
}

impl fmt::Display for SeverityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
