//! Size limits for decoding
//!
//! Both codecs read untrusted input. Every length prefix, collection count,
//! document size and nesting level is checked against [`Limits`] before
//! anything is allocated. Violations surface as `LimitExceeded` errors from
//! the codec that tripped them.
//!
//! ## Contract
//!
//! The default limits are FROZEN. Hosts that need tighter bounds load their
//! own from TOML:
//!
//! ```
//! use herald_core::Limits;
//!
//! let limits = Limits::from_toml_str("max_collection_len = 500").unwrap();
//! assert_eq!(limits.max_collection_len, 500);
//! assert_eq!(limits.max_nesting_depth, Limits::default().max_nesting_depth);
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Decode limits
///
/// Missing keys in a TOML source fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum string length in bytes (default: 16MB)
    pub max_string_bytes: usize,

    /// Maximum elements in a list or entries in a map (default: 1M)
    pub max_collection_len: usize,

    /// Maximum object/array nesting depth in a document (default: 64)
    pub max_nesting_depth: usize,

    /// Maximum document text size in bytes (default: 16MB)
    pub max_document_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_string_bytes: 16 * 1024 * 1024, // 16MB
            max_collection_len: 1_000_000,
            max_nesting_depth: 64,
            max_document_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_string_bytes: 64,
            max_collection_len: 8,
            max_nesting_depth: 4,
            max_document_bytes: 1024,
        }
    }

    /// Parse limits from a TOML table
    pub fn from_toml_str(source: &str) -> Result<Self, LimitsConfigError> {
        let limits: Limits =
            toml::from_str(source).map_err(|e| LimitsConfigError::Parse(e.to_string()))?;
        limits.check()?;
        Ok(limits)
    }

    fn check(&self) -> Result<(), LimitsConfigError> {
        if self.max_nesting_depth == 0 {
            return Err(LimitsConfigError::Zero("max_nesting_depth"));
        }
        if self.max_document_bytes == 0 {
            return Err(LimitsConfigError::Zero("max_document_bytes"));
        }
        Ok(())
    }
}

/// Errors loading a [`Limits`] configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitsConfigError {
    /// TOML could not be parsed into limits
    #[error("invalid limits configuration: {0}")]
    Parse(String),

    /// A limit that must be positive was zero
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}
