//! Document (JSON) form
//!
//! Self-describing, named-field encoding used by REST callers and storage.
//! Decoding is tolerant: unknown members are skipped and logged, never
//! rejected, so producers and consumers can evolve their schemas
//! independently. Missing required members are hard errors.

mod builder;
mod reader;
mod token;

pub use builder::{DocumentBuilder, FromDocument, ToDocument};
pub use reader::{
    millis_precision, object_list, optional_timestamp_millis, parse_object, required, string_list,
    string_map, timestamp_millis, FieldAction,
};
pub use token::{Token, TokenStream};

use crate::error::Result;
use crate::limits::Limits;
use serde_json::Value;

/// Render a record as compact JSON text
pub fn to_json_string<T: ToDocument + ?Sized>(record: &T) -> String {
    record.to_document().to_string()
}

/// Parse a record from JSON text with default limits
pub fn from_json_str<T: FromDocument>(text: &str) -> Result<T> {
    from_json_str_with_limits(text, &Limits::default())
}

/// Parse a record from JSON text with explicit limits
pub fn from_json_str_with_limits<T: FromDocument>(text: &str, limits: &Limits) -> Result<T> {
    let mut stream = TokenStream::from_json_str_with_limits(text, limits)?;
    T::parse(&mut stream)
}

/// Parse a record from an already-built JSON value
pub fn from_json_value<T: FromDocument>(value: &Value) -> Result<T> {
    let mut stream = TokenStream::from_value(value)?;
    T::parse(&mut stream)
}
