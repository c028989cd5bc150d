//! Tolerant object driver and field parsers
//!
//! [`parse_object`] is the one loop every record parser shares: it checks the
//! object start, walks name/value pairs, hands each pair to the record's field
//! dispatcher, and skips (logging at info) any member the dispatcher does not
//! claim. Required-field enforcement happens afterwards with [`required`].
//!
//! ```
//! use herald_core::document::{parse_object, required, FieldAction, TokenStream};
//!
//! let mut stream = TokenStream::from_json_str(r#"{"host":"smtp","extra":[1,2]}"#).unwrap();
//! let mut host = None;
//! parse_object(&mut stream, "Example", |field, stream| {
//!     match field {
//!         "host" => host = Some(stream.text()?),
//!         _ => return Ok(FieldAction::Skip),
//!     }
//!     Ok(FieldAction::Consumed)
//! })
//! .unwrap();
//! assert_eq!(required(host, "Example", "host").unwrap(), "smtp");
//! ```

use super::token::{Token, TokenStream};
use crate::error::{DocumentError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::BTreeMap;
use tracing::info;

/// Outcome of offering a member to a record's field dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// The dispatcher parsed the value
    Consumed,
    /// The member is not part of the record; skip its value
    Skip,
}

/// Drive a record parser over one object
///
/// On entry the current token must be `StartObject`; on return it is the
/// matching `EndObject`. `on_field` is called with the cursor on each
/// member's value and must leave the cursor on that value's last token.
pub fn parse_object<F>(stream: &mut TokenStream, record: &'static str, mut on_field: F) -> Result<()>
where
    F: FnMut(&str, &mut TokenStream) -> Result<FieldAction>,
{
    stream.ensure_start_object()?;
    loop {
        let field = match stream.next_token() {
            Some(Token::EndObject) => return Ok(()),
            Some(Token::FieldName(name)) => name.clone(),
            Some(other) => {
                return Err(DocumentError::UnexpectedToken {
                    expected: "field_name",
                    found: other.kind().to_string(),
                }
                .into())
            }
            None => {
                return Err(DocumentError::UnexpectedToken {
                    expected: "field_name",
                    found: "end of input".to_string(),
                }
                .into())
            }
        };
        if stream.next_token().is_none() {
            return Err(DocumentError::UnexpectedToken {
                expected: "value",
                found: "end of input".to_string(),
            }
            .into());
        }
        if on_field(&field, stream)? == FieldAction::Skip {
            stream.skip_children();
            info!(target: "herald::document", field = %field, record, "Unexpected field, skipping");
        }
    }
}

/// Unwrap a required field collected by a record parser
pub fn required<T>(value: Option<T>, record: &'static str, field: &'static str) -> std::result::Result<T, DocumentError> {
    value.ok_or(DocumentError::MissingField { record, field })
}

/// Parse an array of strings
pub fn string_list(stream: &mut TokenStream) -> Result<Vec<String>> {
    stream.ensure_start_array()?;
    let mut values = Vec::new();
    loop {
        match stream.next_token() {
            Some(Token::EndArray) => return Ok(values),
            Some(_) => values.push(stream.text()?),
            None => {
                return Err(DocumentError::UnexpectedToken {
                    expected: "end_array",
                    found: "end of input".to_string(),
                }
                .into())
            }
        }
    }
}

/// Parse an array of objects with a per-element parser
pub fn object_list<T, F>(stream: &mut TokenStream, mut parse: F) -> Result<Vec<T>>
where
    F: FnMut(&mut TokenStream) -> Result<T>,
{
    stream.ensure_start_array()?;
    let mut values = Vec::new();
    loop {
        match stream.next_token() {
            Some(Token::EndArray) => return Ok(values),
            Some(_) => values.push(parse(stream)?),
            None => {
                return Err(DocumentError::UnexpectedToken {
                    expected: "end_array",
                    found: "end of input".to_string(),
                }
                .into())
            }
        }
    }
}

/// Parse an object whose members are all string-valued
pub fn string_map(stream: &mut TokenStream, record: &'static str) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    parse_object(stream, record, |field, stream| {
        map.insert(field.to_string(), stream.text()?);
        Ok(FieldAction::Consumed)
    })?;
    Ok(map)
}

/// Parse an epoch-millisecond timestamp
pub fn timestamp_millis(stream: &TokenStream) -> Result<DateTime<Utc>> {
    let millis = stream.i64_value()?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        DocumentError::invalid(
            stream.current_name().unwrap_or("timestamp"),
            format!("{} ms is out of range", millis),
        )
        .into()
    })
}

/// Drop sub-millisecond precision so a timestamp survives the document form
pub fn millis_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Parse an epoch-millisecond timestamp that may be `null`
pub fn optional_timestamp_millis(stream: &TokenStream) -> Result<Option<DateTime<Utc>>> {
    match stream.current_token() {
        Some(Token::Null) => Ok(None),
        _ => timestamp_millis(stream).map(Some),
    }
}
