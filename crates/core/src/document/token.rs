//! Token stream over a JSON document
//!
//! The document is parsed once by `serde_json` (member order preserved) and
//! flattened into a token sequence. The stream is a cursor over that sequence:
//! the *current* token is the one the caller is looking at, and
//! [`TokenStream::next_token`] advances it.
//!
//! Positioning convention used by every record parser:
//! - on entry, the current token is the first token of the value to parse
//!   (`StartObject` for records);
//! - on exit, the current token is the last token of that value
//!   (`EndObject` for records).

use crate::error::DocumentError;
use crate::limits::Limits;
use serde_json::{Number, Value};
use std::fmt;

/// A single structural or scalar token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// Object member name
    FieldName(String),
    /// String scalar
    String(String),
    /// Numeric scalar
    Number(Number),
    /// Boolean scalar
    Bool(bool),
    /// `null`
    Null,
}

impl Token {
    /// Short name of the token kind, used in error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Token::StartObject => "start_object",
            Token::EndObject => "end_object",
            Token::StartArray => "start_array",
            Token::EndArray => "end_array",
            Token::FieldName(_) => "field_name",
            Token::String(_) => "string",
            Token::Number(_) => "number",
            Token::Bool(_) => "boolean",
            Token::Null => "null",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Cursor over a flattened document
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    /// Tokenize JSON text with default limits
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Self::from_json_str_with_limits(text, &Limits::default())
    }

    /// Tokenize JSON text with explicit limits
    pub fn from_json_str_with_limits(text: &str, limits: &Limits) -> Result<Self, DocumentError> {
        if text.len() > limits.max_document_bytes {
            return Err(DocumentError::LimitExceeded {
                what: "document size",
                actual: text.len(),
                max: limits.max_document_bytes,
            });
        }
        let value: Value =
            serde_json::from_str(text).map_err(|e| DocumentError::Syntax(e.to_string()))?;
        Self::from_value_with_limits(&value, limits)
    }

    /// Tokenize an already-parsed value with default limits
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        Self::from_value_with_limits(value, &Limits::default())
    }

    /// Tokenize an already-parsed value with explicit limits
    pub fn from_value_with_limits(value: &Value, limits: &Limits) -> Result<Self, DocumentError> {
        let mut tokens = Vec::new();
        flatten(value, 0, limits, &mut tokens)?;
        Ok(TokenStream {
            tokens,
            position: 0,
        })
    }

    /// The token under the cursor, `None` once the stream is exhausted
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Advance the cursor and return the new current token
    pub fn next_token(&mut self) -> Option<&Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.tokens.get(self.position)
    }

    /// Name of the member whose name or value is under the cursor
    pub fn current_name(&self) -> Option<&str> {
        match self.current_token() {
            Some(Token::FieldName(name)) => Some(name.as_str()),
            _ => match self.position.checked_sub(1).and_then(|i| self.tokens.get(i)) {
                Some(Token::FieldName(name)) => Some(name.as_str()),
                _ => None,
            },
        }
    }

    fn found(&self) -> String {
        self.current_token()
            .map_or_else(|| "end of input".to_string(), |t| t.kind().to_string())
    }

    fn unexpected(&self, expected: &'static str) -> DocumentError {
        DocumentError::UnexpectedToken {
            expected,
            found: self.found(),
        }
    }

    /// Fail unless the current token is `StartObject`
    pub fn ensure_start_object(&self) -> Result<(), DocumentError> {
        match self.current_token() {
            Some(Token::StartObject) => Ok(()),
            _ => Err(self.unexpected("start_object")),
        }
    }

    /// Fail unless the current token is `StartArray`
    pub fn ensure_start_array(&self) -> Result<(), DocumentError> {
        match self.current_token() {
            Some(Token::StartArray) => Ok(()),
            _ => Err(self.unexpected("start_array")),
        }
    }

    /// Text of the current scalar
    ///
    /// Numbers and booleans are rendered to text, matching lenient readers
    /// that accept `"port": "25"` and `"port": 25` alike.
    pub fn text(&self) -> Result<String, DocumentError> {
        match self.current_token() {
            Some(Token::String(s)) => Ok(s.clone()),
            Some(Token::Number(n)) => Ok(n.to_string()),
            Some(Token::Bool(b)) => Ok(b.to_string()),
            _ => Err(self.unexpected("string")),
        }
    }

    /// Text of the current scalar, `None` for `null`
    pub fn text_or_null(&self) -> Result<Option<String>, DocumentError> {
        match self.current_token() {
            Some(Token::Null) => Ok(None),
            _ => self.text().map(Some),
        }
    }

    /// Current scalar as a 64-bit integer
    pub fn i64_value(&self) -> Result<i64, DocumentError> {
        let field = self.current_name().unwrap_or("value").to_string();
        match self.current_token() {
            Some(Token::Number(n)) => n
                .as_i64()
                .ok_or_else(|| DocumentError::invalid(field, format!("{} is not an integer", n))),
            Some(Token::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| DocumentError::invalid(field, format!("'{}' is not an integer", s))),
            _ => Err(self.unexpected("number")),
        }
    }

    /// Current scalar as a 32-bit integer
    pub fn i32_value(&self) -> Result<i32, DocumentError> {
        let value = self.i64_value()?;
        i32::try_from(value).map_err(|_| {
            DocumentError::invalid(
                self.current_name().unwrap_or("value"),
                format!("{} out of range for i32", value),
            )
        })
    }

    /// Current scalar as a boolean
    pub fn bool_value(&self) -> Result<bool, DocumentError> {
        match self.current_token() {
            Some(Token::Bool(b)) => Ok(*b),
            Some(Token::String(s)) if s == "true" => Ok(true),
            Some(Token::String(s)) if s == "false" => Ok(false),
            _ => Err(self.unexpected("boolean")),
        }
    }

    /// If the cursor is on a container start, move it to the matching end
    ///
    /// Scalars are left where they are.
    pub fn skip_children(&mut self) {
        if !matches!(
            self.current_token(),
            Some(Token::StartObject) | Some(Token::StartArray)
        ) {
            return;
        }
        let mut depth = 0usize;
        while let Some(token) = self.current_token() {
            match token {
                Token::StartObject | Token::StartArray => depth += 1,
                Token::EndObject | Token::EndArray => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }
}

fn flatten(
    value: &Value,
    depth: usize,
    limits: &Limits,
    tokens: &mut Vec<Token>,
) -> Result<(), DocumentError> {
    if depth > limits.max_nesting_depth {
        return Err(DocumentError::LimitExceeded {
            what: "nesting depth",
            actual: depth,
            max: limits.max_nesting_depth,
        });
    }
    match value {
        Value::Null => tokens.push(Token::Null),
        Value::Bool(b) => tokens.push(Token::Bool(*b)),
        Value::Number(n) => tokens.push(Token::Number(n.clone())),
        Value::String(s) => tokens.push(Token::String(s.clone())),
        Value::Array(items) => {
            if items.len() > limits.max_collection_len {
                return Err(DocumentError::LimitExceeded {
                    what: "array length",
                    actual: items.len(),
                    max: limits.max_collection_len,
                });
            }
            tokens.push(Token::StartArray);
            for item in items {
                flatten(item, depth + 1, limits, tokens)?;
            }
            tokens.push(Token::EndArray);
        }
        Value::Object(members) => {
            tokens.push(Token::StartObject);
            for (name, member) in members {
                tokens.push(Token::FieldName(name.clone()));
                flatten(member, depth + 1, limits, tokens)?;
            }
            tokens.push(Token::EndObject);
        }
    }
    Ok(())
}
