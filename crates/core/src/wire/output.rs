//! Binary sink for the wire form
//!
//! All integers are big-endian. Lengths, counts and enum ordinals use a
//! variable-length encoding (7 bits per byte, high bit set on every byte but
//! the last). Writes go to an in-memory buffer and cannot fail.

use super::Writeable;
use crate::dispatch::TaggedVariant;
use byteorder::{BigEndian, WriteBytesExt};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Growable byte sink for [`Writeable`] records
#[derive(Debug, Default, Clone)]
pub struct WireOutput {
    buf: Vec<u8>,
}

impl WireOutput {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        WireOutput {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink and return its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a single raw byte
    pub fn write_byte(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a boolean as one byte (0 or 1)
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Write a fixed-width 4 byte integer
    pub fn write_i32(&mut self, value: i32) {
        // Writes into a Vec<u8> cannot fail
        let _ = self.buf.write_i32::<BigEndian>(value);
    }

    /// Write a fixed-width 8 byte integer
    pub fn write_i64(&mut self, value: i64) {
        let _ = self.buf.write_i64::<BigEndian>(value);
    }

    /// Write a variable-length unsigned integer (1 to 5 bytes)
    pub fn write_vint(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buf.push((value & 0x7f) as u8 | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    fn write_len(&mut self, len: usize) {
        debug_assert!(len <= u32::MAX as usize, "length {} overflows vint", len);
        self.write_vint(len as u32);
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_string(&mut self, value: &str) {
        self.write_len(value.len());
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Write a presence flag followed by the string when present
    pub fn write_optional_string(&mut self, value: Option<&str>) {
        match value {
            Some(s) => {
                self.write_bool(true);
                self.write_string(s);
            }
            None => self.write_bool(false),
        }
    }

    /// Write a count followed by each string
    pub fn write_string_list(&mut self, values: &[String]) {
        self.write_len(values.len());
        for value in values {
            self.write_string(value);
        }
    }

    /// Write a presence flag followed by the list when present
    pub fn write_optional_string_list(&mut self, values: Option<&[String]>) {
        match values {
            Some(list) => {
                self.write_bool(true);
                self.write_string_list(list);
            }
            None => self.write_bool(false),
        }
    }

    /// Write a count followed by key/value pairs in key order
    pub fn write_string_map(&mut self, map: &BTreeMap<String, String>) {
        self.write_len(map.len());
        for (key, value) in map {
            self.write_string(key);
            self.write_string(value);
        }
    }

    /// Write an enum as its ordinal within its family
    pub fn write_enum<T: TaggedVariant>(&mut self, value: T) {
        self.write_vint(value.ordinal());
    }

    /// Write a presence flag followed by the integer when present
    pub fn write_optional_i32(&mut self, value: Option<i32>) {
        match value {
            Some(v) => {
                self.write_bool(true);
                self.write_i32(v);
            }
            None => self.write_bool(false),
        }
    }

    /// Write a timestamp as epoch seconds (8 bytes) plus nanoseconds (4 bytes)
    pub fn write_timestamp(&mut self, value: &DateTime<Utc>) {
        self.write_i64(value.timestamp());
        self.write_i32(value.timestamp_subsec_nanos() as i32);
    }

    /// Write a presence flag followed by the timestamp when present
    pub fn write_optional_timestamp(&mut self, value: Option<&DateTime<Utc>>) {
        match value {
            Some(ts) => {
                self.write_bool(true);
                self.write_timestamp(ts);
            }
            None => self.write_bool(false),
        }
    }

    /// Write a presence flag followed by the record when present
    pub fn write_optional<T: Writeable>(&mut self, value: Option<&T>) {
        match value {
            Some(record) => {
                self.write_bool(true);
                record.write_to(self);
            }
            None => self.write_bool(false),
        }
    }

    /// Write a count followed by each record
    pub fn write_list<T: Writeable>(&mut self, values: &[T]) {
        self.write_len(values.len());
        for value in values {
            value.write_to(self);
        }
    }
}
