//! Binary source for the wire form
//!
//! Mirrors [`WireOutput`](super::WireOutput) read for read. Every length and
//! count prefix is checked against [`Limits`] and against the bytes actually
//! remaining before any allocation happens, so truncated or hostile input
//! fails with a [`WireError`] instead of over-allocating.

use super::Readable;
use crate::dispatch::TaggedVariant;
use crate::error::{Result, WireError};
use crate::limits::Limits;
use byteorder::{BigEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Cursor over an encoded record
#[derive(Debug, Clone)]
pub struct WireInput<'a> {
    cursor: Cursor<&'a [u8]>,
    limits: Limits,
}

impl<'a> WireInput<'a> {
    /// Create a reader with default limits
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_limits(bytes, &Limits::default())
    }

    /// Create a reader with explicit limits
    pub fn with_limits(bytes: &'a [u8], limits: &Limits) -> Self {
        WireInput {
            cursor: Cursor::new(bytes),
            limits: limits.clone(),
        }
    }

    /// Limits applied by this reader
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn ensure(&self, needed: usize) -> std::result::Result<(), WireError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(WireError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    /// Read a single raw byte
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let remaining = self.remaining();
        Ok(self
            .cursor
            .read_u8()
            .map_err(|_| WireError::UnexpectedEof { needed: 1, remaining })?)
    }

    /// Read a boolean byte, rejecting anything but 0 or 1
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidBoolean(other).into()),
        }
    }

    /// Read a fixed-width 4 byte integer
    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        let remaining = self.remaining();
        Ok(self
            .cursor
            .read_i32::<BigEndian>()
            .map_err(|_| WireError::UnexpectedEof { needed: 4, remaining })?)
    }

    /// Read a fixed-width 8 byte integer
    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        let remaining = self.remaining();
        Ok(self
            .cursor
            .read_i64::<BigEndian>()
            .map_err(|_| WireError::UnexpectedEof { needed: 8, remaining })?)
    }

    /// Read a variable-length unsigned integer
    pub fn read_vint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for shift in (0..35).step_by(7) {
            let byte = self.read_byte()?;
            // Fifth byte may only carry the top 4 bits
            if shift == 28 && byte & 0xf0 != 0 {
                return Err(WireError::MalformedVarInt.into());
            }
            value |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::MalformedVarInt.into())
    }

    fn read_len(&mut self, what: &'static str, max: usize) -> Result<usize> {
        let len = self.read_vint()? as usize;
        if len > max {
            return Err(WireError::LimitExceeded {
                what,
                actual: len,
                max,
            }
            .into());
        }
        Ok(len)
    }

    fn read_collection_len(&mut self) -> Result<usize> {
        let max = self.limits.max_collection_len;
        self.read_len("collection length", max)
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String> {
        let max = self.limits.max_string_bytes;
        let len = self.read_len("string length", max)?;
        self.ensure(len)?;

        let start = self.cursor.position() as usize;
        let bytes = self
            .cursor
            .get_ref()
            .get(start..start + len)
            .ok_or(WireError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            })?;
        let value = std::str::from_utf8(bytes)
            .map_err(|_| WireError::InvalidUtf8)?
            .to_string();
        self.cursor.set_position((start + len) as u64);
        Ok(value)
    }

    /// Read a presence flag and the string when present
    pub fn read_optional_string(&mut self) -> Result<Option<String>> {
        if self.read_bool()? {
            Ok(Some(self.read_string()?))
        } else {
            Ok(None)
        }
    }

    /// Read a counted list of strings
    pub fn read_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.read_collection_len()?;
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(self.read_string()?);
        }
        Ok(values)
    }

    /// Read a presence flag and the list when present
    pub fn read_optional_string_list(&mut self) -> Result<Option<Vec<String>>> {
        if self.read_bool()? {
            Ok(Some(self.read_string_list()?))
        } else {
            Ok(None)
        }
    }

    /// Read a counted map of string pairs
    pub fn read_string_map(&mut self) -> Result<BTreeMap<String, String>> {
        let count = self.read_collection_len()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Read an enum ordinal and resolve it within the family
    pub fn read_enum<T: TaggedVariant>(&mut self) -> Result<T> {
        let ordinal = self.read_vint()?;
        T::from_ordinal(ordinal).ok_or_else(|| {
            WireError::UnknownOrdinal {
                family: T::FAMILY,
                ordinal,
            }
            .into()
        })
    }

    /// Read a presence flag and the integer when present
    pub fn read_optional_i32(&mut self) -> Result<Option<i32>> {
        if self.read_bool()? {
            Ok(Some(self.read_i32()?))
        } else {
            Ok(None)
        }
    }

    /// Read epoch seconds plus nanoseconds
    pub fn read_timestamp(&mut self) -> Result<DateTime<Utc>> {
        let seconds = self.read_i64()?;
        let nanos = self.read_i32()?;
        let parsed = u32::try_from(nanos)
            .ok()
            .and_then(|n| DateTime::<Utc>::from_timestamp(seconds, n));
        parsed.ok_or_else(|| WireError::InvalidTimestamp { seconds, nanos }.into())
    }

    /// Read a presence flag and the timestamp when present
    pub fn read_optional_timestamp(&mut self) -> Result<Option<DateTime<Utc>>> {
        if self.read_bool()? {
            Ok(Some(self.read_timestamp()?))
        } else {
            Ok(None)
        }
    }

    /// Read a presence flag and the record when present
    pub fn read_optional<T: Readable>(&mut self) -> Result<Option<T>> {
        if self.read_bool()? {
            Ok(Some(T::read_from(self)?))
        } else {
            Ok(None)
        }
    }

    /// Read a counted list of records
    pub fn read_list<T: Readable>(&mut self) -> Result<Vec<T>> {
        let count = self.read_collection_len()?;
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(T::read_from(self)?);
        }
        Ok(values)
    }
}
