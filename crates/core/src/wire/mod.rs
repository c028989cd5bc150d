//! Binary wire form
//!
//! A positional, non-self-describing encoding used for internal transport.
//! Records write their fields in a fixed declared order and read them back in
//! the same order; field order is the only schema.
//!
//! ## Primitive Format
//!
//! ```text
//! bool       [u8: 0|1]
//! i32        [4 bytes BE]
//! i64        [8 bytes BE]
//! vint       [1-5 bytes, 7 bits each, high bit = continuation]
//! string     [len: vint][UTF-8 bytes]
//! enum       [ordinal: vint]
//! optional   [present: bool][value if present]
//! list       [count: vint][value]*
//! timestamp  [epoch seconds: i64][nanos: i32]
//! ```

mod input;
mod output;

pub use input::WireInput;
pub use output::WireOutput;

use crate::error::Result;
use crate::limits::Limits;

/// A record that can write itself to the wire form
pub trait Writeable {
    /// Write all fields in declared order
    fn write_to(&self, out: &mut WireOutput);
}

/// A record that can be rebuilt from the wire form
///
/// Implementations read fields in the order [`Writeable::write_to`] wrote
/// them and pass them through the record's validating constructor.
pub trait Readable: Sized {
    /// Read all fields in declared order
    fn read_from(input: &mut WireInput<'_>) -> Result<Self>;
}

/// Encode a record to bytes
pub fn to_bytes<T: Writeable + ?Sized>(record: &T) -> Vec<u8> {
    let mut out = WireOutput::new();
    record.write_to(&mut out);
    out.into_bytes()
}

/// Decode a record from bytes with default limits
pub fn from_bytes<T: Readable>(bytes: &[u8]) -> Result<T> {
    from_bytes_with_limits(bytes, &Limits::default())
}

/// Decode a record from bytes with explicit limits
pub fn from_bytes_with_limits<T: Readable>(bytes: &[u8], limits: &Limits) -> Result<T> {
    let mut input = WireInput::with_limits(bytes, limits);
    T::read_from(&mut input)
}
