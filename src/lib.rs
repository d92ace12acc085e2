//! msgpack-read decodes MessagePack data into an owned, dynamically typed [`Value`] tree.
//!
//! It is decode-only. A call to [`decode`] copies the input, reads exactly one value from the
//! front of it, and hands back either the complete tree or an [`Error`]; there is no partial
//! result. Supported are:
//!
//! - nil, booleans, and integers of every width (widened into [`Integer`])
//! - 32- and 64-bit floats
//! - strings and binary blobs, both decoded as raw bytes
//! - arrays and maps, nested up to a configurable depth
//! - extension values, with the 4-byte form of extension type -1 read as a [`Timestamp`]
//!
//! Tag bytes with no assigned meaning go to an [`UnknownTag`] handler, which rejects them unless
//! replaced through [`DecodeOptions`].
//!
//! ```
//! use msgpack_read::{decode, Value};
//!
//! let value = decode(&[0x92, 0x01, 0xa2, b'h', b'i']).unwrap();
//! assert_eq!(value[0], Value::from(1));
//! assert_eq!(value[1].as_str(), Some("hi"));
//! ```

mod cursor;
mod error;
mod integer;
mod marker;
mod ser;
mod timestamp;
mod value;

pub mod decode;

#[cfg(test)]
mod test_encoder;

pub use self::cursor::Cursor;
pub use self::decode::{decode, decode_with, DecodeOptions, Decoder, RejectUnknown, UnknownTag};
pub use self::error::{Error, Result};
pub use self::integer::Integer;
pub use self::marker::{Marker, TIMESTAMP_EXT_TYPE};
pub use self::timestamp::Timestamp;
pub use self::value::Value;

/// Default limit on how deeply arrays and maps may nest.
pub const MAX_DEPTH: usize = 128;
