//! Decoding of MessagePack data into [`Value`] trees.
//!
//! [`Decoder::decode_value`] reads one tag byte and dispatches on it. Arrays and maps recurse
//! back into it for each element, so the recursion depth tracks the nesting depth of the input,
//! which is capped by [`DecodeOptions::max_depth`].

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::marker::{Marker, TIMESTAMP_EXT_TYPE};
use crate::{Timestamp, Value, MAX_DEPTH};

/// Fallback for tag bytes with no assigned meaning.
///
/// The decoder has already consumed the tag byte when this is called. An implementation may read
/// whatever payload it expects through [`Decoder::cursor_mut`], or decode nested values with
/// [`Decoder::decode_value`], and return the value they represent. Each handler call counts as one
/// nesting level toward [`DecodeOptions::max_depth`] for anything it decodes that way.
pub trait UnknownTag: Send + Sync {
    fn read_unknown(&self, tag: u8, decoder: &mut Decoder) -> Result<Value>;
}

/// Default unknown-tag handling: reject the byte with [`Error::Unimplemented`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectUnknown;

impl UnknownTag for RejectUnknown {
    fn read_unknown(&self, tag: u8, _decoder: &mut Decoder) -> Result<Value> {
        Err(Error::Unimplemented { tag })
    }
}

/// Settings for a decode run.
#[derive(Clone)]
pub struct DecodeOptions {
    max_depth: usize,
    unknown_tag: Arc<dyn UnknownTag>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            unknown_tag: Arc::new(RejectUnknown),
        }
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many arrays/maps may be nested inside each other. Zero allows only scalars.
    ///
    /// Values decoded from inside an [`UnknownTag`] handler sit one level deeper than the tag.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the handler for unrecognized tag bytes.
    pub fn unknown_tag<H: UnknownTag + 'static>(mut self, handler: H) -> Self {
        self.unknown_tag = Arc::new(handler);
        self
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Reads values one at a time out of a private copy of the input.
///
/// Also works as an iterator over concatenated values. Iteration stops at the end of the input,
/// or after the first error.
#[derive(Clone, Debug)]
pub struct Decoder {
    cursor: Cursor,
    options: DecodeOptions,
    depth: usize,
    errored: bool,
}

impl Decoder {
    pub fn new(data: &[u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &[u8], options: DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(data),
            options,
            depth: 0,
            errored: false,
        }
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor.consumed()
    }

    /// Bytes not yet consumed.
    pub fn remaining_len(&self) -> usize {
        self.cursor.remaining_len()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Current nesting depth: the number of arrays, maps, and unknown-tag handler calls being
    /// decoded around this point.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Decode exactly one value, consuming exactly the bytes its encoding declares.
    pub fn decode_value(&mut self) -> Result<Value> {
        if self.depth > self.options.max_depth {
            return Err(self.depth_limit());
        }
        let tag = self.cursor.read_u8()?;
        let value = match Marker::from_u8(tag) {
            Marker::PosFixInt(v) => Value::from(v),
            Marker::NegFixInt(v) => Value::from(v),
            Marker::Nil => Value::Nil,
            Marker::False => Value::Bool(false),
            Marker::True => Value::Bool(true),
            Marker::UInt8 => Value::from(self.cursor.read_u8()?),
            Marker::UInt16 => Value::from(self.cursor.read_u16()?),
            Marker::UInt32 => Value::from(self.cursor.read_u32()?),
            Marker::UInt64 => Value::from(self.cursor.read_u64()?),
            Marker::Int8 => Value::from(self.cursor.read_i8()?),
            Marker::Int16 => Value::from(self.cursor.read_i16()?),
            Marker::Int32 => Value::from(self.cursor.read_i32()?),
            Marker::Int64 => Value::from(self.cursor.read_i64()?),
            Marker::F32 => Value::F32(self.cursor.read_f32()?),
            Marker::F64 => Value::F64(self.cursor.read_f64()?),
            Marker::FixStr(len) => self.read_bytes(len as usize)?,
            Marker::Str8 | Marker::Bin8 => {
                let len = self.cursor.read_u8()? as usize;
                self.read_bytes(len)?
            }
            Marker::Str16 | Marker::Bin16 => {
                let len = self.cursor.read_u16()? as usize;
                self.read_bytes(len)?
            }
            Marker::Str32 | Marker::Bin32 => {
                let len = self.cursor.read_u32()? as usize;
                self.read_bytes(len)?
            }
            Marker::FixArray(len) => self.read_array(len as usize)?,
            Marker::Array16 => {
                let len = self.cursor.read_u16()? as usize;
                self.read_array(len)?
            }
            Marker::Array32 => {
                let len = self.cursor.read_u32()? as usize;
                self.read_array(len)?
            }
            Marker::FixMap(len) => self.read_map(len as usize)?,
            Marker::Map16 => {
                let len = self.cursor.read_u16()? as usize;
                self.read_map(len)?
            }
            Marker::Map32 => {
                let len = self.cursor.read_u32()? as usize;
                self.read_map(len)?
            }
            Marker::FixExt1 => self.read_ext(1)?,
            Marker::FixExt2 => self.read_ext(2)?,
            Marker::FixExt4 => match self.read_ext(4)? {
                Value::Ext(TIMESTAMP_EXT_TYPE, data) => Value::Timestamp(
                    Timestamp::try_from(data.as_slice()).map_err(Error::Custom)?,
                ),
                other => other,
            },
            Marker::FixExt8 => self.read_ext(8)?,
            Marker::FixExt16 => self.read_ext(16)?,
            Marker::Ext8 => {
                let len = self.cursor.read_u8()? as usize;
                self.read_ext(len)?
            }
            Marker::Ext16 => {
                let len = self.cursor.read_u16()? as usize;
                self.read_ext(len)?
            }
            Marker::Ext32 => {
                let len = self.cursor.read_u32()? as usize;
                self.read_ext(len)?
            }
            Marker::Unknown(tag) => {
                debug!(
                    "tag byte 0x{:02x} has no decoder, {} bytes remain",
                    tag,
                    self.cursor.remaining_len()
                );
                let handler = Arc::clone(&self.options.unknown_tag);
                // Only checked against the limit once the handler decodes a value inside it.
                self.depth += 1;
                let result = handler.read_unknown(tag, self);
                self.depth -= 1;
                result?
            }
        };
        Ok(value)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Value> {
        Ok(Value::Bytes(self.cursor.take(len)?.to_vec()))
    }

    fn read_array(&mut self, len: usize) -> Result<Value> {
        self.nested(|decoder| {
            // Every element takes at least one byte, so the remaining input bounds the
            // allocation no matter what length was declared.
            let mut array = Vec::with_capacity(len.min(decoder.cursor.remaining_len()));
            for _ in 0..len {
                array.push(decoder.decode_value()?);
            }
            Ok(Value::Array(array))
        })
    }

    fn read_map(&mut self, len: usize) -> Result<Value> {
        self.nested(|decoder| {
            let mut map = BTreeMap::new();
            for _ in 0..len {
                let key = decoder.decode_value()?;
                let val = decoder.decode_value()?;
                map.insert(key, val);
            }
            Ok(Value::Map(map))
        })
    }

    fn read_ext(&mut self, len: usize) -> Result<Value> {
        let ty = self.cursor.read_i8()?;
        let data = self.cursor.take(len)?.to_vec();
        Ok(Value::Ext(ty, data))
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.depth_limit());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn depth_limit(&self) -> Error {
        debug!(
            "nesting depth limit of {} hit at byte {}",
            self.options.max_depth,
            self.cursor.consumed()
        );
        Error::DepthLimit {
            max: self.options.max_depth,
        }
    }
}

impl Iterator for Decoder {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored || self.cursor.is_empty() {
            return None;
        }
        let result = self.decode_value();
        if result.is_err() {
            self.errored = true;
        }
        Some(result)
    }
}

/// Decode one value from the start of `data` using the default options.
///
/// Bytes after the first complete value are ignored.
pub fn decode(data: &[u8]) -> Result<Value> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode one value from the start of `data`.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Value> {
    let mut decoder = Decoder::with_options(data, options.clone());
    match decoder.decode_value() {
        Ok(value) => {
            trace!(
                "decoded value from {} of {} input bytes",
                decoder.consumed(),
                data.len()
            );
            Ok(value)
        }
        Err(err) => {
            debug!("decode failed after {} bytes: {}", decoder.consumed(), err);
            Err(err)
        }
    }
}
