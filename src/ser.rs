//! Serialization of decoded values through serde.
//!
//! Lets a decoded tree be written out in any serde data format. Byte strings go through
//! `serialize_bytes`, except for human-readable formats, which get a string whenever the bytes
//! are valid UTF-8. Extensions become the tuple struct `Extension(type, bytes)`, and
//! timestamps become the newtype struct `Timestamp(seconds)`.

use serde::ser::{Serialize, SerializeMap, SerializeTupleStruct, Serializer};
use serde_bytes::Bytes;

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => v.serialize(serializer),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Bytes(v) => match std::str::from_utf8(v) {
                Ok(text) if serializer.is_human_readable() => serializer.serialize_str(text),
                _ => serializer.serialize_bytes(v),
            },
            Value::Array(v) => v.serialize(serializer),
            Value::Map(v) => {
                let mut map = serializer.serialize_map(Some(v.len()))?;
                for (key, val) in v {
                    map.serialize_entry(key, val)?;
                }
                map.end()
            }
            Value::Ext(ty, data) => {
                let mut ext = serializer.serialize_tuple_struct("Extension", 2)?;
                ext.serialize_field(ty)?;
                ext.serialize_field(Bytes::new(data))?;
                ext.end()
            }
            Value::Timestamp(v) => v.serialize(serializer),
        }
    }
}
