//! Minimal MessagePack encoder used to build test inputs. Always picks the shortest form.

use crate::marker::{Marker, TIMESTAMP_EXT_TYPE};
use crate::Value;

pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(&mut buf, value);
    buf
}

pub fn encode_into(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Nil => buf.push(Marker::Nil.into()),
        Value::Bool(v) => buf.push(if *v { Marker::True } else { Marker::False }.into()),
        Value::Int(v) => {
            if let Some(v) = v.as_u64() {
                encode_uint(buf, v);
            } else if let Some(v) = v.as_i64() {
                encode_int(buf, v);
            }
        }
        Value::F32(v) => {
            buf.push(Marker::F32.into());
            buf.extend_from_slice(&v.to_be_bytes());
        }
        Value::F64(v) => {
            buf.push(Marker::F64.into());
            buf.extend_from_slice(&v.to_be_bytes());
        }
        Value::Bytes(v) => encode_str(buf, v),
        Value::Array(v) => {
            encode_array_len(buf, v.len());
            for item in v {
                encode_into(buf, item);
            }
        }
        Value::Map(v) => {
            encode_map_len(buf, v.len());
            for (key, val) in v {
                encode_into(buf, key);
                encode_into(buf, val);
            }
        }
        Value::Ext(ty, data) => encode_ext(buf, *ty, data),
        Value::Timestamp(v) => {
            buf.push(Marker::FixExt4.into());
            buf.push(TIMESTAMP_EXT_TYPE as u8);
            buf.extend_from_slice(&(v.timestamp_utc() as u32).to_be_bytes());
        }
    }
}

pub fn encode_uint(buf: &mut Vec<u8>, v: u64) {
    if v <= 127 {
        buf.push(Marker::PosFixInt(v as u8).into());
    } else if v <= u8::MAX as u64 {
        buf.push(Marker::UInt8.into());
        buf.push(v as u8);
    } else if v <= u16::MAX as u64 {
        buf.push(Marker::UInt16.into());
        buf.extend_from_slice(&(v as u16).to_be_bytes());
    } else if v <= u32::MAX as u64 {
        buf.push(Marker::UInt32.into());
        buf.extend_from_slice(&(v as u32).to_be_bytes());
    } else {
        buf.push(Marker::UInt64.into());
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

pub fn encode_int(buf: &mut Vec<u8>, v: i64) {
    if v >= -32 {
        buf.push(Marker::NegFixInt(v as i8).into());
    } else if v >= i8::MIN as i64 {
        buf.push(Marker::Int8.into());
        buf.push(v as u8);
    } else if v >= i16::MIN as i64 {
        buf.push(Marker::Int16.into());
        buf.extend_from_slice(&(v as i16).to_be_bytes());
    } else if v >= i32::MIN as i64 {
        buf.push(Marker::Int32.into());
        buf.extend_from_slice(&(v as i32).to_be_bytes());
    } else {
        buf.push(Marker::Int64.into());
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

pub fn encode_str(buf: &mut Vec<u8>, v: &[u8]) {
    let len = v.len();
    if len <= 31 {
        buf.push(Marker::FixStr(len as u8).into());
    } else if len <= u8::MAX as usize {
        buf.push(Marker::Str8.into());
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Str16.into());
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(Marker::Str32.into());
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(v);
}

pub fn encode_bin(buf: &mut Vec<u8>, v: &[u8]) {
    let len = v.len();
    if len <= u8::MAX as usize {
        buf.push(Marker::Bin8.into());
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Bin16.into());
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(Marker::Bin32.into());
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(v);
}

pub fn encode_array_len(buf: &mut Vec<u8>, len: usize) {
    if len <= 15 {
        buf.push(Marker::FixArray(len as u8).into());
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Array16.into());
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(Marker::Array32.into());
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
}

pub fn encode_map_len(buf: &mut Vec<u8>, len: usize) {
    if len <= 15 {
        buf.push(Marker::FixMap(len as u8).into());
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Map16.into());
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(Marker::Map32.into());
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
}

pub fn encode_ext(buf: &mut Vec<u8>, ty: i8, data: &[u8]) {
    let len = data.len();
    match len {
        1 => buf.push(Marker::FixExt1.into()),
        2 => buf.push(Marker::FixExt2.into()),
        4 => buf.push(Marker::FixExt4.into()),
        8 => buf.push(Marker::FixExt8.into()),
        16 => buf.push(Marker::FixExt16.into()),
        _ if len <= u8::MAX as usize => {
            buf.push(Marker::Ext8.into());
            buf.push(len as u8);
        }
        _ if len <= u16::MAX as usize => {
            buf.push(Marker::Ext16.into());
            buf.extend_from_slice(&(len as u16).to_be_bytes());
        }
        _ => {
            buf.push(Marker::Ext32.into());
            buf.extend_from_slice(&(len as u32).to_be_bytes());
        }
    }
    buf.push(ty as u8);
    buf.extend_from_slice(data);
}
