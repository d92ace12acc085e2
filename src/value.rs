use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::ops::Index;

use crate::{Integer, Timestamp};

/// A decoded MessagePack value.
///
/// The tree owns all of its data; nothing borrows from the decoder's input. Both the `str` and
/// `bin` families decode to [`Value::Bytes`], since the decoder doesn't check text encoding.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(Integer),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Key/value pairs. A repeated key keeps the last value seen for it.
    Map(BTreeMap<Value, Value>),
    /// Application-defined extension: the signed type tag and the raw payload.
    Ext(i8, Vec<u8>),
    Timestamp(Timestamp),
}

static NIL: Value = Value::Nil;

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_i64(&self) -> bool {
        if let Value::Int(ref v) = *self {
            v.is_i64()
        } else {
            false
        }
    }

    pub fn is_u64(&self) -> bool {
        if let Value::Int(ref v) = *self {
            v.is_u64()
        } else {
            false
        }
    }

    pub fn is_f32(&self) -> bool {
        matches!(self, Value::F32(_))
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Value::F64(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_ext(&self) -> bool {
        matches!(self, Value::Ext(..))
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<Integer> {
        if let Value::Int(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(ref n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(ref n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::F32(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F64(n) => Some(n),
            _ => None,
        }
    }

    /// Any numeric value, widened to `f64`.
    pub fn as_floating(&self) -> Option<f64> {
        match *self {
            Value::F32(n) => Some(n.into()),
            Value::F64(n) => Some(n),
            Value::Int(ref n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let Value::Bytes(ref v) = *self {
            Some(v.as_slice())
        } else {
            None
        }
    }

    /// View a byte payload as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Value::Array(ref array) = *self {
            Some(array)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        if let Value::Map(ref map) = *self {
            Some(map)
        } else {
            None
        }
    }

    pub fn as_ext(&self) -> Option<(i8, &[u8])> {
        if let Value::Ext(ty, ref data) = *self {
            Some((ty, data.as_slice()))
        } else {
            None
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        if let Value::Timestamp(time) = *self {
            Some(time)
        } else {
            None
        }
    }

    /// Look up a map entry by a text key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()
            .and_then(|map| map.get(&Value::Bytes(key.as_bytes().to_vec())))
    }

    fn rank(&self) -> u8 {
        match *self {
            Value::Nil => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::F32(_) => 3,
            Value::F64(_) => 4,
            Value::Bytes(_) => 5,
            Value::Array(_) => 6,
            Value::Map(_) => 7,
            Value::Ext(..) => 8,
            Value::Timestamp(_) => 9,
        }
    }
}

// Values key maps, so they need a total order even though floats don't have one. Floats are
// ordered by `total_cmp`, and equality follows the ordering.
impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Nil, Value::Nil) => Ordering::Equal,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs.cmp(rhs),
            (Value::Int(lhs), Value::Int(rhs)) => lhs.cmp(rhs),
            (Value::F32(lhs), Value::F32(rhs)) => lhs.total_cmp(rhs),
            (Value::F64(lhs), Value::F64(rhs)) => lhs.total_cmp(rhs),
            (Value::Bytes(lhs), Value::Bytes(rhs)) => lhs.cmp(rhs),
            (Value::Array(lhs), Value::Array(rhs)) => lhs.cmp(rhs),
            (Value::Map(lhs), Value::Map(rhs)) => lhs.iter().cmp(rhs.iter()),
            (Value::Ext(lty, ldata), Value::Ext(rty, rdata)) => {
                lty.cmp(rty).then_with(|| ldata.cmp(rdata))
            }
            (Value::Timestamp(lhs), Value::Timestamp(rhs)) => lhs.cmp(rhs),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Default for Value {
    fn default() -> Self {
        Value::Nil
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Index into an array. Anything out of range, or a non-array, yields `Nil`.
    fn index(&self, index: usize) -> &Self::Output {
        self.as_array()
            .and_then(|v| v.get(index))
            .unwrap_or(&NIL)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Index into a map by text key. A missing key, or a non-map, yields `Nil`.
    fn index(&self, index: &str) -> &Self::Output {
        self.get(index).unwrap_or(&NIL)
    }
}

macro_rules! impl_value_from_integer {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(From::from(v))
            }
        }
    };
}

macro_rules! impl_value_from {
    ($t: ty, $p: ident) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$p(v)
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(Integer, Int);
impl_value_from!(f32, F32);
impl_value_from!(f64, F64);
impl_value_from!(Vec<u8>, Bytes);
impl_value_from!(Vec<Value>, Array);
impl_value_from!(BTreeMap<Value, Value>, Map);
impl_value_from!(Timestamp, Timestamp);
impl_value_from_integer!(u8);
impl_value_from_integer!(u16);
impl_value_from_integer!(u32);
impl_value_from_integer!(u64);
impl_value_from_integer!(usize);
impl_value_from_integer!(i8);
impl_value_from_integer!(i16);
impl_value_from_integer!(i32);
impl_value_from_integer!(i64);
impl_value_from_integer!(isize);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Nil
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &str) -> Self {
        Value::Bytes(v.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Bytes(v.into_bytes())
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.into())
    }
}

impl<'a> From<Cow<'a, [u8]>> for Value {
    fn from(v: Cow<'a, [u8]>) -> Self {
        Value::Bytes(v.into_owned())
    }
}

impl<V: Into<Value>> std::iter::FromIterator<V> for Value {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_try_from_value {
    ($t: ty, $p: ident) => {
        impl TryFrom<Value> for $t {
            type Error = Value;
            fn try_from(v: Value) -> Result<Self, Self::Error> {
                match v {
                    Value::$p(v) => Ok(v),
                    _ => Err(v),
                }
            }
        }
    };
}

macro_rules! impl_try_from_value_integer {
    ($t: ty) => {
        impl TryFrom<Value> for $t {
            type Error = Value;
            fn try_from(v: Value) -> Result<Self, Self::Error> {
                match v {
                    Value::Int(i) => TryFrom::try_from(i).map_err(|_| v),
                    _ => Err(v),
                }
            }
        }
    };
}

impl_try_from_value!(bool, Bool);
impl_try_from_value!(f32, F32);
impl_try_from_value!(f64, F64);
impl_try_from_value!(Vec<u8>, Bytes);
impl_try_from_value!(Vec<Value>, Array);
impl_try_from_value!(BTreeMap<Value, Value>, Map);
impl_try_from_value!(Timestamp, Timestamp);
impl_try_from_value_integer!(u8);
impl_try_from_value_integer!(u16);
impl_try_from_value_integer!(u32);
impl_try_from_value_integer!(u64);
impl_try_from_value_integer!(usize);
impl_try_from_value_integer!(i8);
impl_try_from_value_integer!(i16);
impl_try_from_value_integer!(i32);
impl_try_from_value_integer!(i64);
impl_try_from_value_integer!(isize);
