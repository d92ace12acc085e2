use std::convert::TryFrom;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use byteorder::{BigEndian, ByteOrder};
use serde::ser::{Serialize, Serializer};

/// Length of the only timestamp payload this crate recognizes.
pub const TIMESTAMP_PAYLOAD_LEN: usize = 4;

/// A point in time, in whole seconds since the UNIX epoch.
///
/// Only produced from the 4-byte fixed extension form with extension type -1, whose payload is a
/// big-endian `u32` second count. Other timestamp layouts decode as plain extensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    sec: i64,
}

impl Timestamp {
    pub fn from_sec(sec: i64) -> Timestamp {
        Timestamp { sec }
    }

    /// Return the UNIX timestamp (number of seconds since January 1, 1970 0:00:00 UTC).
    pub fn timestamp_utc(&self) -> i64 {
        self.sec
    }

    /// Convert to a [`SystemTime`]. Returns `None` if the platform can't represent it.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if self.sec >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.sec as u64))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(self.sec.unsigned_abs()))
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UTC: {} sec", self.sec)
    }
}

impl From<u32> for Timestamp {
    fn from(sec: u32) -> Self {
        Timestamp { sec: sec as i64 }
    }
}

impl TryFrom<&[u8]> for Timestamp {
    type Error = String;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != TIMESTAMP_PAYLOAD_LEN {
            return Err(format!(
                "not a recognized Timestamp length ({} bytes)",
                value.len()
            ));
        }
        Ok(Timestamp::from(BigEndian::read_u32(value)))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct("Timestamp", &self.sec)
    }
}
