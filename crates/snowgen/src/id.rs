use core::{fmt, str::FromStr};

use crate::Error;

/// A 64-bit Snowflake ID stored as a signed integer.
///
/// - 1 bit reserved (keeps generated values non-negative)
/// - 41 bits timestamp (ms since the generator's epoch)
/// - 10 bits node ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21          12 11             0
///              +--------------+----------------+--------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | node ID (10) | sequence (12) |
///              +--------------+----------------+--------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB --------->|
/// ```
///
/// Any `i64` can be wrapped with [`SnowflakeId::from_raw`], which allows
/// ingesting values issued elsewhere. Ordering and equality are those of the
/// raw integer.
///
/// # Example
///
/// ```
/// use snowgen::SnowflakeId;
///
/// let id = SnowflakeId::from_components(1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.node_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// assert_eq!(id.to_string().parse::<SnowflakeId>().unwrap(), id);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 41;

    /// Width of the node ID field.
    pub const NODE_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for the 41-bit timestamp field. Occupies bits 22 through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for the 10-bit node ID field. Occupies bits 12 through 21.
    pub const NODE_ID_MASK: i64 = (1 << Self::NODE_ID_BITS) - 1;

    /// Bitmask for the 12-bit sequence field. Occupies bits 0 through 11.
    pub const SEQUENCE_MASK: i64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::NODE_ID_SHIFT + Self::NODE_ID_BITS;

    /// Number of bits to shift the node ID to its position (bit 12).
    pub const NODE_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Largest node ID a generator accepts. The all-ones pattern is reserved.
    pub const MAX_NODE_ID: i64 = Self::NODE_ID_MASK - 1;

    /// Largest sequence value within one millisecond.
    pub const MAX_SEQUENCE: i64 = Self::SEQUENCE_MASK;

    /// Wraps a raw integer without validation.
    pub const fn from_raw(id: i64) -> Self {
        Self { id }
    }

    /// Packs the three components, masking each to its field width.
    pub const fn from_components(timestamp: i64, node_id: i64, sequence: i64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let node_id = (node_id & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let sequence = sequence & Self::SEQUENCE_MASK;
        Self {
            id: timestamp | node_id | sequence,
        }
    }

    /// Returns the raw integer.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Returns the timestamp field, relative to the generator's epoch.
    ///
    /// This is the raw `value >> 22`. Add the epoch the generator was built
    /// with to get Unix milliseconds, or use [`SnowflakeId::unix_millis`].
    pub const fn timestamp(&self) -> i64 {
        self.id >> Self::TIMESTAMP_SHIFT
    }

    /// Returns the timestamp as Unix milliseconds, given the epoch the
    /// generator was configured with.
    pub const fn unix_millis(&self, epoch: i64) -> i64 {
        self.timestamp().wrapping_add(epoch)
    }

    /// Returns the node ID field.
    pub const fn node_id(&self) -> i64 {
        (self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK
    }

    /// Returns the sequence field.
    pub const fn sequence(&self) -> i64 {
        self.id & Self::SEQUENCE_MASK
    }

    /// Returns `true` if the reserved sign bit is clear, which holds for every
    /// generated ID.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }
}

impl From<i64> for SnowflakeId {
    fn from(id: i64) -> Self {
        Self::from_raw(id)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl FromStr for SnowflakeId {
    type Err = Error;

    /// Parses the canonical decimal representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_raw(s.parse::<i64>()?))
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &format_args!("0x{:016x} ({})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
