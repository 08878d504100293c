use core::num::ParseIntError;
use core::str::Utf8Error;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowgen` can produce.
///
/// Generation errors ([`Error::InvalidNodeId`], [`Error::ClockRollback`],
/// [`Error::TimestampOutOfRange`]) come from [`SnowflakeGenerator`]; the rest
/// come from the text and column adapters around [`SnowflakeId`] and never
/// touch generator state.
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`SnowflakeId`]: crate::SnowflakeId
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The node id does not fit the 10-bit field, or is the reserved all-ones
    /// value `1023`.
    #[error("node id {node_id} is outside the valid range 0..=1022")]
    InvalidNodeId {
        /// The rejected node id.
        node_id: i64,
    },

    /// The time source reported an elapsed time below one already issued by
    /// this generator.
    ///
    /// This is never retried internally: waiting cannot repair a clock that
    /// moved backwards.
    #[error("clock moved backwards: last issued at {last_millis} ms, clock reads {now_millis} ms")]
    ClockRollback {
        /// Elapsed milliseconds of the last issued ID, or `-1` if none has
        /// been issued yet.
        last_millis: i64,
        /// Elapsed milliseconds reported on the failing call.
        now_millis: i64,
    },

    /// The timestamp no longer fits the 41-bit field.
    ///
    /// Masking it would wrap the timestamp and make IDs decrease, so the
    /// generator refuses instead. Reached when the epoch lies more than
    /// 2^41 ms (about 69 years) before the current time, or when a
    /// [`TimestampMode::Legacy`] base is negative.
    ///
    /// [`TimestampMode::Legacy`]: crate::TimestampMode::Legacy
    #[error("timestamp {timestamp} does not fit the 41-bit timestamp field")]
    TimestampOutOfRange {
        /// The timestamp that would have been packed.
        timestamp: i64,
    },

    /// The input is not a base-10 signed 64-bit integer.
    #[error("invalid snowflake id: {0}")]
    Parse(#[from] ParseIntError),

    /// A text or byte column did not hold UTF-8 text.
    #[error("invalid snowflake id bytes: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// A column of a type that cannot hold a snowflake id.
    #[error("incompatible scalar type for snowflake id: {kind}")]
    UnsupportedScalar {
        /// Name of the rejected column type.
        kind: String,
    },
}
