use crate::SnowflakeId;

/// Outcome of a single generation attempt.
///
/// Returned by [`SnowflakeGenerator::try_poll`]. This allows non-blocking
/// generation loops and custom backoff strategies; [`generate`] is the
/// blocking loop built on top of it.
///
/// [`SnowflakeGenerator::try_poll`]: crate::SnowflakeGenerator::try_poll
/// [`generate`]: crate::SnowflakeGenerator::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// No ID was generated on this attempt.
    ///
    /// `yield_for` is `1` when the sequence for the current millisecond is
    /// exhausted, and `0` when another caller won the race for the state word
    /// and the attempt can be repeated immediately.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}
