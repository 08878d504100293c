use core::{cmp, time::Duration};

use portable_atomic::{AtomicI64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, GeneratorConfig, IdGenStatus, MonotonicClock, Result, SnowflakeId, TimeSource,
    TimestampMode,
};

/// A lock-free Snowflake ID generator suitable for multi-threaded use.
///
/// The last issued `(tick, sequence)` pair lives in a single [`AtomicI64`];
/// every successful generation moves it forward with a compare-and-swap, so
/// any number of threads can share one generator through `&self` without
/// further locking. A tick is the elapsed millisecond count plus one, which
/// lets the zeroed initial state mean "nothing issued yet".
///
/// ## Guarantees
/// - IDs from one generator are unique
/// - IDs are non-decreasing in issuance order while the clock does not go
///   backwards
/// - A clock that goes backwards surfaces as [`Error::ClockRollback`]
///
/// Return order across threads is not call-arrival order: a caller that loses
/// the race retries and may finish after a later caller.
#[derive(Debug)]
pub struct SnowflakeGenerator<T = MonotonicClock> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicI64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicI64,
    node_id: i64,
    epoch: i64,
    mode: TimestampMode,
    base: i64,
    time: T,
}

impl SnowflakeGenerator<MonotonicClock> {
    /// Creates a generator for `node_id` whose timestamps count milliseconds
    /// since `epoch` (Unix milliseconds), using a fresh [`MonotonicClock`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] unless `0 <= node_id <= 1022`. Every
    /// epoch value is accepted.
    ///
    /// # Example
    /// ```
    /// use snowgen::{SnowflakeGenerator, DISCORD_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(4, DISCORD_EPOCH).unwrap();
    /// let id = generator.generate().unwrap();
    /// assert_eq!(id.node_id(), 4);
    /// ```
    pub fn new(node_id: i64, epoch: i64) -> Result<Self> {
        Self::with_time(node_id, epoch, TimestampMode::default(), MonotonicClock::new())
    }

    /// Creates a generator from a [`GeneratorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if the configured node ID is out of
    /// range.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Self::with_time(config.node_id, config.epoch, config.mode, MonotonicClock::new())
    }
}

impl<T: TimeSource> SnowflakeGenerator<T> {
    /// Creates a generator over an arbitrary [`TimeSource`].
    ///
    /// The time source's reference wall-clock reading is taken once, here, to
    /// anchor the timestamp field according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] unless `0 <= node_id <= 1022`.
    pub fn with_time(node_id: i64, epoch: i64, mode: TimestampMode, time: T) -> Result<Self> {
        if !(0..=SnowflakeId::MAX_NODE_ID).contains(&node_id) {
            return Err(Error::InvalidNodeId { node_id });
        }

        let base = mode.base(epoch, time.reference_unix_millis());
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicI64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicI64::new(0),
            node_id,
            epoch,
            mode,
            base,
            time,
        })
    }

    /// The node ID encoded into every generated ID.
    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    /// The configured epoch, in Unix milliseconds.
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// How the epoch is applied to the timestamp field.
    pub fn mode(&self) -> TimestampMode {
        self.mode
    }

    /// Makes a single generation attempt.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID was issued
    /// - `Ok(IdGenStatus::Pending { yield_for: 1 })`: the 4096 sequence values
    ///   of the current millisecond are used up
    /// - `Ok(IdGenStatus::Pending { yield_for: 0 })`: another caller updated
    ///   the state first; retry immediately
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRollback`] if the time source reports an elapsed time
    ///   below the highest one already issued
    /// - [`Error::TimestampOutOfRange`] if the timestamp no longer fits the
    ///   41-bit field
    ///
    /// State is left untouched on error.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll(&self) -> Result<IdGenStatus> {
        let now = self.time.elapsed_millis();
        let tick = now.saturating_add(1);

        let current = self.state.load(Ordering::Relaxed);
        let (last_tick, last_seq) = unpack(current);

        if now < 0 {
            return Err(Self::cold_clock_behind(last_tick, now));
        }

        let (next_tick, next_seq) = match tick.cmp(&last_tick) {
            cmp::Ordering::Greater => (tick, 0),
            cmp::Ordering::Equal => {
                if last_seq < SnowflakeId::MAX_SEQUENCE {
                    (tick, last_seq + 1)
                } else {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
            }
            cmp::Ordering::Less => return Err(Self::cold_clock_behind(last_tick, now)),
        };

        // Masking an oversized timestamp would wrap it and break ordering.
        let timestamp = match self.base.checked_add(now) {
            Some(ts) if (0..=SnowflakeId::TIMESTAMP_MASK).contains(&ts) => ts,
            ts => {
                return Err(Error::TimestampOutOfRange {
                    timestamp: ts.unwrap_or(i64::MAX),
                });
            }
        };

        if self
            .state
            .compare_exchange(
                current,
                pack(next_tick, next_seq),
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_err()
        {
            return Ok(IdGenStatus::Pending { yield_for: 0 });
        }

        Ok(IdGenStatus::Ready {
            id: SnowflakeId::from_components(timestamp, self.node_id, next_seq),
        })
    }

    /// Generates the next ID, waiting out sequence exhaustion.
    ///
    /// Lost races are retried immediately. When the current millisecond's
    /// sequence is used up the calling thread sleeps for about a millisecond
    /// and retries, so a call blocks at most until the clock crosses the next
    /// millisecond boundary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRollback`] if the clock moved backwards, or
    /// [`Error::TimestampOutOfRange`] once the timestamp field is exhausted.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<SnowflakeId> {
        loop {
            match self.try_poll()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { yield_for: 0 } => core::hint::spin_loop(),
                IdGenStatus::Pending { yield_for } => {
                    std::thread::sleep(Duration::from_millis(yield_for));
                }
            }
        }
    }

    /// Generates the next ID, panicking on any error.
    ///
    /// For callers that cannot continue after a clock rollback.
    ///
    /// # Panics
    ///
    /// Panics if [`Self::generate`] returns an error.
    pub fn must_generate(&self) -> SnowflakeId {
        match self.generate() {
            Ok(id) => id,
            Err(e) => panic!("snowflake generation failed: {e}"),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last_tick: i64, now_millis: i64) -> Error {
        Error::ClockRollback {
            last_millis: last_tick - 1,
            now_millis,
        }
    }
}

const fn pack(tick: i64, sequence: i64) -> i64 {
    (tick << SnowflakeId::SEQUENCE_BITS) | sequence
}

const fn unpack(state: i64) -> (i64, i64) {
    (
        state >> SnowflakeId::SEQUENCE_BITS,
        state & SnowflakeId::SEQUENCE_MASK,
    )
}
