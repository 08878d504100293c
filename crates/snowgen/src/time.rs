use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH: i64 = 1_735_689_600_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: i64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: i64 = 1_420_070_400_000;

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH: i64 = 1_293_840_000_000;

/// Mastodon uses standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const MASTODON_EPOCH: i64 = 0;

/// A source of elapsed milliseconds measured from a fixed reference instant.
///
/// The generator only ever compares readings from the same source, so the
/// source must be monotonic for the lifetime of the generator. A reading below
/// one already observed is reported as a clock rollback.
///
/// Plugging in a mocked source is how tests simulate stalled, advancing, or
/// rolled-back clocks.
///
/// # Example
///
/// ```
/// use snowgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn elapsed_millis(&self) -> i64 {
///         1234
///     }
///
///     fn reference_unix_millis(&self) -> i64 {
///         0
///     }
/// }
///
/// assert_eq!(FixedTime.elapsed_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Milliseconds elapsed since the reference instant. May be negative if
    /// the source has moved behind its reference.
    fn elapsed_millis(&self) -> i64;

    /// Wall-clock Unix milliseconds at the reference instant.
    ///
    /// Read once, when a generator is constructed, to anchor the timestamp
    /// field to the configured epoch.
    fn reference_unix_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn elapsed_millis(&self) -> i64 {
        (**self).elapsed_millis()
    }

    fn reference_unix_millis(&self) -> i64 {
        (**self).reference_unix_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn elapsed_millis(&self) -> i64 {
        (**self).elapsed_millis()
    }

    fn reference_unix_millis(&self) -> i64 {
        (**self).reference_unix_millis()
    }
}

/// A monotonic time source anchored at its construction instant.
///
/// Elapsed time comes from [`Instant`], so wall-clock adjustments (NTP steps,
/// manual corrections) during the process lifetime do not affect it. The
/// wall-clock reading taken at construction is only used to align the
/// timestamp field with an epoch.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    start_unix_millis: i64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Captures the current instant as the reference point.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Uses `start` as the reference point.
    ///
    /// A `start` in the future makes [`TimeSource::elapsed_millis`] negative
    /// until that instant is reached.
    pub fn starting_at(start: Instant) -> Self {
        // A host clock before 1970 anchors at zero.
        let start_unix_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX));
        Self {
            start,
            start_unix_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn elapsed_millis(&self) -> i64 {
        let now = Instant::now();
        match now.checked_duration_since(self.start) {
            Some(ahead) => millis_i64(ahead.as_millis()),
            None => -millis_i64(self.start.duration_since(now).as_millis()),
        }
    }

    fn reference_unix_millis(&self) -> i64 {
        self.start_unix_millis
    }
}

fn millis_i64(ms: u128) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
