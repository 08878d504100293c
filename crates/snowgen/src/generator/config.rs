use crate::{CUSTOM_EPOCH, Result, SnowflakeGenerator};

/// How the configured epoch maps onto the timestamp field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimestampMode {
    /// The timestamp field holds milliseconds since the epoch.
    ///
    /// The generator reads the wall clock once at construction; from then on
    /// time advances from the monotonic source only. An epoch later than the
    /// construction time anchors at zero.
    #[default]
    Epoch,

    /// Bit-compatible with the historical packing: the timestamp field holds
    /// `epoch / 1000` plus the milliseconds elapsed since construction.
    ///
    /// Only use this to keep new IDs comparable with IDs already issued under
    /// that scheme. Moving a deployment from `Legacy` to `Epoch` keeps IDs
    /// unique (new IDs sort above old ones) but changes what the timestamp
    /// field means.
    Legacy,
}

impl TimestampMode {
    /// Timestamp field value at the generator's reference instant.
    pub(crate) fn base(self, epoch: i64, reference_unix_millis: i64) -> i64 {
        match self {
            Self::Epoch => reference_unix_millis.saturating_sub(epoch).max(0),
            Self::Legacy => epoch / 1000,
        }
    }
}

/// Per-instance generator settings.
///
/// Loading these from a file or the environment belongs to the surrounding
/// deployment; with the `serde` feature any serde format works, and omitted
/// fields take their defaults.
///
/// # Example
///
/// ```
/// use snowgen::{GeneratorConfig, TimestampMode, DISCORD_EPOCH};
///
/// let generator = GeneratorConfig::new(7)
///     .with_epoch(DISCORD_EPOCH)
///     .with_mode(TimestampMode::Epoch)
///     .build()
///     .unwrap();
///
/// assert_eq!(generator.generate().unwrap().node_id(), 7);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Node ID encoded into every ID, `0..=1022`.
    pub node_id: i64,
    /// Zero point of the timestamp field, in Unix milliseconds.
    pub epoch: i64,
    /// How `epoch` is applied.
    pub mode: TimestampMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_id: 0,
            epoch: CUSTOM_EPOCH,
            mode: TimestampMode::Epoch,
        }
    }
}

impl GeneratorConfig {
    /// Settings for `node_id` with the default epoch and mode.
    pub fn new(node_id: i64) -> Self {
        Self {
            node_id,
            ..Self::default()
        }
    }

    /// Sets the epoch, in Unix milliseconds.
    #[must_use]
    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets how the epoch is applied to the timestamp field.
    #[must_use]
    pub fn with_mode(mut self, mode: TimestampMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds a generator backed by a fresh [`MonotonicClock`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` is out of range.
    ///
    /// [`MonotonicClock`]: crate::MonotonicClock
    /// [`Error::InvalidNodeId`]: crate::Error::InvalidNodeId
    pub fn build(&self) -> Result<SnowflakeGenerator> {
        SnowflakeGenerator::from_config(self)
    }
}
