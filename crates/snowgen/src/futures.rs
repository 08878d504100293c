use core::time::Duration;

use crate::{IdGenStatus, Result, SnowflakeGenerator, SnowflakeId, TimeSource};

impl<T: TimeSource> SnowflakeGenerator<T> {
    /// Async counterpart of [`SnowflakeGenerator::generate`] for the
    /// [`tokio`](https://docs.rs/tokio) runtime.
    ///
    /// Sequence exhaustion awaits a Tokio timer instead of blocking the worker
    /// thread. Lost races are retried without awaiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRollback`] if the clock moved backwards.
    ///
    /// [`Error::ClockRollback`]: crate::Error::ClockRollback
    pub async fn generate_async(&self) -> Result<SnowflakeId> {
        loop {
            match self.try_poll()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { yield_for: 0 } => core::hint::spin_loop(),
                IdGenStatus::Pending { yield_for } => {
                    tokio::time::sleep(Duration::from_millis(yield_for)).await;
                }
            }
        }
    }
}
