//! Clock implementations for REPLID

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Source of unix wall-clock time
pub trait Clock: Send + Sync {
    /// Milliseconds since the unix epoch
    fn now_millis(&self) -> u64;

    /// Whole seconds since the unix epoch
    fn now_secs(&self) -> u64 {
        self.now_millis() / 1000
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// OS wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => since_epoch.as_millis() as u64,
            Err(e) => {
                // Clamp to the epoch rather than fail a mint
                tracing::warn!("System clock is before the unix epoch by {:?}", e.duration());
                0
            }
        }
    }
}

/// Manually driven clock
/// Time only moves when told to; cloning shares the same underlying time
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<Mutex<u64>>,
}

impl ManualClock {
    /// Create a clock frozen at `millis` since the unix epoch
    pub fn new(millis: u64) -> Self {
        ManualClock {
            millis: Arc::new(Mutex::new(millis)),
        }
    }

    /// Create a clock frozen at whole unix seconds
    pub fn from_secs(secs: u64) -> Self {
        Self::new(secs.saturating_mul(1000))
    }

    /// Create a clock frozen at the current OS time
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now_millis())
    }

    /// Jump to an absolute time (may move backwards)
    pub fn set_millis(&self, millis: u64) {
        *self.millis.lock() = millis;
    }

    /// Move forward by `dt`, returning the new time
    pub fn advance(&self, dt: Duration) -> u64 {
        let mut millis = self.millis.lock();
        *millis = millis.saturating_add(dt.as_millis() as u64);
        *millis
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        *self.millis.lock()
    }
}
