//! Nullable clock — deterministic time for tests.

use dao_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock.
///
/// Time only advances when you tell it to.
#[derive(Debug)]
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
