//! Thread-safe handle around a single ledger.
//!
//! Mutations take the write lock for their whole duration, so operations
//! from different callers are applied one at a time in lock order and each
//! re-validates its preconditions against the state it finds.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::GovernanceError;
use crate::ledger::GovernanceLedger;
use crate::ops::{LedgerOp, OpOutcome};

/// Cloneable, shareable ledger handle.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<GovernanceLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: GovernanceLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    // Operations validate before mutating, so a poisoned lock never guards a
    // half-applied operation.
    fn write(&self) -> RwLockWriteGuard<'_, GovernanceLedger> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, GovernanceLedger> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply one operation under the write lock.
    pub fn apply(&self, op: &LedgerOp) -> Result<OpOutcome, GovernanceError> {
        self.write().apply(op)
    }

    /// Run `f` with exclusive access.
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut GovernanceLedger) -> T) -> T {
        f(&mut self.write())
    }

    /// Run `f` with shared read access.
    pub fn read<T>(&self, f: impl FnOnce(&GovernanceLedger) -> T) -> T {
        f(&self.read_guard())
    }
}
