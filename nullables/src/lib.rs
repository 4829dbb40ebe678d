//! Nullable infrastructure for deterministic testing.
//!
//! The ledger takes `now` as an explicit input on every operation that
//! records a time. Tests feed it from a [`NullClock`] instead of the system
//! clock so runs are reproducible.

pub mod clock;

pub use clock::NullClock;
