//! Fundamental types for the membership DAO ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! member addresses, token amounts, timestamps, and the shared error type.

pub mod address;
pub mod amount;
pub mod error;
pub mod time;

pub use address::MemberAddress;
pub use amount::TokenAmount;
pub use error::DaoError;
pub use time::Timestamp;
