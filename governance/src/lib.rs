//! Membership governance ledger.
//!
//! A fixed set of members each receive a grant of voting tokens on
//! admission. Anyone may submit a proposal; members spend part of their
//! balance to vote on it, once per proposal. A proposal can be executed once
//! its accumulated weight is more than half of the total supply.
//!
//! Total supply tracks issuance: it grows by the grant on admission and
//! shrinks by the remaining balance on removal. Spending tokens on votes
//! does not change it.

pub mod error;
pub mod ledger;
pub mod member;
pub mod ops;
pub mod params;
pub mod proposal;
pub mod shared;
pub mod snapshot;

pub use error::GovernanceError;
pub use ledger::GovernanceLedger;
pub use member::Member;
pub use ops::{LedgerOp, OpOutcome, ReplayError};
pub use params::{GovernanceParams, DEFAULT_ADMISSION_GRANT};
pub use proposal::{Proposal, ProposalIndex, ProposalStatus};
pub use shared::SharedLedger;
pub use snapshot::LedgerSnapshot;
