//! Proposals and their lifecycle.

use dao_types::{MemberAddress, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// Position of a proposal in creation order. Permanent once assigned.
pub type ProposalIndex = usize;

/// Derived lifecycle view of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes, threshold not yet crossed.
    Open,
    /// Threshold crossed against the current supply; awaiting an explicit execute.
    Passed,
    /// Terminal.
    Executed,
}

/// A described item accumulating vote weight until executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    /// Who submitted it. Any address may propose.
    pub proposer: MemberAddress,
    pub created_at: Timestamp,
    /// Sum of vote weights cast. Never decreases.
    pub vote_count: TokenAmount,
    pub executed: bool,
}

impl Proposal {
    pub fn new(description: String, proposer: MemberAddress, created_at: Timestamp) -> Self {
        Self {
            description,
            proposer,
            created_at,
            vote_count: TokenAmount::ZERO,
            executed: false,
        }
    }

    /// Whether the vote count is more than half of `total_supply`.
    pub fn has_majority(&self, total_supply: TokenAmount) -> bool {
        self.vote_count.is_majority_of(total_supply)
    }

    pub fn status(&self, total_supply: TokenAmount) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if self.has_majority(total_supply) {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Open
        }
    }
}
