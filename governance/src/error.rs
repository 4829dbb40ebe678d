use dao_types::{MemberAddress, TokenAmount};
use thiserror::Error;

use crate::proposal::ProposalIndex;

/// A rejected ledger operation. The ledger is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("{0} is already a member")]
    AlreadyMember(MemberAddress),

    #[error("{0} is not a member")]
    NotAMember(MemberAddress),

    #[error("proposal {index} does not exist ({count} proposals)")]
    InvalidProposal { index: ProposalIndex, count: usize },

    #[error("{member} has already voted on proposal {proposal}")]
    AlreadyVoted {
        member: MemberAddress,
        proposal: ProposalIndex,
    },

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: TokenAmount, need: TokenAmount },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalIndex),

    #[error("not enough votes: {votes} is not more than half of supply {supply}")]
    InsufficientVotes {
        votes: TokenAmount,
        supply: TokenAmount,
    },

    #[error("total supply would overflow")]
    SupplyOverflow,

    #[error("invalid governance parameters: {0}")]
    InvalidParams(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}
