//! Ledger operations as data, for logging and replay.
//!
//! A persistence layer records each accepted operation with its caller and
//! time, and rebuilds the ledger by replaying the log in order.

use dao_types::{MemberAddress, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::GovernanceError;
use crate::ledger::GovernanceLedger;
use crate::proposal::ProposalIndex;

/// One of the five mutating entry points, with its explicit inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerOp {
    AdmitMember {
        member: MemberAddress,
        at: Timestamp,
    },
    RemoveMember {
        member: MemberAddress,
    },
    CreateProposal {
        proposer: MemberAddress,
        description: String,
        at: Timestamp,
    },
    CastVote {
        voter: MemberAddress,
        proposal: ProposalIndex,
        weight: TokenAmount,
    },
    ExecuteProposal {
        proposal: ProposalIndex,
    },
}

impl LedgerOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdmitMember { .. } => "admit_member",
            Self::RemoveMember { .. } => "remove_member",
            Self::CreateProposal { .. } => "create_proposal",
            Self::CastVote { .. } => "cast_vote",
            Self::ExecuteProposal { .. } => "execute_proposal",
        }
    }
}

/// What an applied operation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpOutcome {
    Done,
    ProposalCreated(ProposalIndex),
}

/// Replay stopped at the first rejected operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation {position} ({op}) rejected: {source}")]
pub struct ReplayError {
    /// Zero-based position of the failing operation in the log.
    pub position: usize,
    pub op: &'static str,
    #[source]
    pub source: GovernanceError,
}

impl GovernanceLedger {
    /// Dispatch a single operation.
    pub fn apply(&mut self, op: &LedgerOp) -> Result<OpOutcome, GovernanceError> {
        match op {
            LedgerOp::AdmitMember { member, at } => {
                self.admit_member(*member, *at).map(|_| OpOutcome::Done)
            }
            LedgerOp::RemoveMember { member } => {
                self.remove_member(member).map(|_| OpOutcome::Done)
            }
            LedgerOp::CreateProposal {
                proposer,
                description,
                at,
            } => Ok(OpOutcome::ProposalCreated(self.create_proposal(
                *proposer,
                description.clone(),
                *at,
            ))),
            LedgerOp::CastVote {
                voter,
                proposal,
                weight,
            } => self
                .cast_vote(voter, *proposal, *weight)
                .map(|_| OpOutcome::Done),
            LedgerOp::ExecuteProposal { proposal } => {
                self.execute_proposal(*proposal).map(|_| OpOutcome::Done)
            }
        }
    }

    /// Apply `ops` in order, stopping at the first rejection.
    ///
    /// Operations before the failing one stay applied; the failing one has
    /// no effect. Returns how many operations were applied.
    pub fn replay<'a, I>(&mut self, ops: I) -> Result<usize, ReplayError>
    where
        I: IntoIterator<Item = &'a LedgerOp>,
    {
        let mut applied = 0;
        for (position, op) in ops.into_iter().enumerate() {
            if let Err(source) = self.apply(op) {
                warn!(position, op = op.name(), error = %source, "replay stopped");
                return Err(ReplayError {
                    position,
                    op: op.name(),
                    source,
                });
            }
            applied += 1;
        }
        Ok(applied)
    }
}
