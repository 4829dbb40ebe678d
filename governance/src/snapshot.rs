//! Ledger snapshots — capture the full governance state at a point in time.
//!
//! A snapshot lets the persistence layer store the ledger and restore it
//! without replaying every operation. The hash is computed deterministically
//! from the captured state so a restored snapshot can be checked for
//! tampering or truncation.

use serde::{Deserialize, Serialize};

use dao_types::{MemberAddress, Timestamp, TokenAmount};

use crate::error::GovernanceError;
use crate::ledger::GovernanceLedger;
use crate::member::Member;
use crate::params::GovernanceParams;
use crate::proposal::{Proposal, ProposalIndex};

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a [`GovernanceLedger`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the captured state.
    pub hash: [u8; 32],
    pub version: u32,
    /// When the snapshot was taken. Not covered by the hash.
    pub created_at: Timestamp,
    pub params: GovernanceParams,
    /// Members in current arena order.
    pub members: Vec<Member>,
    pub total_supply: TokenAmount,
    pub proposals: Vec<Proposal>,
    /// Vote records sorted by (voter, proposal).
    pub votes: Vec<(MemberAddress, ProposalIndex)>,
}

impl LedgerSnapshot {
    /// Capture the current state of `ledger`.
    pub fn capture(ledger: &GovernanceLedger, now: Timestamp) -> Self {
        let mut snap = Self {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            created_at: now,
            params: ledger.params().clone(),
            members: ledger.members().cloned().collect(),
            total_supply: ledger.total_supply(),
            proposals: ledger.proposals().to_vec(),
            votes: ledger.vote_records(),
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.params.admission_grant.raw().to_le_bytes());
        hasher.update((self.members.len() as u64).to_le_bytes());
        for member in &self.members {
            hasher.update(member.address.as_bytes());
            hasher.update(member.joined_at.as_secs().to_le_bytes());
            hasher.update(member.token_balance.raw().to_le_bytes());
        }
        hasher.update(self.total_supply.raw().to_le_bytes());
        hasher.update((self.proposals.len() as u64).to_le_bytes());
        for proposal in &self.proposals {
            hasher.update((proposal.description.len() as u64).to_le_bytes());
            hasher.update(proposal.description.as_bytes());
            hasher.update(proposal.proposer.as_bytes());
            hasher.update(proposal.created_at.as_secs().to_le_bytes());
            hasher.update(proposal.vote_count.raw().to_le_bytes());
            hasher.update([proposal.executed as u8]);
        }
        hasher.update((self.votes.len() as u64).to_le_bytes());
        for (voter, index) in &self.votes {
            hasher.update(voter.as_bytes());
            hasher.update((*index as u64).to_le_bytes());
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Whether the stored hash matches the captured state.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(self).map_err(|e| GovernanceError::Encoding(e.to_string()))
    }

    /// Deserialize a snapshot from bytes. Does not verify the hash.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GovernanceError> {
        bincode::deserialize(bytes).map_err(|e| GovernanceError::CorruptSnapshot(e.to_string()))
    }

    /// Rebuild a ledger from this snapshot after checking its hash and version.
    pub fn restore(self) -> Result<GovernanceLedger, GovernanceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(GovernanceError::CorruptSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if !self.verify() {
            return Err(GovernanceError::CorruptSnapshot("hash mismatch".into()));
        }
        GovernanceLedger::restore(
            self.params,
            self.members,
            self.total_supply,
            self.proposals,
            self.votes,
        )
    }
}

impl GovernanceLedger {
    /// Shorthand for [`LedgerSnapshot::capture`].
    pub fn snapshot(&self, now: Timestamp) -> LedgerSnapshot {
        LedgerSnapshot::capture(self, now)
    }

    /// Shorthand for [`LedgerSnapshot::restore`].
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, GovernanceError> {
        snapshot.restore()
    }
}
