//! The governance ledger — members, balances, proposals and vote records.
//!
//! Every mutating operation validates all of its preconditions before it
//! touches any state, so a returned error always leaves the ledger exactly
//! as it was.

use std::collections::{HashMap, HashSet};

use dao_types::{MemberAddress, Timestamp, TokenAmount};
use tracing::{debug, info};

use crate::error::GovernanceError;
use crate::member::Member;
use crate::params::GovernanceParams;
use crate::proposal::{Proposal, ProposalIndex, ProposalStatus};

/// Authoritative in-memory state of a single organization.
#[derive(Clone, Debug)]
pub struct GovernanceLedger {
    params: GovernanceParams,
    /// Dense member arena. Order changes on removal (swap with last).
    members: Vec<Member>,
    /// address → position in `members`.
    index: HashMap<MemberAddress, usize>,
    /// Sum of grants issued minus balances removed with their members.
    total_supply: TokenAmount,
    proposals: Vec<Proposal>,
    /// (voter, proposal) pairs that have voted. Never cleared, even on removal.
    votes: HashSet<(MemberAddress, ProposalIndex)>,
}

impl GovernanceLedger {
    /// Create an empty ledger with the default parameters.
    pub fn new() -> Self {
        Self::from_parts(GovernanceParams::default())
    }

    /// Create an empty ledger with custom parameters.
    pub fn with_params(params: GovernanceParams) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self::from_parts(params))
    }

    fn from_parts(params: GovernanceParams) -> Self {
        Self {
            params,
            members: Vec::new(),
            index: HashMap::new(),
            total_supply: TokenAmount::ZERO,
            proposals: Vec::new(),
            votes: HashSet::new(),
        }
    }

    // ── Mutating operations ────────────────────────────────────────────

    /// Admit `address` with a fresh grant.
    pub fn admit_member(
        &mut self,
        address: MemberAddress,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if self.index.contains_key(&address) {
            debug!(member = %address, "admission rejected: already a member");
            return Err(GovernanceError::AlreadyMember(address));
        }
        let grant = self.params.admission_grant;
        let new_supply = self
            .total_supply
            .checked_add(grant)
            .ok_or(GovernanceError::SupplyOverflow)?;

        self.index.insert(address, self.members.len());
        self.members.push(Member::new(address, now, grant));
        self.total_supply = new_supply;

        info!(member = %address, grant = %grant, supply = %self.total_supply, "member admitted");
        Ok(())
    }

    /// Remove `address`, burning its remaining balance from the supply.
    ///
    /// The last member is moved into the vacated slot. Vote records are kept.
    pub fn remove_member(&mut self, address: &MemberAddress) -> Result<Member, GovernanceError> {
        let Some(pos) = self.index.remove(address) else {
            debug!(member = %address, "removal rejected: not a member");
            return Err(GovernanceError::NotAMember(*address));
        };

        let removed = self.members.swap_remove(pos);
        if let Some(moved) = self.members.get(pos) {
            self.index.insert(moved.address, pos);
        }
        // The removed balance was counted in supply at admission and only
        // ever shrank, so this cannot underflow.
        self.total_supply = self.total_supply.saturating_sub(removed.token_balance);

        info!(
            member = %address,
            burned = %removed.token_balance,
            supply = %self.total_supply,
            "member removed"
        );
        Ok(removed)
    }

    /// Append a proposal. Any address may propose; returns the new index.
    pub fn create_proposal(
        &mut self,
        proposer: MemberAddress,
        description: impl Into<String>,
        now: Timestamp,
    ) -> ProposalIndex {
        let index = self.proposals.len();
        self.proposals
            .push(Proposal::new(description.into(), proposer, now));
        debug!(proposal = index, proposer = %proposer, "proposal created");
        index
    }

    /// Spend `weight` of `voter`'s balance on proposal `index`.
    ///
    /// Checks, in order: membership, proposal exists, not yet voted, balance.
    pub fn cast_vote(
        &mut self,
        voter: &MemberAddress,
        index: ProposalIndex,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        let pos = *self
            .index
            .get(voter)
            .ok_or(GovernanceError::NotAMember(*voter))?;
        let count = self.proposals.len();
        if index >= count {
            return Err(GovernanceError::InvalidProposal { index, count });
        }
        if self.votes.contains(&(*voter, index)) {
            debug!(member = %voter, proposal = index, "vote rejected: already voted");
            return Err(GovernanceError::AlreadyVoted {
                member: *voter,
                proposal: index,
            });
        }
        let member = &self.members[pos];
        let remaining = member.token_balance.checked_sub(weight).ok_or(
            GovernanceError::InsufficientBalance {
                have: member.token_balance,
                need: weight,
            },
        )?;
        let proposal = &self.proposals[index];
        let new_count = proposal
            .vote_count
            .checked_add(weight)
            .ok_or(GovernanceError::SupplyOverflow)?;

        self.members[pos].token_balance = remaining;
        self.proposals[index].vote_count = new_count;
        self.votes.insert((*voter, index));

        debug!(
            member = %voter,
            proposal = index,
            weight = %weight,
            vote_count = %new_count,
            "vote cast"
        );
        Ok(())
    }

    /// Mark proposal `index` executed if its votes exceed half the current supply.
    pub fn execute_proposal(&mut self, index: ProposalIndex) -> Result<(), GovernanceError> {
        let count = self.proposals.len();
        let total_supply = self.total_supply;
        let proposal = self
            .proposals
            .get_mut(index)
            .ok_or(GovernanceError::InvalidProposal { index, count })?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(index));
        }
        if !proposal.has_majority(total_supply) {
            debug!(
                proposal = index,
                votes = %proposal.vote_count,
                supply = %total_supply,
                "execution rejected: not enough votes"
            );
            return Err(GovernanceError::InsufficientVotes {
                votes: proposal.vote_count,
                supply: total_supply,
            });
        }

        proposal.executed = true;
        info!(
            proposal = index,
            votes = %proposal.vote_count,
            supply = %total_supply,
            "proposal executed"
        );
        Ok(())
    }

    // ── Read accessors ─────────────────────────────────────────────────

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Look up a current member by address.
    pub fn member(&self, address: &MemberAddress) -> Option<&Member> {
        self.index.get(address).map(|&pos| &self.members[pos])
    }

    /// Look up a member by position. Positions are not stable across removals.
    pub fn member_at(&self, position: usize) -> Option<&Member> {
        self.members.get(position)
    }

    /// Current members in arena order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, address: &MemberAddress) -> bool {
        self.index.contains_key(address)
    }

    /// Remaining balance of a current member; `None` for non-members.
    pub fn balance_of(&self, address: &MemberAddress) -> Option<TokenAmount> {
        self.member(address).map(|m| m.token_balance)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn proposal(&self, index: ProposalIndex) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Lifecycle view of proposal `index` against the current supply.
    pub fn proposal_status(&self, index: ProposalIndex) -> Option<ProposalStatus> {
        self.proposals
            .get(index)
            .map(|p| p.status(self.total_supply))
    }

    /// Whether proposal `index` could be executed right now.
    pub fn threshold_reached(&self, index: ProposalIndex) -> bool {
        self.proposal_status(index) == Some(ProposalStatus::Passed)
    }

    /// Whether `address` has voted on proposal `index`. Survives removal.
    pub fn has_voted(&self, address: &MemberAddress, index: ProposalIndex) -> bool {
        self.votes.contains(&(*address, index))
    }

    /// Proposals `address` has voted on, in ascending order.
    pub fn votes_of(&self, address: &MemberAddress) -> Vec<ProposalIndex> {
        let mut indices: Vec<_> = self
            .votes
            .iter()
            .filter(|(voter, _)| voter == address)
            .map(|&(_, index)| index)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// All vote records, sorted by (voter, proposal).
    pub fn vote_records(&self) -> Vec<(MemberAddress, ProposalIndex)> {
        let mut records: Vec<_> = self.votes.iter().copied().collect();
        records.sort_unstable();
        records
    }

    // ── Snapshot support ───────────────────────────────────────────────

    /// Rebuild a ledger from its raw parts, re-deriving the address index.
    pub(crate) fn restore(
        params: GovernanceParams,
        members: Vec<Member>,
        total_supply: TokenAmount,
        proposals: Vec<Proposal>,
        votes: Vec<(MemberAddress, ProposalIndex)>,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        let mut index = HashMap::with_capacity(members.len());
        for (pos, member) in members.iter().enumerate() {
            if member.token_balance > params.admission_grant {
                return Err(GovernanceError::CorruptSnapshot(format!(
                    "{} holds {} which exceeds the grant",
                    member.address, member.token_balance
                )));
            }
            if index.insert(member.address, pos).is_some() {
                return Err(GovernanceError::CorruptSnapshot(format!(
                    "duplicate member {}",
                    member.address
                )));
            }
        }
        if let Some(&(voter, proposal)) = votes.iter().find(|(_, p)| *p >= proposals.len()) {
            return Err(GovernanceError::CorruptSnapshot(format!(
                "vote by {voter} on missing proposal {proposal}"
            )));
        }
        let record_count = votes.len();
        let votes: HashSet<_> = votes.into_iter().collect();
        if votes.len() != record_count {
            return Err(GovernanceError::CorruptSnapshot("duplicate vote records".into()));
        }
        let mut backing = vec![0u64; proposals.len()];
        for &(_, proposal) in &votes {
            backing[proposal] += 1;
        }
        for (i, proposal) in proposals.iter().enumerate() {
            // Each vote record is worth at most one grant.
            let ceiling = params.admission_grant.raw().checked_mul(backing[i]);
            if ceiling.is_some_and(|c| proposal.vote_count.raw() > c) {
                return Err(GovernanceError::CorruptSnapshot(format!(
                    "proposal {i} holds {} from {} vote records",
                    proposal.vote_count, backing[i]
                )));
            }
            if proposal.executed && proposal.vote_count.is_zero() {
                return Err(GovernanceError::CorruptSnapshot(format!(
                    "proposal {i} executed without votes"
                )));
            }
        }
        let balances = TokenAmount::checked_sum(members.iter().map(|m| m.token_balance));
        let cast = TokenAmount::checked_sum(proposals.iter().map(|p| p.vote_count));
        let accounted = balances
            .zip(cast)
            .and_then(|(balances, cast)| balances.checked_add(cast))
            .ok_or_else(|| {
                GovernanceError::CorruptSnapshot("balances and votes overflow".into())
            })?;
        if accounted != total_supply {
            return Err(GovernanceError::CorruptSnapshot(format!(
                "balances and votes sum to {accounted}, total supply is {total_supply}"
            )));
        }
        Ok(Self {
            params,
            members,
            index,
            total_supply,
            proposals,
            votes,
        })
    }
}

impl Default for GovernanceLedger {
    fn default() -> Self {
        Self::new()
    }
}
