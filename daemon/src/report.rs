//! Read-only view of a ledger for printing.

use serde::Serialize;

use dao_governance::{GovernanceLedger, ProposalIndex, ProposalStatus};
use dao_types::{MemberAddress, Timestamp, TokenAmount};
use dao_utils::format_duration;

#[derive(Debug, Serialize)]
pub struct LedgerReport {
    pub total_supply: TokenAmount,
    pub members: Vec<MemberReport>,
    pub proposals: Vec<ProposalReport>,
}

#[derive(Debug, Serialize)]
pub struct MemberReport {
    pub position: usize,
    pub address: MemberAddress,
    pub joined_at: Timestamp,
    /// Membership age relative to the report time, e.g. "3h 12m".
    pub member_for: String,
    pub token_balance: TokenAmount,
    pub voted_on: Vec<ProposalIndex>,
}

#[derive(Debug, Serialize)]
pub struct ProposalReport {
    pub index: ProposalIndex,
    pub description: String,
    pub proposer: MemberAddress,
    pub vote_count: TokenAmount,
    pub status: ProposalStatus,
}

impl LedgerReport {
    pub fn build(ledger: &GovernanceLedger, as_of: Timestamp) -> Self {
        let members = ledger
            .members()
            .enumerate()
            .map(|(position, m)| MemberReport {
                position,
                address: m.address,
                joined_at: m.joined_at,
                member_for: format_duration(m.joined_at.elapsed_since(as_of)),
                token_balance: m.token_balance,
                voted_on: ledger.votes_of(&m.address),
            })
            .collect();
        let total_supply = ledger.total_supply();
        let proposals = ledger
            .proposals()
            .iter()
            .enumerate()
            .map(|(index, p)| ProposalReport {
                index,
                description: p.description.clone(),
                proposer: p.proposer,
                vote_count: p.vote_count,
                status: p.status(total_supply),
            })
            .collect();
        Self {
            total_supply,
            members,
            proposals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_ledger() {
        let a = MemberAddress::from_low_u64(1);
        let b = MemberAddress::from_low_u64(2);
        let mut ledger = GovernanceLedger::new();
        ledger.admit_member(a, Timestamp::new(1_000)).unwrap();
        ledger.admit_member(b, Timestamp::new(1_000)).unwrap();
        ledger.create_proposal(a, "Buy snacks", Timestamp::new(1_100));
        ledger.cast_vote(&a, 0, TokenAmount::new(100)).unwrap();
        ledger.cast_vote(&b, 0, TokenAmount::new(1)).unwrap();

        let report = LedgerReport::build(&ledger, Timestamp::new(4_660));
        assert_eq!(report.total_supply, TokenAmount::new(200));
        assert_eq!(report.members.len(), 2);
        assert_eq!(report.members[0].member_for, "1h 1m");
        assert_eq!(report.members[1].token_balance, TokenAmount::new(99));
        assert_eq!(report.members[0].voted_on, vec![0]);
        assert_eq!(report.proposals[0].status, ProposalStatus::Passed);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["proposals"][0]["status"], "Passed");
        assert_eq!(
            json["members"][0]["address"],
            "0x0000000000000000000000000000000000000001"
        );
    }
}
