use proptest::prelude::*;

use dao_governance::{GovernanceError, GovernanceLedger, LedgerOp, Member, Proposal};
use dao_types::{MemberAddress, Timestamp, TokenAmount};

const ADDRESSES: u64 = 5;
const MAX_PROPOSALS: usize = 4;

fn addr(n: u64) -> MemberAddress {
    MemberAddress::from_low_u64(n)
}

/// Random operations over a small address and proposal space so that
/// collisions (double admission, double votes) are frequent.
fn arb_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (1..=ADDRESSES, 0u64..10_000).prop_map(|(n, t)| LedgerOp::AdmitMember {
            member: addr(n),
            at: Timestamp::new(t),
        }),
        (1..=ADDRESSES).prop_map(|n| LedgerOp::RemoveMember { member: addr(n) }),
        (1..=ADDRESSES, "[a-z ]{0,12}").prop_map(|(n, d)| LedgerOp::CreateProposal {
            proposer: addr(n),
            description: d,
            at: Timestamp::new(1),
        }),
        (1..=ADDRESSES, 0..MAX_PROPOSALS, 0u64..130).prop_map(|(n, p, w)| {
            LedgerOp::CastVote {
                voter: addr(n),
                proposal: p,
                weight: TokenAmount::new(w),
            }
        }),
        (0..MAX_PROPOSALS).prop_map(|p| LedgerOp::ExecuteProposal { proposal: p }),
    ]
}

/// Observable state, for before/after comparison.
fn observe(
    ledger: &GovernanceLedger,
) -> (
    Vec<Member>,
    TokenAmount,
    Vec<Proposal>,
    Vec<(MemberAddress, usize)>,
) {
    (
        ledger.members().cloned().collect(),
        ledger.total_supply(),
        ledger.proposals().to_vec(),
        ledger.vote_records(),
    )
}

fn weight_cast(ledger: &GovernanceLedger) -> TokenAmount {
    TokenAmount::checked_sum(ledger.proposals().iter().map(|p| p.vote_count)).unwrap()
}

fn balances(ledger: &GovernanceLedger) -> TokenAmount {
    TokenAmount::checked_sum(ledger.members().map(|m| m.token_balance)).unwrap()
}

proptest! {
    /// Supply equals remaining balances plus all weight ever cast, and
    /// voting never moves supply.
    #[test]
    fn supply_is_conserved(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut ledger = GovernanceLedger::new();
        for op in &ops {
            let supply_before = ledger.total_supply();
            let result = ledger.apply(op);
            if matches!(op, LedgerOp::CastVote { .. }) {
                prop_assert_eq!(ledger.total_supply(), supply_before);
            }
            if let (LedgerOp::AdmitMember { .. }, Ok(_)) = (op, &result) {
                prop_assert_eq!(
                    Some(ledger.total_supply()),
                    supply_before.checked_add(TokenAmount::new(100))
                );
            }
            prop_assert_eq!(
                Some(ledger.total_supply()),
                balances(&ledger).checked_add(weight_cast(&ledger))
            );
        }
    }

    /// A rejected operation leaves every observable part of the ledger unchanged.
    #[test]
    fn failures_do_not_mutate(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut ledger = GovernanceLedger::new();
        for op in &ops {
            let before = observe(&ledger);
            if ledger.apply(op).is_err() {
                prop_assert_eq!(observe(&ledger), before);
            }
        }
    }

    /// Balances stay within [0, grant] and the index agrees with the arena.
    #[test]
    fn balances_bounded_and_index_consistent(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut ledger = GovernanceLedger::new();
        for op in &ops {
            let _ = ledger.apply(op);
            for (pos, member) in ledger.members().enumerate() {
                prop_assert!(member.token_balance <= TokenAmount::new(100));
                prop_assert_eq!(ledger.member(&member.address), Some(member));
                prop_assert_eq!(ledger.member_at(pos), Some(member));
            }
            for n in 1..=ADDRESSES {
                prop_assert_eq!(
                    ledger.is_member(&addr(n)),
                    ledger.members().any(|m| m.address == addr(n))
                );
            }
        }
    }

    /// Each (voter, proposal) pair succeeds at most once, even across removal
    /// and re-admission.
    #[test]
    fn one_vote_per_member_per_proposal(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut ledger = GovernanceLedger::new();
        let mut seen = std::collections::HashSet::new();
        for op in &ops {
            let result = ledger.apply(op);
            if let LedgerOp::CastVote { voter, proposal, .. } = op {
                if result.is_ok() {
                    prop_assert!(seen.insert((*voter, *proposal)));
                } else if seen.contains(&(*voter, *proposal)) && ledger.is_member(voter) {
                    let is_already_voted = matches!(result, Err(GovernanceError::AlreadyVoted { .. }));
                    prop_assert!(is_already_voted);
                }
            }
        }
    }

    /// Execution succeeds iff not yet executed and votes exceed half the
    /// supply; executed never reverts.
    #[test]
    fn execution_is_monotonic(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut ledger = GovernanceLedger::new();
        for op in &ops {
            let executed_before: Vec<bool> = ledger.proposals().iter().map(|p| p.executed).collect();
            let supply = ledger.total_supply();
            let target = match op {
                LedgerOp::ExecuteProposal { proposal } => ledger.proposal(*proposal).cloned(),
                _ => None,
            };
            let result = ledger.apply(op);

            if let Some(p) = target {
                let expected_ok = !p.executed && p.vote_count.raw() * 2 > supply.raw();
                prop_assert_eq!(result.is_ok(), expected_ok);
                if p.executed {
                    let is_already_executed = matches!(result, Err(GovernanceError::AlreadyExecuted(_)));
                    prop_assert!(is_already_executed);
                }
            }
            for (i, was) in executed_before.iter().enumerate() {
                if *was {
                    prop_assert!(ledger.proposals()[i].executed);
                }
            }
        }
    }

    /// A second admission without removal always fails.
    #[test]
    fn no_double_admission(n in 1..=ADDRESSES, t1 in 0u64..100, t2 in 0u64..100) {
        let mut ledger = GovernanceLedger::new();
        ledger.admit_member(addr(n), Timestamp::new(t1)).unwrap();
        prop_assert_eq!(
            ledger.admit_member(addr(n), Timestamp::new(t2)),
            Err(GovernanceError::AlreadyMember(addr(n)))
        );
        prop_assert_eq!(ledger.member(&addr(n)).map(|m| m.joined_at), Some(Timestamp::new(t1)));
        prop_assert_eq!(ledger.total_supply(), TokenAmount::new(100));
    }

    /// Removal drops the record and lowers supply by exactly the remaining balance.
    #[test]
    fn removal_is_destructive(
        ops in prop::collection::vec(arb_op(), 0..40),
        victim in 1..=ADDRESSES,
    ) {
        let mut ledger = GovernanceLedger::new();
        let _ = ledger.replay(&ops);
        if let Some(balance) = ledger.balance_of(&addr(victim)) {
            let supply = ledger.total_supply();
            let count = ledger.member_count();
            ledger.remove_member(&addr(victim)).unwrap();
            prop_assert_eq!(ledger.total_supply(), TokenAmount::new(supply.raw() - balance.raw()));
            prop_assert_eq!(ledger.member_count(), count - 1);
            prop_assert!(ledger.member(&addr(victim)).is_none());
            prop_assert!(ledger.balance_of(&addr(victim)).is_none());
        }
    }
}
