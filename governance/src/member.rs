//! Member records.

use dao_types::{MemberAddress, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// A current member of the organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub address: MemberAddress,
    /// Set once at admission.
    pub joined_at: Timestamp,
    /// Remaining spendable voting weight. Only ever decreases.
    pub token_balance: TokenAmount,
}

impl Member {
    pub fn new(address: MemberAddress, joined_at: Timestamp, grant: TokenAmount) -> Self {
        Self {
            address,
            joined_at,
            token_balance: grant,
        }
    }
}
