//! Voting token amounts.
//!
//! Amounts are whole, unsigned token units stored as `u64`. Tokens are
//! never fractional and never negative; every subtraction is checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of voting tokens.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Total of `amounts`, or `None` if it does not fit.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, x| acc.checked_add(x))
    }

    /// Whether `self` is strictly more than half of `total`.
    ///
    /// Compared as `2 * self > total` so odd totals need no rounding.
    pub fn is_majority_of(self, total: Self) -> bool {
        match self.0.checked_mul(2) {
            Some(doubled) => doubled > total.0,
            None => true,
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
