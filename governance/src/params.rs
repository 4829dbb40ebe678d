//! Tunable governance parameters.

use dao_types::TokenAmount;
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Tokens granted to every newly admitted member.
pub const DEFAULT_ADMISSION_GRANT: TokenAmount = TokenAmount::new(100);

/// Parameters fixed for the lifetime of a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Balance every member starts with. Also the amount added to total supply
    /// on admission.
    #[serde(default = "default_admission_grant")]
    pub admission_grant: TokenAmount,
}

fn default_admission_grant() -> TokenAmount {
    DEFAULT_ADMISSION_GRANT
}

impl GovernanceParams {
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.admission_grant.is_zero() {
            return Err(GovernanceError::InvalidParams(
                "admission_grant must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            admission_grant: DEFAULT_ADMISSION_GRANT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grant_is_100() {
        let params = GovernanceParams::default();
        assert_eq!(params.admission_grant, TokenAmount::new(100));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_grant_rejected() {
        let params = GovernanceParams {
            admission_grant: TokenAmount::ZERO,
        };
        assert!(matches!(
            params.validate(),
            Err(GovernanceError::InvalidParams(_))
        ));
    }
}
