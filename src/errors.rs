//! Ledger error types
//!
//! One taxonomy per component: campaign store, donations, settlement,
//! treasury and the transfer gateway. `LedgerError` wraps them all for
//! the command dispatcher.

use crowdfund_types::ids::{AccountId, CampaignId};
use thiserror::Error;

/// Campaign store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CampaignError {
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Campaign not found: {id}")]
    NotFound { id: CampaignId },
}

impl CampaignError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Donation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DonationError {
    #[error("Campaign {id} has already ended")]
    CampaignEnded { id: CampaignId },

    #[error("Campaign {id} deadline passed at {deadline}")]
    DeadlinePassed { id: CampaignId, deadline: i64 },

    #[error("Donation amount must be positive")]
    ZeroDonation,

    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),
}

/// Settlement errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("Campaign {id} already ended")]
    AlreadyEnded { id: CampaignId },

    #[error("Campaign {id} deadline not reached: settles at {deadline}")]
    DeadlineNotReached { id: CampaignId, deadline: i64 },

    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),
}

/// Owner treasury errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreasuryError {
    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: AccountId },

    #[error("No leftover funds to withdraw")]
    NothingToWithdraw,

    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),
}

/// Errors raised by a transfer gateway while paying out value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Recipient {recipient} rejected the transfer")]
    Rejected { recipient: AccountId },

    #[error("Arithmetic overflow crediting {recipient}")]
    Overflow { recipient: AccountId },
}

/// Top-level ledger error returned by command dispatch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),

    #[error("Donation error: {0}")]
    Donation(#[from] DonationError),

    #[error("Settlement error: {0}")]
    Settlement(#[from] SettlementError),

    #[error("Treasury error: {0}")]
    Treasury(#[from] TreasuryError),
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Owner must not be the nil account")]
    NilOwner,
}

/// Snapshot export/restore errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Snapshot owner {found} does not match configured owner {expected}")]
    OwnerMismatch { expected: AccountId, found: AccountId },

    #[error("Corrupt snapshot: {reason}")]
    Corrupt { reason: String },

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure { expected: String, actual: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_error_display() {
        let err = CampaignError::NotFound {
            id: CampaignId::new(9),
        };
        assert_eq!(err.to_string(), "Campaign not found: 9");
    }

    #[test]
    fn test_donation_error_from_campaign() {
        let err: DonationError = CampaignError::NotFound {
            id: CampaignId::new(1),
        }
        .into();
        assert!(matches!(err, DonationError::Campaign(CampaignError::NotFound { .. })));
    }

    #[test]
    fn test_settlement_error_from_transfer() {
        let recipient = AccountId::new();
        let err: SettlementError = TransferError::Rejected { recipient }.into();
        assert!(err.to_string().contains(&recipient.to_string()));
    }

    #[test]
    fn test_ledger_error_wraps_treasury() {
        let err: LedgerError = TreasuryError::NothingToWithdraw.into();
        assert_eq!(
            err.to_string(),
            "Treasury error: No leftover funds to withdraw"
        );
    }
}
