//! Ledger events
//!
//! Events are immutable records emitted by committed operations. An
//! operation that rolls back emits nothing.

use crowdfund_types::ids::{AccountId, CampaignId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A campaign was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub id: CampaignId,
    pub goal: Decimal,
    pub deadline: i64,
}

/// A donation was applied to a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceived {
    pub id: CampaignId,
    pub donor: AccountId,
    pub amount: Decimal,
    pub new_total: Decimal,
}

/// A campaign was settled and its raised value paid to the beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignEnded {
    pub id: CampaignId,
    pub amount_raised: Decimal,
    pub beneficiary: AccountId,
}

/// Leftover funds were paid to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub amount: Decimal,
    pub owner: AccountId,
}

/// Value arrived outside of any campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsReceived {
    pub from: AccountId,
    pub amount: Decimal,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    CampaignCreated(CampaignCreated),
    DonationReceived(DonationReceived),
    CampaignEnded(CampaignEnded),
    FundsWithdrawn(FundsWithdrawn),
    FundsReceived(FundsReceived),
}

impl LedgerEvent {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            LedgerEvent::CampaignCreated(_) => "campaign_created",
            LedgerEvent::DonationReceived(_) => "donation_received",
            LedgerEvent::CampaignEnded(_) => "campaign_ended",
            LedgerEvent::FundsWithdrawn(_) => "funds_withdrawn",
            LedgerEvent::FundsReceived(_) => "funds_received",
        }
    }

    /// The campaign this event concerns, if any.
    pub fn campaign_id(&self) -> Option<CampaignId> {
        match self {
            LedgerEvent::CampaignCreated(e) => Some(e.id),
            LedgerEvent::DonationReceived(e) => Some(e.id),
            LedgerEvent::CampaignEnded(e) => Some(e.id),
            LedgerEvent::FundsWithdrawn(_) | LedgerEvent::FundsReceived(_) => None,
        }
    }
}
