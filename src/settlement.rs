//! Settlement: closing a campaign and paying its raised value out
//!
//! Ordering is checks, effects, then the outbound transfer:
//! 1. Validate existence, ended flag and deadline
//! 2. Mark the campaign ended (its value is no longer held for it)
//! 3. Move any retained excess into the unattributed balance
//! 4. Transfer the payout to the beneficiary
//!
//! Under `PayoutPolicy::FullAmount` the payout is the whole `amount_raised`
//! and nothing is retained. Under `PayoutPolicy::CapAtGoal` the payout is
//! at most the goal and the excess becomes leftover funds.
//!
//! A re-entrant `end_campaign` during step 4 sees `ended == true` and fails
//! with `AlreadyEnded`. If the transfer fails, the checkpoint taken before
//! step 2 is restored.

use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::{exact_add, exact_sub};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::PayoutPolicy;
use crate::errors::{CampaignError, SettlementError};
use crate::events::{CampaignEnded, LedgerEvent};
use crate::ledger::Crowdfunding;
use crate::store::CampaignStore;
use crate::transfer::TransferGateway;

/// Split of a just-closed campaign's raised value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub id: CampaignId,
    pub beneficiary: AccountId,
    pub amount_raised: Decimal,
    /// Owed to the beneficiary
    pub paid: Decimal,
    /// Kept by the ledger as unattributed value
    pub retained: Decimal,
}

/// Validate and mark a campaign ended, returning how its value is split.
pub(crate) fn close_campaign(
    store: &mut CampaignStore,
    id: CampaignId,
    now: i64,
    policy: PayoutPolicy,
) -> Result<Payout, SettlementError> {
    let campaign = store.get_mut(id)?;

    if campaign.ended {
        return Err(SettlementError::AlreadyEnded { id });
    }
    if now < campaign.deadline {
        return Err(SettlementError::DeadlineNotReached {
            id,
            deadline: campaign.deadline,
        });
    }

    let amount_raised = campaign.amount_raised;
    let paid = match policy {
        PayoutPolicy::FullAmount => amount_raised,
        PayoutPolicy::CapAtGoal => amount_raised.min(campaign.goal),
    };
    let retained = exact_sub(amount_raised, paid)
        .ok_or_else(|| CampaignError::invalid("payout exceeds amount raised"))?;

    campaign.ended = true;
    Ok(Payout {
        id,
        beneficiary: campaign.beneficiary,
        amount_raised,
        paid,
        retained,
    })
}

impl Crowdfunding {
    /// Settle campaign `id`, paying its beneficiary per the configured
    /// `PayoutPolicy`.
    ///
    /// All-or-nothing: on `TransferFailed` the campaign is open again and
    /// every effect since the call began is discarded. A zero payout
    /// settles without touching the gateway.
    ///
    /// Emits `CampaignEnded`.
    pub fn end_campaign(
        &mut self,
        id: CampaignId,
        gateway: &mut dyn TransferGateway,
    ) -> Result<LedgerEvent, SettlementError> {
        let now = self.now();
        let policy = self.config().payout;
        let checkpoint = self.checkpoint();

        let payout = close_campaign(self.store_mut(), id, now, policy).map_err(|err| {
            debug!(campaign_id = %id, error = %err, "Settlement rejected");
            err
        })?;

        if !payout.retained.is_zero() {
            match exact_add(self.unattributed(), payout.retained) {
                Some(updated) => self.set_unattributed(updated),
                None => {
                    self.revert(checkpoint);
                    return Err(CampaignError::invalid("retained excess overflows balance").into());
                }
            }
        }

        if !payout.paid.is_zero() {
            if let Err(err) = gateway.transfer(self, payout.beneficiary, payout.paid) {
                warn!(
                    campaign_id = %id,
                    beneficiary = %payout.beneficiary,
                    amount = %payout.paid,
                    error = %err,
                    "Settlement transfer failed, rolling back"
                );
                self.revert(checkpoint);
                return Err(SettlementError::TransferFailed(err));
            }
        }

        info!(
            campaign_id = %id,
            beneficiary = %payout.beneficiary,
            paid = %payout.paid,
            retained = %payout.retained,
            "Campaign settled"
        );
        let event = LedgerEvent::CampaignEnded(CampaignEnded {
            id,
            amount_raised: payout.amount_raised,
            beneficiary: payout.beneficiary,
        });
        self.emit(event.clone());
        Ok(event)
    }
}
