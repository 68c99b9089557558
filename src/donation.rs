//! Donation processing
//!
//! Donations are retained by the ledger and accumulate on the campaign
//! until it is settled. They are not capped at the goal.

use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::exact_add;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::errors::DonationError;
use crate::events::{DonationReceived, LedgerEvent};
use crate::ledger::Crowdfunding;
use crate::store::CampaignStore;

/// Validate and apply a donation, returning the new raised total.
///
/// Checks run in order: existence, ended flag, deadline, amount, then
/// overflow of both the campaign total and the ledger's `held` balance.
/// Nothing is written unless all of them pass.
pub(crate) fn apply_donation(
    store: &mut CampaignStore,
    id: CampaignId,
    amount: Decimal,
    now: i64,
    held: Decimal,
) -> Result<Decimal, DonationError> {
    let campaign = store.get_mut(id)?;

    if campaign.ended {
        return Err(DonationError::CampaignEnded { id });
    }
    if now >= campaign.deadline {
        return Err(DonationError::DeadlinePassed {
            id,
            deadline: campaign.deadline,
        });
    }
    if amount.is_zero() {
        return Err(DonationError::ZeroDonation);
    }
    if amount.is_sign_negative() {
        return Err(DonationError::InvalidParameter {
            reason: format!("donation amount {amount} is negative"),
        });
    }

    let new_total = exact_add(campaign.amount_raised, amount).ok_or_else(|| {
        DonationError::InvalidParameter {
            reason: format!("donation {amount} cannot be added exactly to amount raised"),
        }
    })?;
    if exact_add(held, amount).is_none() {
        return Err(DonationError::InvalidParameter {
            reason: "donation overflows held balance".to_string(),
        });
    }

    campaign.amount_raised = new_total;
    Ok(new_total)
}

impl Crowdfunding {
    /// Donate `amount` from `donor` to campaign `id`.
    ///
    /// Emits `DonationReceived`.
    pub fn donate(
        &mut self,
        donor: AccountId,
        id: CampaignId,
        amount: Decimal,
    ) -> Result<LedgerEvent, DonationError> {
        let now = self.now();
        let held = self.held_balance()?;
        let new_total = apply_donation(self.store_mut(), id, amount, now, held).map_err(|err| {
            debug!(campaign_id = %id, donor = %donor, %amount, error = %err, "Donation rejected");
            err
        })?;

        info!(campaign_id = %id, donor = %donor, %amount, %new_total, "Donation received");
        let event = LedgerEvent::DonationReceived(DonationReceived {
            id,
            donor,
            amount,
            new_total,
        });
        self.emit(event.clone());
        Ok(event)
    }
}
