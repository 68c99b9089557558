//! Owner treasury: held balance, unattributed deposits, leftover withdrawal
//!
//! The held balance is derived: open campaign obligations plus value that
//! arrived outside any campaign. Leftover funds are whatever part of the
//! held balance no open campaign can claim.

use crowdfund_types::ids::AccountId;
use crowdfund_types::numeric::{exact_add, exact_sub, is_positive};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::errors::{CampaignError, TreasuryError};
use crate::events::{FundsReceived, FundsWithdrawn, LedgerEvent};
use crate::ledger::Crowdfunding;
use crate::transfer::TransferGateway;

impl Crowdfunding {
    /// Total value currently held by the ledger.
    pub fn held_balance(&self) -> Result<Decimal, CampaignError> {
        exact_add(self.store().open_obligations()?, self.unattributed())
            .ok_or_else(|| CampaignError::invalid("held balance overflows"))
    }

    /// Held balance minus the `amount_raised` of every open campaign.
    pub fn leftover_funds(&self) -> Result<Decimal, CampaignError> {
        let held = self.held_balance()?;
        let obligations = self.store().open_obligations()?;
        exact_sub(held, obligations)
            .filter(|leftover| *leftover >= Decimal::ZERO)
            .ok_or_else(|| CampaignError::invalid("open obligations exceed held balance"))
    }

    /// Accept value sent to the ledger outside of any campaign.
    ///
    /// Emits `FundsReceived`.
    pub fn receive_funds(
        &mut self,
        from: AccountId,
        amount: Decimal,
    ) -> Result<LedgerEvent, TreasuryError> {
        if !is_positive(amount) {
            debug!(from = %from, %amount, "Deposit rejected");
            return Err(TreasuryError::InvalidParameter {
                reason: format!("deposit amount {amount} must be positive"),
            });
        }
        let held = self.held_balance()?;
        let unattributed = self.unattributed();
        let updated = match (exact_add(held, amount), exact_add(unattributed, amount)) {
            (Some(_), Some(updated)) => updated,
            _ => {
                return Err(TreasuryError::InvalidParameter {
                    reason: "deposit cannot be added exactly to held balance".to_string(),
                })
            }
        };
        self.set_unattributed(updated);

        info!(from = %from, %amount, "Unattributed funds received");
        let event = LedgerEvent::FundsReceived(FundsReceived { from, amount });
        self.emit(event.clone());
        Ok(event)
    }

    /// Pay every unattributed unit of value to the owner.
    ///
    /// Only the owner may call this. The leftover is debited before the
    /// transfer, so a re-entrant withdrawal finds nothing to take; a failed
    /// transfer restores it.
    ///
    /// Emits `FundsWithdrawn`.
    pub fn withdraw_leftover_funds(
        &mut self,
        caller: AccountId,
        gateway: &mut dyn TransferGateway,
    ) -> Result<LedgerEvent, TreasuryError> {
        if !self.ownable().is_owner(&caller) {
            warn!(caller = %caller, "Unauthorized leftover withdrawal attempt");
            return Err(TreasuryError::Unauthorized { caller });
        }

        let leftover = self.leftover_funds()?;
        if leftover.is_zero() {
            debug!("No leftover funds to withdraw");
            return Err(TreasuryError::NothingToWithdraw);
        }

        let checkpoint = self.checkpoint();
        let remaining = exact_sub(self.unattributed(), leftover)
            .ok_or_else(|| CampaignError::invalid("leftover exceeds unattributed balance"))?;
        self.set_unattributed(remaining);

        let owner = self.owner();
        if let Err(err) = gateway.transfer(self, owner, leftover) {
            warn!(owner = %owner, amount = %leftover, error = %err, "Withdrawal transfer failed, rolling back");
            self.revert(checkpoint);
            return Err(TreasuryError::TransferFailed(err));
        }

        info!(owner = %owner, amount = %leftover, "Leftover funds withdrawn");
        let event = LedgerEvent::FundsWithdrawn(FundsWithdrawn {
            amount: leftover,
            owner,
        });
        self.emit(event.clone());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::LedgerConfig;
    use crate::errors::TransferError;
    use crate::store::NewCampaign;
    use crate::transfer::AccountBook;
    use std::sync::Arc;

    fn setup() -> (Crowdfunding, Arc<ManualClock>, AccountId) {
        let owner = AccountId::new();
        let clock = Arc::new(ManualClock::new(0));
        let ledger = Crowdfunding::new(LedgerConfig::new(owner), clock.clone()).unwrap();
        (ledger, clock, owner)
    }

    fn open_campaign(ledger: &mut Crowdfunding, raised: i64) {
        let id = ledger
            .create_campaign(NewCampaign {
                title: "Open".to_string(),
                description: "Still collecting".to_string(),
                beneficiary: AccountId::new(),
                goal: Decimal::from(100),
                duration: 3600,
            })
            .unwrap();
        ledger.donate(AccountId::new(), id, Decimal::from(raised)).unwrap();
    }

    #[test]
    fn test_held_balance_is_derived() {
        let (mut ledger, _clock, _owner) = setup();
        open_campaign(&mut ledger, 4);
        ledger.receive_funds(AccountId::new(), Decimal::from(3)).unwrap();
        assert_eq!(ledger.held_balance().unwrap(), Decimal::from(7));
        assert_eq!(ledger.leftover_funds().unwrap(), Decimal::from(3));
    }

    #[test]
    fn test_receive_rejects_non_positive() {
        let (mut ledger, _clock, _owner) = setup();
        let result = ledger.receive_funds(AccountId::new(), Decimal::ZERO);
        assert!(matches!(result, Err(TreasuryError::InvalidParameter { .. })));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_withdraw_pays_only_unattributed() {
        let (mut ledger, _clock, owner) = setup();
        open_campaign(&mut ledger, 4);
        ledger.receive_funds(AccountId::new(), Decimal::from(3)).unwrap();

        let mut book = AccountBook::new();
        let event = ledger.withdraw_leftover_funds(owner, &mut book).unwrap();
        assert_eq!(
            event,
            LedgerEvent::FundsWithdrawn(FundsWithdrawn {
                amount: Decimal::from(3),
                owner
            })
        );
        assert_eq!(book.balance_of(&owner), Decimal::from(3));
        assert_eq!(ledger.held_balance().unwrap(), Decimal::from(4));
        assert_eq!(ledger.leftover_funds().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_unauthorized_even_with_funds() {
        let (mut ledger, _clock, _owner) = setup();
        ledger.receive_funds(AccountId::new(), Decimal::from(3)).unwrap();
        let intruder = AccountId::new();
        let mut book = AccountBook::new();
        assert_eq!(
            ledger.withdraw_leftover_funds(intruder, &mut book),
            Err(TreasuryError::Unauthorized { caller: intruder })
        );
        assert_eq!(ledger.leftover_funds().unwrap(), Decimal::from(3));
    }

    #[test]
    fn test_withdraw_nothing() {
        let (mut ledger, _clock, owner) = setup();
        open_campaign(&mut ledger, 4);
        let mut book = AccountBook::new();
        assert_eq!(
            ledger.withdraw_leftover_funds(owner, &mut book),
            Err(TreasuryError::NothingToWithdraw)
        );
    }

    #[test]
    fn test_withdraw_rollback_on_rejection() {
        let (mut ledger, _clock, owner) = setup();
        ledger.receive_funds(AccountId::new(), Decimal::from(3)).unwrap();
        let events_before = ledger.events().len();

        let mut book = AccountBook::new();
        book.reject_from(owner);
        assert_eq!(
            ledger.withdraw_leftover_funds(owner, &mut book),
            Err(TreasuryError::TransferFailed(TransferError::Rejected {
                recipient: owner
            }))
        );
        assert_eq!(ledger.leftover_funds().unwrap(), Decimal::from(3));
        assert_eq!(ledger.events().len(), events_before);
    }
}
