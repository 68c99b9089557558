//! Outbound value transfers
//!
//! Settlement and withdrawal pay value out through a `TransferGateway`.
//! The gateway is handed the ledger itself, so a recipient can call back
//! into it while the payout is in flight. Any call it makes observes the
//! state already committed by the operation that triggered the transfer.

use crowdfund_types::ids::AccountId;
use crowdfund_types::numeric::exact_add;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::errors::TransferError;
use crate::ledger::Crowdfunding;

/// External collaborator that moves value out of the ledger.
///
/// Returning an error makes the calling operation roll back in full.
pub trait TransferGateway {
    fn transfer(
        &mut self,
        ledger: &mut Crowdfunding,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}

/// In-memory recipient balances.
///
/// Credits are overflow-checked. Accounts marked as rejecting refuse any
/// incoming transfer, like a recipient contract without a payable hook.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    balances: HashMap<AccountId, Decimal>,
    rejecting: HashSet<AccountId>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> Decimal {
        self.balances.get(account).copied().unwrap_or(Decimal::ZERO)
    }

    /// Make `account` refuse incoming transfers.
    pub fn reject_from(&mut self, account: AccountId) {
        self.rejecting.insert(account);
    }

    /// Let `account` accept transfers again.
    pub fn accept_from(&mut self, account: &AccountId) {
        self.rejecting.remove(account);
    }

    /// Seed a starting balance.
    pub fn fund(&mut self, account: AccountId, amount: Decimal) -> Result<(), TransferError> {
        self.credit(account, amount)
    }

    fn credit(&mut self, account: AccountId, amount: Decimal) -> Result<(), TransferError> {
        let current = self.balances.entry(account).or_insert(Decimal::ZERO);
        *current =
            exact_add(*current, amount).ok_or(TransferError::Overflow { recipient: account })?;
        Ok(())
    }
}

impl TransferGateway for AccountBook {
    fn transfer(
        &mut self,
        _ledger: &mut Crowdfunding,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            debug!(recipient = %to, %amount, "Recipient rejected transfer");
            return Err(TransferError::Rejected { recipient: to });
        }
        self.credit(to, amount)
    }
}
