//! Ledger facade
//!
//! `Crowdfunding` is the explicit state structure behind every operation:
//! configuration, owner, time source, campaign table, unattributed
//! balance and the event log. Operations are split across modules:
//! - `donation`: `donate`
//! - `settlement`: `end_campaign`
//! - `treasury`: `receive_funds`, `withdraw_leftover_funds`
//! - `command`: `execute`
//!
//! Operations that pay value out take a checkpoint first and restore it
//! if the transfer fails, so a failed operation leaves no trace.

use crowdfund_types::ids::{AccountId, CampaignId};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::errors::{CampaignError, ConfigError};
use crate::events::{CampaignCreated, LedgerEvent};
use crate::security::Ownable;
use crate::store::{Campaign, CampaignStore, NewCampaign};

#[derive(Debug)]
pub struct Crowdfunding {
    config: LedgerConfig,
    ownable: Ownable,
    clock: Arc<dyn Clock>,
    store: CampaignStore,
    /// Value held outside any campaign
    unattributed: Decimal,
    /// Emitted events log (append-only except on rollback)
    events: Vec<LedgerEvent>,
}

/// Mutable state captured before an outbound transfer.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    store: CampaignStore,
    unattributed: Decimal,
    events_len: usize,
}

impl Crowdfunding {
    /// Create an empty ledger. Fails if the config names no usable owner.
    pub fn new(config: LedgerConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            owner = %config.owner,
            asset = %config.asset,
            payout = ?config.payout,
            "Crowdfunding ledger initialized"
        );
        Ok(Self {
            ownable: Ownable::new(config.owner),
            config,
            clock,
            store: CampaignStore::new(),
            unattributed: Decimal::ZERO,
            events: Vec::new(),
        })
    }

    pub fn with_system_clock(config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(SystemClock))
    }

    pub(crate) fn from_parts(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        store: CampaignStore,
        unattributed: Decimal,
    ) -> Self {
        Self {
            ownable: Ownable::new(config.owner),
            config,
            clock,
            store,
            unattributed,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Campaigns ─────────────────────────

    /// Create a campaign and return its identifier.
    ///
    /// Emits `CampaignCreated`.
    pub fn create_campaign(&mut self, params: NewCampaign) -> Result<CampaignId, CampaignError> {
        let now = self.now();
        let campaign = self.store.create(params, now).map_err(|err| {
            debug!(error = %err, "Campaign creation rejected");
            err
        })?;

        let event = CampaignCreated {
            id: campaign.id,
            goal: campaign.goal,
            deadline: campaign.deadline,
        };
        info!(
            campaign_id = %event.id,
            beneficiary = %campaign.beneficiary,
            goal = %event.goal,
            deadline = event.deadline,
            "Campaign created"
        );
        let id = event.id;
        self.emit(LedgerEvent::CampaignCreated(event));
        Ok(id)
    }

    pub fn get_campaign(&self, id: CampaignId) -> Result<&Campaign, CampaignError> {
        self.store.get(id)
    }

    pub fn campaigns(&self) -> &[Campaign] {
        self.store.campaigns()
    }

    pub fn campaign_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    // ───────────────────────── Accessors ─────────────────────────

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn owner(&self) -> AccountId {
        self.ownable.owner()
    }

    /// Current time according to the ledger's clock.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub(crate) fn ownable(&self) -> &Ownable {
        &self.ownable
    }

    pub(crate) fn store_mut(&mut self) -> &mut CampaignStore {
        &mut self.store
    }

    pub(crate) fn unattributed(&self) -> Decimal {
        self.unattributed
    }

    pub(crate) fn set_unattributed(&mut self, amount: Decimal) {
        self.unattributed = amount;
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    // ───────────────────────── Rollback ─────────────────────────

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            store: self.store.clone(),
            unattributed: self.unattributed,
            events_len: self.events.len(),
        }
    }

    /// Restore state captured by `checkpoint`, discarding every change
    /// made since, including those of re-entrant calls.
    pub(crate) fn revert(&mut self, checkpoint: Checkpoint) {
        self.store = checkpoint.store;
        self.unattributed = checkpoint.unattributed;
        self.events.truncate(checkpoint.events_len);
    }
}
