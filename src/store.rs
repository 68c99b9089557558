//! Campaign store: the authoritative table of campaign records
//!
//! Identifiers are assigned densely from 1, so campaign `n` lives at index
//! `n - 1`. Records are never removed.

use chrono::{DateTime, Utc};
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::{checked_sum, is_positive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CampaignError;

/// A single funding effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub beneficiary: AccountId,
    /// Target amount. Donations may exceed it.
    pub goal: Decimal,
    pub created_at: i64,
    pub deadline: i64,
    pub amount_raised: Decimal,
    pub ended: bool,
}

/// Lifecycle phase of a campaign at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignPhase {
    /// Accepting donations
    Active,
    /// Deadline passed, waiting for `end_campaign`
    AwaitingSettlement,
    /// Settled (terminal)
    Ended,
}

impl Campaign {
    pub fn phase(&self, now: i64) -> CampaignPhase {
        if self.ended {
            CampaignPhase::Ended
        } else if now >= self.deadline {
            CampaignPhase::AwaitingSettlement
        } else {
            CampaignPhase::Active
        }
    }

    pub fn is_goal_reached(&self) -> bool {
        self.amount_raised >= self.goal
    }

    /// Deadline as a UTC datetime, if representable.
    pub fn deadline_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.deadline, 0)
    }
}

/// Parameters for a new campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub beneficiary: AccountId,
    pub goal: Decimal,
    /// Seconds from creation until the deadline.
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignStore {
    campaigns: Vec<Campaign>,
    next_id: CampaignId,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self {
            campaigns: Vec::new(),
            next_id: CampaignId::FIRST,
        }
    }

    /// Rebuild a store from persisted records. Caller validates density.
    pub(crate) fn from_parts(campaigns: Vec<Campaign>, next_id: CampaignId) -> Self {
        Self { campaigns, next_id }
    }

    /// Validate parameters and append a new campaign.
    ///
    /// No state changes unless every constraint holds.
    pub fn create(&mut self, params: NewCampaign, now: i64) -> Result<&Campaign, CampaignError> {
        if !is_positive(params.goal) {
            return Err(CampaignError::invalid("goal must be positive"));
        }
        if params.duration <= 0 {
            return Err(CampaignError::invalid("duration must be positive"));
        }
        if params.beneficiary.is_nil() {
            return Err(CampaignError::invalid("beneficiary must not be the nil account"));
        }
        let deadline = now
            .checked_add(params.duration)
            .ok_or_else(|| CampaignError::invalid("deadline overflows"))?;
        let id = self.next_id;
        let next_id = id
            .next()
            .ok_or_else(|| CampaignError::invalid("campaign identifiers exhausted"))?;

        self.campaigns.push(Campaign {
            id,
            title: params.title,
            description: params.description,
            beneficiary: params.beneficiary,
            goal: params.goal,
            created_at: now,
            deadline,
            amount_raised: Decimal::ZERO,
            ended: false,
        });
        self.next_id = next_id;
        Ok(&self.campaigns[self.campaigns.len() - 1])
    }

    pub fn get(&self, id: CampaignId) -> Result<&Campaign, CampaignError> {
        Self::index(id)
            .and_then(|i| self.campaigns.get(i))
            .ok_or(CampaignError::NotFound { id })
    }

    pub(crate) fn get_mut(&mut self, id: CampaignId) -> Result<&mut Campaign, CampaignError> {
        Self::index(id)
            .and_then(|i| self.campaigns.get_mut(i))
            .ok_or(CampaignError::NotFound { id })
    }

    fn index(id: CampaignId) -> Option<usize> {
        id.get()
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Identifier the next `create` will assign.
    pub fn next_id(&self) -> CampaignId {
        self.next_id
    }

    pub fn open_campaigns(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.iter().filter(|c| !c.ended)
    }

    /// Sum of `amount_raised` over campaigns that have not ended.
    pub fn open_obligations(&self) -> Result<Decimal, CampaignError> {
        checked_sum(self.open_campaigns().map(|c| c.amount_raised))
            .ok_or_else(|| CampaignError::invalid("open obligations overflow"))
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}
