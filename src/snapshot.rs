//! Snapshots of the persisted state surface
//!
//! A snapshot carries the campaign table, the id counter, the owner and
//! the unattributed balance. The held balance is derived on restore.
//! `state_root` is a SHA-256 digest over the canonical JSON encoding, so
//! two ledgers with equal state produce equal roots.

use crowdfund_types::ids::{AccountId, CampaignId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;

use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::errors::SnapshotError;
use crate::ledger::Crowdfunding;
use crate::store::{Campaign, CampaignStore};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub owner: AccountId,
    pub next_campaign_id: CampaignId,
    pub campaigns: Vec<Campaign>,
    pub unattributed: Decimal,
}

impl LedgerSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Hex-encoded SHA-256 over the canonical JSON encoding.
    pub fn state_root(&self) -> Result<String, SnapshotError> {
        let bytes =
            serde_json::to_vec(self).map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Check the snapshot against the structural invariants of a ledger.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if self.unattributed < Decimal::ZERO {
            return Err(corrupt("unattributed balance is negative"));
        }
        for (index, campaign) in self.campaigns.iter().enumerate() {
            let expected = CampaignId::new(index as u64 + 1);
            if campaign.id != expected {
                return Err(corrupt(format!(
                    "campaign at position {} has id {}, expected {}",
                    index, campaign.id, expected
                )));
            }
            if campaign.amount_raised < Decimal::ZERO {
                return Err(corrupt(format!("campaign {} has negative amount raised", campaign.id)));
            }
            if campaign.goal <= Decimal::ZERO {
                return Err(corrupt(format!("campaign {} has non-positive goal", campaign.id)));
            }
            if campaign.beneficiary.is_nil() {
                return Err(corrupt(format!("campaign {} has nil beneficiary", campaign.id)));
            }
        }
        let expected_next = CampaignId::new(self.campaigns.len() as u64 + 1);
        if self.next_campaign_id != expected_next {
            return Err(corrupt(format!(
                "id counter {} does not follow {} campaigns",
                self.next_campaign_id,
                self.campaigns.len()
            )));
        }
        Ok(())
    }
}

fn corrupt(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Corrupt {
        reason: reason.into(),
    }
}

impl Crowdfunding {
    /// Capture the persisted state surface.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            owner: self.owner(),
            next_campaign_id: self.store().next_id(),
            campaigns: self.campaigns().to_vec(),
            unattributed: self.unattributed(),
        }
    }

    /// Rebuild a ledger from a snapshot. The event log starts empty.
    pub fn restore(
        config: LedgerConfig,
        snapshot: LedgerSnapshot,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SnapshotError> {
        config.validate()?;
        snapshot.validate()?;
        if snapshot.owner != config.owner {
            return Err(SnapshotError::OwnerMismatch {
                expected: config.owner,
                found: snapshot.owner,
            });
        }
        let store = CampaignStore::from_parts(snapshot.campaigns, snapshot.next_campaign_id);
        let ledger = Crowdfunding::from_parts(config, clock, store, snapshot.unattributed);
        ledger
            .held_balance()
            .map_err(|e| corrupt(e.to_string()))?;

        info!(
            campaigns = ledger.campaign_count(),
            owner = %ledger.owner(),
            "Ledger restored from snapshot"
        );
        Ok(ledger)
    }

    /// Restore and verify against an expected state root.
    pub fn restore_verified(
        config: LedgerConfig,
        snapshot: LedgerSnapshot,
        expected_root: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SnapshotError> {
        let actual = snapshot.state_root()?;
        if actual != expected_root {
            return Err(SnapshotError::IntegrityFailure {
                expected: expected_root.to_string(),
                actual,
            });
        }
        Self::restore(config, snapshot, clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::errors::ConfigError;
    use crate::store::NewCampaign;

    fn populated() -> (Crowdfunding, Arc<ManualClock>, LedgerConfig) {
        let config = LedgerConfig::new(AccountId::new());
        let clock = Arc::new(ManualClock::new(0));
        let mut ledger = Crowdfunding::new(config.clone(), clock.clone()).unwrap();
        for goal in [5, 10] {
            let id = ledger
                .create_campaign(NewCampaign {
                    title: format!("Campaign {goal}"),
                    description: String::new(),
                    beneficiary: AccountId::new(),
                    goal: Decimal::from(goal),
                    duration: 100,
                })
                .unwrap();
            ledger.donate(AccountId::new(), id, Decimal::from(goal)).unwrap();
        }
        ledger.receive_funds(AccountId::new(), Decimal::from(2)).unwrap();
        (ledger, clock, config)
    }

    #[test]
    fn test_snapshot_round_trip_preserves_root() {
        let (ledger, clock, config) = populated();
        let snapshot = ledger.snapshot();
        let root = snapshot.state_root().unwrap();

        let json = snapshot.to_json().unwrap();
        let decoded = LedgerSnapshot::from_json(&json).unwrap();
        let restored = Crowdfunding::restore_verified(config, decoded, &root, clock).unwrap();

        assert_eq!(restored.snapshot().state_root().unwrap(), root);
        assert_eq!(restored.held_balance().unwrap(), Decimal::from(17));
        assert!(restored.events().is_empty());
    }

    #[test]
    fn test_restored_ledger_continues_ids() {
        let (ledger, clock, config) = populated();
        let mut restored = Crowdfunding::restore(config, ledger.snapshot(), clock).unwrap();
        let id = restored
            .create_campaign(NewCampaign {
                title: "Third".to_string(),
                description: String::new(),
                beneficiary: AccountId::new(),
                goal: Decimal::ONE,
                duration: 100,
            })
            .unwrap();
        assert_eq!(id, CampaignId::new(3));
    }

    #[test]
    fn test_tampered_snapshot_fails_integrity() {
        let (ledger, clock, config) = populated();
        let mut snapshot = ledger.snapshot();
        let root = snapshot.state_root().unwrap();
        snapshot.campaigns[0].amount_raised = Decimal::from(1_000);

        let result = Crowdfunding::restore_verified(config, snapshot, &root, clock);
        assert!(matches!(result, Err(SnapshotError::IntegrityFailure { .. })));
    }

    #[test]
    fn test_restore_rejects_gaps_and_counter_drift() {
        let (ledger, _clock, _config) = populated();
        let mut gapped = ledger.snapshot();
        gapped.campaigns.remove(0);
        assert!(matches!(gapped.validate(), Err(SnapshotError::Corrupt { .. })));

        let mut drifted = ledger.snapshot();
        drifted.next_campaign_id = CampaignId::new(9);
        assert!(matches!(drifted.validate(), Err(SnapshotError::Corrupt { .. })));
    }

    #[test]
    fn test_restore_rejects_other_owner() {
        let (ledger, clock, _config) = populated();
        let other = LedgerConfig::new(AccountId::new());
        let result = Crowdfunding::restore(other, ledger.snapshot(), clock);
        assert!(matches!(result, Err(SnapshotError::OwnerMismatch { .. })));
    }

    #[test]
    fn test_state_root_is_sha256_hex() {
        let (ledger, _clock, _config) = populated();
        let root = ledger.snapshot().state_root().unwrap();
        assert_eq!(root.len(), 64);
        assert!(root.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_restore_rejects_invalid_config() {
        let (ledger, clock, config) = populated();
        let blank = config.with_asset(" ");
        let result = Crowdfunding::restore(blank, ledger.snapshot(), clock);
        assert!(matches!(result, Err(SnapshotError::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn test_restore_rejects_unknown_version() {
        let (ledger, _clock, _config) = populated();
        let mut snapshot = ledger.snapshot();
        snapshot.version = 99;
        assert_eq!(snapshot.validate(), Err(SnapshotError::UnsupportedVersion(99)));
    }
}
