//! Ledger configuration
//!
//! Fixed at construction. The owner identity cannot be changed afterwards.

use crowdfund_types::ids::AccountId;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Asset symbol used when none is configured.
pub const DEFAULT_ASSET: &str = "ETH";

/// How much of a settled campaign's raised value reaches its beneficiary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutPolicy {
    /// Pay the full amount raised, excess above the goal included.
    #[default]
    FullAmount,
    /// Pay at most the goal. The excess stays with the ledger as leftover
    /// funds for the owner.
    CapAtGoal,
}

/// Configuration for a ledger instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Sole identity allowed to withdraw leftover funds.
    pub owner: AccountId,
    /// Symbol of the asset the ledger holds (informational, used in logs).
    #[serde(default = "default_asset")]
    pub asset: String,
    #[serde(default)]
    pub payout: PayoutPolicy,
}

fn default_asset() -> String {
    DEFAULT_ASSET.to_string()
}

impl LedgerConfig {
    /// Create a config with the default asset.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            asset: default_asset(),
            payout: PayoutPolicy::default(),
        }
    }

    pub fn with_payout_policy(mut self, payout: PayoutPolicy) -> Self {
        self.payout = payout;
        self
    }

    /// Override the asset symbol.
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = asset.into();
        self
    }

    /// Parse a JSON config document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_nil() {
            return Err(ConfigError::NilOwner);
        }
        if self.asset.trim().is_empty() {
            return Err(ConfigError::Parse("asset must not be empty".to_string()));
        }
        Ok(())
    }
}
