//! Unique identifier types for ledger entities
//!
//! Accounts use UUID v7 for time-sortable ordering. Campaigns use dense
//! sequential integers starting at 1, assigned by the campaign store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a participant: donor, beneficiary or owner.
///
/// The nil UUID is reserved as "no recipient" and is never a valid
/// beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new AccountId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The reserved "no recipient" identity.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// True for the reserved "no recipient" identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential campaign identifier.
///
/// Assigned densely from 1 in creation order and never reused. The value
/// 0 is never assigned, so `CampaignId::from(0)` never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(u64);

impl CampaignId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: CampaignId = CampaignId(1);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The identifier following this one, or `None` on counter exhaustion.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for CampaignId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let id1 = AccountId::new();
        let id2 = AccountId::new();
        assert_ne!(id1, id2, "AccountIds should be unique");
        assert!(!id1.is_nil());
    }

    #[test]
    fn test_account_id_nil() {
        assert!(AccountId::nil().is_nil());
        assert_eq!(AccountId::nil(), AccountId::from_uuid(Uuid::nil()));
    }

    #[test]
    fn test_account_id_serialization() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_campaign_id_sequence() {
        let first = CampaignId::FIRST;
        assert_eq!(first.get(), 1);
        assert_eq!(first.next(), Some(CampaignId::new(2)));
        assert_eq!(CampaignId::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_campaign_id_serializes_as_number() {
        let json = serde_json::to_string(&CampaignId::new(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(CampaignId::new(7).to_string(), "7");
    }
}
