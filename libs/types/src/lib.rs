//! Types library for the crowdfunding ledger
//!
//! Identifier and amount primitives shared by the ledger core and any
//! transport or storage layer that wraps it.
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, CampaignId)
//! - `numeric`: Overflow-checked amount helpers

pub mod ids;
pub mod numeric;
