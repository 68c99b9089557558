//! Campaign Funding Ledger
//!
//! Donors fund campaigns toward a goal on behalf of a beneficiary until a
//! deadline. After the deadline a campaign is settled exactly once and its
//! raised value paid to the beneficiary. Value held outside any open
//! campaign can be withdrawn by the owner.
//!
//! # Modules
//! - `ledger`: `Crowdfunding` state structure, campaign creation and lookup
//! - `store`: Campaign records and the id-assigning campaign table
//! - `donation`: Donation validation and accounting
//! - `settlement`: Deadline-gated settlement with rollback on failed payout
//! - `treasury`: Held balance, unattributed deposits, leftover withdrawal
//! - `transfer`: Outbound transfer gateway and an in-memory account book
//! - `security`: Owner authorization
//! - `command`: Serializable command dispatch
//! - `snapshot`: Persisted state export/restore with SHA-256 state roots
//! - `events`, `errors`, `config`, `clock`

pub mod clock;
pub mod command;
pub mod config;
pub mod donation;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod security;
pub mod settlement;
pub mod snapshot;
pub mod store;
pub mod transfer;
pub mod treasury;

pub use crowdfund_types::ids::{AccountId, CampaignId};
pub use ledger::Crowdfunding;

/// Ledger ABI version, frozen after release
pub const LEDGER_ABI_VERSION: &str = "1.0.0";
