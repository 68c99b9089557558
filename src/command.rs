//! Command dispatch
//!
//! A single entry point a transport layer can drive: decode a `Command`,
//! hand it to `execute` with the caller's identity, return the `Outcome`.

use crowdfund_types::ids::{AccountId, CampaignId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::events::{CampaignCreated, LedgerEvent};
use crate::ledger::Crowdfunding;
use crate::store::{Campaign, NewCampaign};
use crate::transfer::TransferGateway;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    CreateCampaign(NewCampaign),
    Donate { campaign_id: CampaignId, amount: Decimal },
    EndCampaign { campaign_id: CampaignId },
    WithdrawLeftoverFunds,
    GetCampaign { campaign_id: CampaignId },
    ReceiveFunds { amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A state-changing command committed and emitted this event
    Event(LedgerEvent),
    /// Read-only result
    Campaign(Campaign),
}

impl Crowdfunding {
    /// Run one command on behalf of `caller`.
    pub fn execute(
        &mut self,
        caller: AccountId,
        command: Command,
        gateway: &mut dyn TransferGateway,
    ) -> Result<Outcome, LedgerError> {
        let outcome = match command {
            Command::CreateCampaign(params) => {
                let id = self.create_campaign(params)?;
                let campaign = self.get_campaign(id)?;
                Outcome::Event(LedgerEvent::CampaignCreated(CampaignCreated {
                    id,
                    goal: campaign.goal,
                    deadline: campaign.deadline,
                }))
            }
            Command::Donate {
                campaign_id,
                amount,
            } => Outcome::Event(self.donate(caller, campaign_id, amount)?),
            Command::EndCampaign { campaign_id } => {
                Outcome::Event(self.end_campaign(campaign_id, gateway)?)
            }
            Command::WithdrawLeftoverFunds => {
                Outcome::Event(self.withdraw_leftover_funds(caller, gateway)?)
            }
            Command::GetCampaign { campaign_id } => {
                Outcome::Campaign(self.get_campaign(campaign_id)?.clone())
            }
            Command::ReceiveFunds { amount } => Outcome::Event(self.receive_funds(caller, amount)?),
        };
        Ok(outcome)
    }
}
