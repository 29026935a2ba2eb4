use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use crate::proposal::{LendingMarketMetadata, ProposalRecord, TreasuryMetadata};

#[cw_serde]
pub struct InstantiateMsg {
    /// Governance account allowed to execute proposals.
    pub authority: String,
    pub port: Option<String>,
}

#[cw_serde]
pub struct Config {
    pub authority: Addr,
    pub port: Option<Addr>,
}

#[cw_serde]
pub enum ExecuteMsg {
    LendingMarketProposal {
        title: String,
        description: String,
        metadata: LendingMarketMetadata,
    },
    TreasuryProposal {
        title: String,
        description: String,
        metadata: TreasuryMetadata,
    },
    UpdatePort {
        port: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// Record the port holds for proposal `id`.
    #[returns(ProposalRecord)]
    ProposalRecord { id: u64 },
}
