use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Calls a passed lending market proposal makes, one per index.
#[cw_serde]
pub struct LendingMarketMetadata {
    pub targets: Vec<String>,
    pub values: Vec<Uint128>,
    pub calldatas: Vec<Binary>,
    pub signatures: Vec<String>,
    pub prop_id: u64,
}

/// Transfer out of the treasury.
#[cw_serde]
pub struct TreasuryMetadata {
    pub recipient: String,
    pub amount: Uint128,
    pub denom: String,
    pub prop_id: u64,
}

#[cw_serde]
pub enum ProposalMetadata {
    LendingMarket(LendingMarketMetadata),
    Treasury(TreasuryMetadata),
}

impl ProposalMetadata {
    pub fn prop_id(&self) -> u64 {
        match self {
            ProposalMetadata::LendingMarket(metadata) => metadata.prop_id,
            ProposalMetadata::Treasury(metadata) => metadata.prop_id,
        }
    }
}

/// A single call forwarded to the port. Transfer-style calls carry no calldata.
#[cw_serde]
pub struct ProposalCall {
    pub target: String,
    pub value: Uint128,
    pub signature: String,
    pub calldata: Option<Binary>,
}

/// What the port stores for a proposal.
#[cw_serde]
pub struct ProposalRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub targets: Vec<String>,
    pub values: Vec<Uint128>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Binary>,
}
