//! Messages understood by the port contract that stores proposals for
//! external execution.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::proposal::{ProposalCall, ProposalRecord};

#[cw_serde]
pub struct PortInstantiateMsg {
    /// Only the owner may add calls, usually the bridge.
    pub owner: String,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum PortExecuteMsg {
    /// Appends `call` to proposal `id`, creating the record on first use.
    AddProposalCall {
        id: u64,
        title: String,
        description: String,
        call: ProposalCall,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum PortQueryMsg {
    #[returns(ProposalRecord)]
    Proposal { id: u64 },
}
