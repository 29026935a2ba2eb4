//! Messages of the contract that maps native vouchers to cw20 representations.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    RegisterTokenPair {
        denom: String,
        cw20_contract: String,
        enabled: bool,
    },
    ToggleTokenPair {
        denom: String,
    },
    /// Escrows the attached voucher and mints the same amount of its cw20 to `receiver`.
    ConvertCoin {
        receiver: String,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<TokenPair>)]
    TokenPair { denom: String },
}

#[cw_serde]
pub struct TokenPair {
    pub denom: String,
    pub cw20_contract: Addr,
    pub enabled: bool,
}
