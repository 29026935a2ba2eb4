use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, StdError, StdResult, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

#[cw_serde]
pub struct Params {
    pub enable_onboarding: bool,
    /// Native balance the receiver is topped up to, in standard denom units.
    pub auto_swap_threshold: Uint128,
    /// Source channels transfers are onboarded from.
    pub whitelisted_channels: Vec<String>,
}

impl Params {
    pub fn validate(&self) -> StdResult<()> {
        if self
            .whitelisted_channels
            .iter()
            .any(|channel| channel.trim().is_empty())
        {
            return Err(StdError::generic_err("empty channel id"));
        }
        Ok(())
    }
}

#[cw_serde]
pub struct Config {
    /// Liquidity pool contract used for the auto-swap.
    pub amm: Addr,
    /// Contract mapping vouchers to their cw20 representation. Conversion is
    /// skipped while unset.
    pub token_converter: Option<Addr>,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub params: Params,
    pub amm: String,
    pub token_converter: Option<String>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Handles a voucher relayed over `source_channel`. The voucher is attached
    /// as funds and ends up with `receiver`, swapped, converted or as is.
    OnRecvTransfer {
        receiver: String,
        source_channel: String,
    },
    UpdateParams {
        params: Params,
    },
    /// Replaces the fields that are set.
    UpdateConfig {
        amm: Option<String>,
        token_converter: Option<String>,
    },
    /// Turns conversion off.
    ClearTokenConverter {},
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Params)]
    Params {},
    #[returns(Config)]
    Config {},
}
