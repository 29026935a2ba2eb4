use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Decimal, StdError, StdResult, Timestamp, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::pool::{LiquidityPool, LPT_DENOM_PREFIX};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[cw_serde]
pub struct Params {
    /// Native base asset every pool is paired against.
    pub standard_denom: String,
    /// Swap fee rate, charged on the input side.
    pub fee: Decimal,
    /// Upper bound for the standard reserve of any single pool.
    pub max_standard_coin_per_pool: Uint128,
    /// Largest input the onboarding auto-swap may spend, per denom.
    pub max_swap_amount: Vec<Coin>,
}

impl Params {
    pub fn new(standard_denom: impl Into<String>) -> Self {
        Self {
            standard_denom: standard_denom.into(),
            fee: Decimal::permille(3),
            max_standard_coin_per_pool: Uint128::new(10_000 * 10u128.pow(18)),
            max_swap_amount: vec![],
        }
    }

    pub fn validate(&self) -> StdResult<()> {
        if self.standard_denom.is_empty() || self.standard_denom.starts_with(LPT_DENOM_PREFIX) {
            return Err(StdError::generic_err(format!(
                "invalid standard denom '{}'",
                self.standard_denom
            )));
        }
        if self.fee >= Decimal::one() {
            return Err(StdError::generic_err("fee must be lower than one"));
        }
        if self.max_standard_coin_per_pool.is_zero() {
            return Err(StdError::generic_err(
                "max standard coin per pool must be greater than zero",
            ));
        }
        for (i, cap) in self.max_swap_amount.iter().enumerate() {
            if self.max_swap_amount[..i]
                .iter()
                .any(|other| other.denom == cap.denom)
            {
                return Err(StdError::generic_err(format!(
                    "duplicate max swap amount for '{}'",
                    cap.denom
                )));
            }
        }
        Ok(())
    }

    /// Swap cap configured for `denom`, if any.
    pub fn max_swap_amount_for(&self, denom: &str) -> Option<Uint128> {
        self.max_swap_amount
            .iter()
            .find(|cap| cap.denom == denom)
            .map(|cap| cap.amount)
    }
}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub params: Params,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Opens a pool with the attached paired and standard coins as first deposit.
    CreatePool {},
    /// Adds liquidity to an existing pool. The attached funds must be the paired
    /// and the standard coin; the part not matching the pool ratio is refunded.
    Deposit {
        paired_denom: String,
        min_liquidity: Uint128,
        deadline: Option<Timestamp>,
    },
    Withdraw {
        lpt_denom: String,
        shares: Uint128,
        min_paired: Uint128,
        min_standard: Uint128,
        deadline: Option<Timestamp>,
    },
    /// Sells the attached coin for `output_denom`.
    Swap {
        output_denom: String,
        min_output: Uint128,
        recipient: Option<String>,
        deadline: Option<Timestamp>,
    },
    /// Buys exactly `output` with at most the attached coin; the rest is refunded.
    SwapExactOutput {
        output: Coin,
        recipient: Option<String>,
        deadline: Option<Timestamp>,
    },
    UpdateParams {
        params: Params,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Params)]
    Params {},
    #[returns(LiquidityPool)]
    LiquidityPool { lpt_denom: String },
    #[returns(LiquidityPoolsResponse)]
    LiquidityPools {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Pool of `paired_denom`, or None if it was never created.
    #[returns(Option<LiquidityPool>)]
    PoolByDenom { paired_denom: String },
    #[returns(Uint128)]
    Share { lpt_denom: String, address: String },
    #[returns(SimulationResponse)]
    Simulate { input: Coin, output_denom: String },
    #[returns(SimulationResponse)]
    SimulateExactOutput { output: Coin, input_denom: String },
}

#[cw_serde]
pub struct LiquidityPoolsResponse {
    pub pools: Vec<LiquidityPool>,
}

#[cw_serde]
pub struct SimulationResponse {
    pub input: Coin,
    pub output: Coin,
}
