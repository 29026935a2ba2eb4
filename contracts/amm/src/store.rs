//! Pool and share persistence.

use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::Bound;
use strand_amm_utils::{
    error::PoolError,
    lpt_denom,
    msg::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT},
    LiquidityPool, LPT_DENOM_PREFIX,
};

use crate::{
    state::{POOLS, SHARES},
    ContractError,
};

pub fn get(storage: &dyn Storage, lpt_denom: &str) -> Result<LiquidityPool, ContractError> {
    POOLS
        .may_load(storage, lpt_denom)?
        .ok_or_else(|| ContractError::PoolNotFound {
            lpt_denom: lpt_denom.to_string(),
        })
}

pub fn may_get_by_paired(
    storage: &dyn Storage,
    paired_denom: &str,
) -> StdResult<Option<LiquidityPool>> {
    POOLS.may_load(storage, &lpt_denom(paired_denom))
}

pub fn set(storage: &mut dyn Storage, pool: &LiquidityPool) -> StdResult<()> {
    POOLS.save(storage, &pool.lpt_denom, pool)
}

/// Pools in ascending pool token denom order.
pub fn list(
    storage: &dyn Storage,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<LiquidityPool>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    POOLS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, pool)| pool))
        .collect()
}

/// Creates the pool of `paired_denom` with its first deposit. The initial
/// share supply equals `initial_standard`.
pub fn create(
    storage: &mut dyn Storage,
    standard_denom: &str,
    paired_denom: &str,
    initial_paired: Uint128,
    initial_standard: Uint128,
) -> Result<LiquidityPool, ContractError> {
    if paired_denom.is_empty()
        || paired_denom == standard_denom
        || paired_denom.starts_with(LPT_DENOM_PREFIX)
    {
        return Err(ContractError::InvalidDenom {
            denom: paired_denom.to_string(),
        });
    }
    if initial_paired.is_zero() || initial_standard.is_zero() {
        return Err(PoolError::InvalidAmount {}.into());
    }
    if may_get_by_paired(storage, paired_denom)?.is_some() {
        return Err(ContractError::PoolAlreadyExists {
            paired_denom: paired_denom.to_string(),
        });
    }

    let mut pool = LiquidityPool::new(standard_denom, paired_denom);
    pool.deposit(initial_paired, initial_standard)?;
    set(storage, &pool)?;

    Ok(pool)
}

pub fn share_balance(storage: &dyn Storage, lpt_denom: &str, holder: &Addr) -> StdResult<Uint128> {
    Ok(SHARES
        .may_load(storage, (lpt_denom, holder))?
        .unwrap_or_default())
}

pub fn mint_shares(
    storage: &mut dyn Storage,
    lpt_denom: &str,
    holder: &Addr,
    amount: Uint128,
) -> StdResult<Uint128> {
    SHARES.update(storage, (lpt_denom, holder), |balance| {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })
}

pub fn burn_shares(
    storage: &mut dyn Storage,
    lpt_denom: &str,
    holder: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = share_balance(storage, lpt_denom, holder)?;
    let remaining = balance
        .checked_sub(amount)
        .map_err(|_| PoolError::InsufficientShares {
            requested: amount,
            available: balance,
        })?;

    if remaining.is_zero() {
        SHARES.remove(storage, (lpt_denom, holder));
    } else {
        SHARES.save(storage, (lpt_denom, holder), &remaining)?;
    }

    Ok(remaining)
}
