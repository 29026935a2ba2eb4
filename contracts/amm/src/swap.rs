//! Trade routing. A trade touches one pool when either side is the standard
//! denom and two pools, through the standard denom, otherwise. Pools are loaded
//! and traded on in memory; callers persist them or throw them away.

use cosmwasm_std::{Coin, Storage, Uint128};
use strand_amm_utils::{error::PoolError, lpt_denom, msg::Params, LiquidityPool};

use crate::{store, ContractError};

#[derive(Debug)]
pub struct Trade {
    pub input: Coin,
    pub output: Coin,
    /// Pools after the trade, in hop order.
    pub pools: Vec<LiquidityPool>,
}

fn route(
    storage: &dyn Storage,
    params: &Params,
    input_denom: &str,
    output_denom: &str,
) -> Result<Vec<LiquidityPool>, ContractError> {
    if input_denom == output_denom {
        return Err(ContractError::InvalidDenom {
            denom: output_denom.to_string(),
        });
    }

    let standard = params.standard_denom.as_str();
    let hops = if input_denom == standard {
        vec![lpt_denom(output_denom)]
    } else if output_denom == standard {
        vec![lpt_denom(input_denom)]
    } else {
        vec![lpt_denom(input_denom), lpt_denom(output_denom)]
    };

    hops.iter()
        .map(|lpt_denom| store::get(storage, lpt_denom))
        .collect()
}

/// Sells all of `input`, failing if the final output is below `min_output`.
pub fn exact_input(
    storage: &dyn Storage,
    params: &Params,
    input: Coin,
    output_denom: &str,
    min_output: Uint128,
) -> Result<Trade, ContractError> {
    let mut pools = route(storage, params, &input.denom, output_denom)?;
    let last = pools.len() - 1;

    let mut denom = input.denom.clone();
    let mut amount = input.amount;
    for (i, pool) in pools.iter_mut().enumerate() {
        let min = if i == last {
            min_output
        } else {
            Uint128::zero()
        };
        let next = pool.counter_denom(&denom)?.to_string();
        amount = pool.swap(&denom, amount, min, params.fee)?;
        denom = next;
    }

    Ok(Trade {
        input,
        output: Coin::new(amount, denom),
        pools,
    })
}

/// Buys exactly `output`, failing if it costs more than `max_input`.
pub fn exact_output(
    storage: &dyn Storage,
    params: &Params,
    output: Coin,
    input_denom: &str,
    max_input: Uint128,
) -> Result<Trade, ContractError> {
    let mut pools = route(storage, params, input_denom, &output.denom)?;

    // walk backwards: each hop must deliver what the next one consumes
    let mut denom = output.denom.clone();
    let mut amount = output.amount;
    for pool in pools.iter_mut().rev() {
        let previous = pool.counter_denom(&denom)?.to_string();
        amount = pool.swap_exact_output(&denom, amount, Uint128::MAX, params.fee)?;
        denom = previous;
    }

    if amount > max_input {
        return Err(PoolError::MaxInputExceeded {
            input: amount,
            max_input,
        }
        .into());
    }

    Ok(Trade {
        input: Coin::new(amount, denom),
        output,
        pools,
    })
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{coin, testing::mock_dependencies};

    use super::*;

    const NATIVE: &str = "atide";
    const USDC: &str = "ibc/usdc";
    const ATOM: &str = "ibc/atom";

    fn setup(storage: &mut dyn Storage) -> Params {
        store::create(storage, NATIVE, USDC, 1000u128.into(), 1000u128.into()).unwrap();
        store::create(storage, NATIVE, ATOM, 10_000u128.into(), 20_000u128.into()).unwrap();
        Params::new(NATIVE)
    }

    #[test]
    fn direct_trade_matches_pool_quote() {
        let mut deps = mock_dependencies();
        let params = setup(deps.as_mut().storage);

        let trade = exact_input(
            deps.as_ref().storage,
            &params,
            coin(100, USDC),
            NATIVE,
            Uint128::zero(),
        )
        .unwrap();

        assert_eq!(trade.output, coin(90, NATIVE));
        assert_eq!(trade.pools.len(), 1);
        assert_eq!(trade.pools[0].paired_reserve, Uint128::new(1100));
        assert_eq!(trade.pools[0].standard_reserve, Uint128::new(910));
    }

    #[test]
    fn double_swap_goes_through_standard_denom() {
        let mut deps = mock_dependencies();
        let params = setup(deps.as_mut().storage);

        let trade = exact_input(
            deps.as_ref().storage,
            &params,
            coin(100, USDC),
            ATOM,
            Uint128::zero(),
        )
        .unwrap();

        // 100 USDC -> 90 NATIVE -> 44 ATOM
        let atom_pool = store::get(deps.as_ref().storage, &lpt_denom(ATOM)).unwrap();
        let expected = atom_pool
            .quote(NATIVE, Uint128::new(90), params.fee)
            .unwrap();
        assert_eq!(trade.output, coin(expected.u128(), ATOM));
        assert_eq!(trade.pools.len(), 2);
        assert_eq!(trade.pools[1].standard_reserve, Uint128::new(20_090));
    }

    #[test]
    fn exact_output_double_swap_is_consistent() {
        let mut deps = mock_dependencies();
        let params = setup(deps.as_mut().storage);

        let trade = exact_output(
            deps.as_ref().storage,
            &params,
            coin(40, ATOM),
            USDC,
            Uint128::MAX,
        )
        .unwrap();

        assert_eq!(trade.output, coin(40, ATOM));
        assert_eq!(trade.input.denom, USDC);

        // selling the charged input yields at least the requested output
        let forward = exact_input(
            deps.as_ref().storage,
            &params,
            trade.input.clone(),
            ATOM,
            Uint128::new(40),
        )
        .unwrap();
        assert!(forward.output.amount >= Uint128::new(40));
    }

    #[test]
    fn exact_output_respects_max_input() {
        let mut deps = mock_dependencies();
        let params = setup(deps.as_mut().storage);

        let err = exact_output(
            deps.as_ref().storage,
            &params,
            coin(90, NATIVE),
            USDC,
            Uint128::new(10),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ContractError::Pool(PoolError::MaxInputExceeded { .. })
        ));
    }

    #[test]
    fn same_denom_and_missing_pool_are_rejected() {
        let mut deps = mock_dependencies();
        let params = setup(deps.as_mut().storage);

        assert_eq!(
            exact_input(
                deps.as_ref().storage,
                &params,
                coin(1, USDC),
                USDC,
                Uint128::zero()
            )
            .unwrap_err(),
            ContractError::InvalidDenom {
                denom: USDC.to_string()
            }
        );
        assert_eq!(
            exact_input(
                deps.as_ref().storage,
                &params,
                coin(1, "uosmo"),
                NATIVE,
                Uint128::zero()
            )
            .unwrap_err(),
            ContractError::PoolNotFound {
                lpt_denom: lpt_denom("uosmo")
            }
        );
    }
}
