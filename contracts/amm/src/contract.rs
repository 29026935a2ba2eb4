#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, Timestamp,
};
use cw2::set_contract_version;
use strand_amm_utils::msg::{
    ExecuteMsg, InstantiateMsg, LiquidityPoolsResponse, QueryMsg, SimulationResponse,
};

use crate::{error::ContractError, state::PARAMS, store, swap};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SWAP_EVENT: &str = "swap";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    msg.params.validate()?;
    PARAMS.save(deps.storage, &msg.params)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner)
        .add_attribute("standard_denom", msg.params.standard_denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreatePool {} => execute::create_pool(deps, info),
        ExecuteMsg::Deposit {
            paired_denom,
            min_liquidity,
            deadline,
        } => {
            check_deadline(&env, deadline)?;
            execute::deposit(deps, info, paired_denom, min_liquidity)
        }
        ExecuteMsg::Withdraw {
            lpt_denom,
            shares,
            min_paired,
            min_standard,
            deadline,
        } => {
            check_deadline(&env, deadline)?;
            execute::withdraw(deps, info, lpt_denom, shares, min_paired, min_standard)
        }
        ExecuteMsg::Swap {
            output_denom,
            min_output,
            recipient,
            deadline,
        } => {
            check_deadline(&env, deadline)?;
            execute::swap(deps, info, output_denom, min_output, recipient)
        }
        ExecuteMsg::SwapExactOutput {
            output,
            recipient,
            deadline,
        } => {
            check_deadline(&env, deadline)?;
            execute::swap_exact_output(deps, info, output, recipient)
        }
        ExecuteMsg::UpdateParams { params } => execute::update_params(deps, info, params),
        ExecuteMsg::UpdateOwnership(action) => {
            cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new().add_attribute("method", "update_ownership"))
        }
    }
}

fn check_deadline(env: &Env, deadline: Option<Timestamp>) -> Result<(), ContractError> {
    match deadline {
        Some(deadline) if env.block.time > deadline => Err(ContractError::Expired {}),
        _ => Ok(()),
    }
}

mod execute {
    use cosmwasm_std::{
        Addr, BankMsg, Coin, CosmosMsg, DepsMut, Event, MessageInfo, Response, Uint128,
    };
    use cw_ownable::assert_owner;
    use cw_utils::{nonpayable, one_coin};
    use strand_amm_utils::{error::PoolError, lpt_denom, msg::Params};

    use crate::{contract::SWAP_EVENT, state::PARAMS, store, swap::Trade, ContractError};

    /// Splits attached funds into the paired and the standard coin. Exactly
    /// these two coins must be attached.
    fn paired_and_standard(
        funds: &[Coin],
        standard_denom: &str,
        paired_denom: Option<&str>,
    ) -> Result<(Coin, Uint128), ContractError> {
        let invalid = || ContractError::InvalidFunds {
            expected: format!(
                "{} and {standard_denom}",
                paired_denom.unwrap_or("a paired coin")
            ),
        };
        if funds.len() != 2 {
            return Err(invalid());
        }

        let standard = funds
            .iter()
            .find(|c| c.denom == standard_denom)
            .ok_or_else(invalid)?;
        let paired = funds
            .iter()
            .find(|c| c.denom != standard_denom)
            .ok_or_else(invalid)?;
        if paired_denom.is_some_and(|denom| denom != paired.denom) {
            return Err(invalid());
        }

        Ok((paired.clone(), standard.amount))
    }

    fn check_standard_cap(params: &Params, reserve: Uint128) -> Result<(), ContractError> {
        if reserve > params.max_standard_coin_per_pool {
            return Err(ContractError::MaxStandardCoinPerPoolExceeded {
                reserve,
                max: params.max_standard_coin_per_pool,
            });
        }
        Ok(())
    }

    fn send(to: &Addr, coins: Vec<Coin>) -> Option<CosmosMsg> {
        let amount: Vec<Coin> = coins.into_iter().filter(|c| !c.amount.is_zero()).collect();
        (!amount.is_empty()).then(|| {
            BankMsg::Send {
                to_address: to.to_string(),
                amount,
            }
            .into()
        })
    }

    pub fn create_pool(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
        let params = PARAMS.load(deps.storage)?;
        let (paired, standard_amount) =
            paired_and_standard(&info.funds, &params.standard_denom, None)?;
        check_standard_cap(&params, standard_amount)?;

        let pool = store::create(
            deps.storage,
            &params.standard_denom,
            &paired.denom,
            paired.amount,
            standard_amount,
        )?;
        store::mint_shares(deps.storage, &pool.lpt_denom, &info.sender, pool.lpt_supply)?;

        Ok(Response::new()
            .add_attribute("method", "create_pool")
            .add_attribute("lpt_denom", pool.lpt_denom)
            .add_attribute("paired_denom", pool.paired_denom)
            .add_attribute("shares", pool.lpt_supply))
    }

    pub fn deposit(
        deps: DepsMut,
        info: MessageInfo,
        paired_denom: String,
        min_liquidity: Uint128,
    ) -> Result<Response, ContractError> {
        let params = PARAMS.load(deps.storage)?;
        let (paired, standard_amount) = paired_and_standard(
            &info.funds,
            &params.standard_denom,
            Some(paired_denom.as_str()),
        )?;

        let mut pool = store::get(deps.storage, &lpt_denom(&paired_denom))?;
        let outcome = pool.deposit(paired.amount, standard_amount)?;
        if outcome.minted < min_liquidity {
            return Err(PoolError::SlippageExceeded {
                output: outcome.minted,
                min_output: min_liquidity,
            }
            .into());
        }
        check_standard_cap(&params, pool.standard_reserve)?;

        store::set(deps.storage, &pool)?;
        store::mint_shares(deps.storage, &pool.lpt_denom, &info.sender, outcome.minted)?;

        let refund = send(
            &info.sender,
            vec![
                Coin::new(paired.amount - outcome.paired_used, paired.denom),
                Coin::new(
                    standard_amount - outcome.standard_used,
                    params.standard_denom,
                ),
            ],
        );

        Ok(Response::new()
            .add_messages(refund)
            .add_attribute("method", "deposit")
            .add_attribute("lpt_denom", pool.lpt_denom)
            .add_attribute("shares", outcome.minted)
            .add_attribute("paired_used", outcome.paired_used)
            .add_attribute("standard_used", outcome.standard_used))
    }

    pub fn withdraw(
        deps: DepsMut,
        info: MessageInfo,
        lpt_denom: String,
        shares: Uint128,
        min_paired: Uint128,
        min_standard: Uint128,
    ) -> Result<Response, ContractError> {
        nonpayable(&info)?;

        let mut pool = store::get(deps.storage, &lpt_denom)?;
        let balance = store::share_balance(deps.storage, &lpt_denom, &info.sender)?;
        let outcome = pool.withdraw(shares, balance)?;
        if outcome.paired < min_paired {
            return Err(PoolError::SlippageExceeded {
                output: outcome.paired,
                min_output: min_paired,
            }
            .into());
        }
        if outcome.standard < min_standard {
            return Err(PoolError::SlippageExceeded {
                output: outcome.standard,
                min_output: min_standard,
            }
            .into());
        }

        store::set(deps.storage, &pool)?;
        store::burn_shares(deps.storage, &lpt_denom, &info.sender, shares)?;

        let payout = send(
            &info.sender,
            vec![
                Coin::new(outcome.paired, pool.paired_denom),
                Coin::new(outcome.standard, pool.standard_denom),
            ],
        );

        Ok(Response::new()
            .add_messages(payout)
            .add_attribute("method", "withdraw")
            .add_attribute("lpt_denom", lpt_denom)
            .add_attribute("shares", shares)
            .add_attribute("paired", outcome.paired)
            .add_attribute("standard", outcome.standard))
    }

    fn settle(
        deps: DepsMut,
        info: &MessageInfo,
        trade: Trade,
        recipient: Option<String>,
        method: &str,
    ) -> Result<Response, ContractError> {
        let recipient = match recipient {
            Some(recipient) => deps.api.addr_validate(&recipient)?,
            None => info.sender.clone(),
        };
        for pool in &trade.pools {
            store::set(deps.storage, pool)?;
        }

        let event = Event::new(SWAP_EVENT)
            .add_attribute("amount", trade.input.amount)
            .add_attribute("denom_in", &trade.input.denom)
            .add_attribute("denom_out", &trade.output.denom)
            .add_attribute("amount_out", trade.output.amount)
            .add_attribute("sender", &info.sender)
            .add_attribute("recipient", &recipient);

        Ok(Response::new()
            .add_messages(send(&recipient, vec![trade.output]))
            .add_event(event)
            .add_attribute("method", method))
    }

    pub fn swap(
        deps: DepsMut,
        info: MessageInfo,
        output_denom: String,
        min_output: Uint128,
        recipient: Option<String>,
    ) -> Result<Response, ContractError> {
        let input = one_coin(&info)?;
        let params = PARAMS.load(deps.storage)?;

        let trade =
            crate::swap::exact_input(deps.storage, &params, input, &output_denom, min_output)?;

        settle(deps, &info, trade, recipient, "swap")
    }

    pub fn swap_exact_output(
        deps: DepsMut,
        info: MessageInfo,
        output: Coin,
        recipient: Option<String>,
    ) -> Result<Response, ContractError> {
        let max_input = one_coin(&info)?;
        let params = PARAMS.load(deps.storage)?;

        let trade = crate::swap::exact_output(
            deps.storage,
            &params,
            output,
            &max_input.denom,
            max_input.amount,
        )?;
        let refund = send(
            &info.sender,
            vec![Coin::new(
                max_input.amount - trade.input.amount,
                max_input.denom,
            )],
        );

        Ok(settle(deps, &info, trade, recipient, "swap_exact_output")?.add_messages(refund))
    }

    pub fn update_params(
        deps: DepsMut,
        info: MessageInfo,
        params: Params,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        let current = PARAMS.load(deps.storage)?;
        if current.standard_denom != params.standard_denom {
            return Err(ContractError::StandardDenomImmutable {});
        }
        params.validate()?;
        PARAMS.save(deps.storage, &params)?;

        Ok(Response::new()
            .add_attribute("method", "update_params")
            .add_attribute("fee", params.fee.to_string())
            .add_attribute(
                "max_standard_coin_per_pool",
                params.max_standard_coin_per_pool,
            ))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Params {} => Ok(to_json_binary(&PARAMS.load(deps.storage)?)?),
        QueryMsg::LiquidityPool { lpt_denom } => {
            Ok(to_json_binary(&store::get(deps.storage, &lpt_denom)?)?)
        }
        QueryMsg::LiquidityPools { start_after, limit } => {
            let pools = store::list(deps.storage, start_after, limit)?;
            Ok(to_json_binary(&LiquidityPoolsResponse { pools })?)
        }
        QueryMsg::PoolByDenom { paired_denom } => {
            let pool = store::may_get_by_paired(deps.storage, &paired_denom)?;
            Ok(to_json_binary(&pool)?)
        }
        QueryMsg::Share { lpt_denom, address } => {
            let address = deps.api.addr_validate(&address)?;
            let shares = store::share_balance(deps.storage, &lpt_denom, &address)?;
            Ok(to_json_binary(&shares)?)
        }
        QueryMsg::Simulate {
            input,
            output_denom,
        } => {
            let simulation = query::simulate(deps, input, output_denom)?;
            Ok(to_json_binary(&simulation)?)
        }
        QueryMsg::SimulateExactOutput {
            output,
            input_denom,
        } => {
            let simulation = query::simulate_exact_output(deps, output, input_denom)?;
            Ok(to_json_binary(&simulation)?)
        }
        QueryMsg::Ownership {} => Ok(to_json_binary(&cw_ownable::get_ownership(deps.storage)?)?),
    }
}

mod query {
    use cosmwasm_std::Uint128;

    use super::*;

    pub fn simulate(
        deps: Deps,
        input: Coin,
        output_denom: String,
    ) -> Result<SimulationResponse, ContractError> {
        let params = PARAMS.load(deps.storage)?;
        let min_output = Uint128::zero();
        let trade = swap::exact_input(deps.storage, &params, input, &output_denom, min_output)?;

        Ok(SimulationResponse {
            input: trade.input,
            output: trade.output,
        })
    }

    pub fn simulate_exact_output(
        deps: Deps,
        output: Coin,
        input_denom: String,
    ) -> Result<SimulationResponse, ContractError> {
        let params = PARAMS.load(deps.storage)?;
        let trade = swap::exact_output(deps.storage, &params, output, &input_denom, Uint128::MAX)?;

        Ok(SimulationResponse {
            input: trade.input,
            output: trade.output,
        })
    }
}
