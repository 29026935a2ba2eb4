#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use strand_onboarding_utils::msg::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::{
    error::ContractError,
    state::{CONFIG, PARAMS},
};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONVERT_COIN_EVENT: &str = "convert_coin";

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

    let config = Config {
        amm: deps.api.addr_validate(&msg.amm)?,
        token_converter: msg
            .token_converter
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner)
        .add_attribute("amm", config.amm))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::OnRecvTransfer {
            receiver,
            source_channel,
        } => execute::on_recv_transfer(deps, info, receiver, source_channel),
        ExecuteMsg::UpdateParams { params } => execute::update_params(deps, info, params),
        ExecuteMsg::UpdateConfig {
            amm,
            token_converter,
        } => execute::update_config(deps, info, amm, token_converter),
        ExecuteMsg::ClearTokenConverter {} => execute::clear_token_converter(deps, info),
        ExecuteMsg::UpdateOwnership(action) => {
            cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new().add_attribute("method", "update_ownership"))
        }
    }
}

mod execute {
    use cosmwasm_std::{
        coin, to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Decimal, Deps, DepsMut, Event,
        MessageInfo, Response, Uint128, WasmMsg,
    };
    use cw_ownable::assert_owner;
    use cw_utils::one_coin;
    use strand_amm_utils::{msg as amm, LiquidityPool};
    use strand_onboarding_utils::msg::{Config, Params};
    use strand_token_converter_utils as converter;

    use crate::{
        contract::CONVERT_COIN_EVENT,
        policy::{self, OnboardingAction, PolicyInput, SwapPlan},
        state::{CONFIG, PARAMS},
        ContractError,
    };

    /// Token contract the voucher converts to, if the mapping is registered,
    /// enabled and backed by a deployed contract. Lookup failures mean no
    /// conversion.
    fn conversion_target(deps: Deps, config: &Config, denom: &str) -> Option<Addr> {
        let converter = config.token_converter.as_ref()?;
        let pair: Option<converter::TokenPair> = match deps.querier.query_wasm_smart(
            converter,
            &converter::QueryMsg::TokenPair {
                denom: denom.to_string(),
            },
        ) {
            Ok(pair) => pair,
            Err(err) => {
                deps.api
                    .debug(&format!("onboarding: token pair lookup for {denom} failed: {err}"));
                return None;
            }
        };

        let Some(pair) = pair else {
            deps.api.debug(&format!("onboarding: no token pair for {denom}"));
            return None;
        };
        if !pair.enabled {
            deps.api.debug(&format!("onboarding: token pair for {denom} is disabled"));
            return None;
        }
        if deps
            .querier
            .query_wasm_contract_info(&pair.cw20_contract)
            .is_err()
        {
            deps.api.debug(&format!(
                "onboarding: token contract {} is not deployed",
                pair.cw20_contract
            ));
            return None;
        }

        Some(pair.cw20_contract)
    }

    /// AMM parameters and the pool pairing `denom` with the standard denom.
    /// An unreachable AMM or a missing pool means no swap.
    fn swap_venue(
        deps: Deps,
        config: &Config,
        denom: &str,
    ) -> Option<(amm::Params, LiquidityPool)> {
        let query = amm::QueryMsg::Params {};
        let amm_params: amm::Params = match deps.querier.query_wasm_smart(&config.amm, &query) {
            Ok(params) => params,
            Err(err) => {
                deps.api.debug(&format!("onboarding: amm params lookup failed: {err}"));
                return None;
            }
        };

        let pool: Option<LiquidityPool> = match deps.querier.query_wasm_smart(
            &config.amm,
            &amm::QueryMsg::PoolByDenom {
                paired_denom: denom.to_string(),
            },
        ) {
            Ok(pool) => pool,
            Err(err) => {
                deps.api.debug(&format!("onboarding: pool lookup for {denom} failed: {err}"));
                return None;
            }
        };
        let Some(pool) = pool else {
            deps.api.debug(&format!("onboarding: no pool for {denom}"));
            return None;
        };

        Some((amm_params, pool))
    }

    fn swap_msg(
        config: &Config,
        voucher_denom: &str,
        standard_denom: &str,
        receiver: &Addr,
        plan: SwapPlan,
    ) -> Result<CosmosMsg, ContractError> {
        let msg = match plan {
            SwapPlan::ExactOutput { output, .. } => amm::ExecuteMsg::SwapExactOutput {
                output: coin(output.u128(), standard_denom),
                recipient: Some(receiver.to_string()),
                deadline: None,
            },
            SwapPlan::ExactInput { output, .. } => amm::ExecuteMsg::Swap {
                output_denom: standard_denom.to_string(),
                min_output: output,
                recipient: Some(receiver.to_string()),
                deadline: None,
            },
        };

        Ok(WasmMsg::Execute {
            contract_addr: config.amm.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![coin(plan.input().u128(), voucher_denom)],
        }
        .into())
    }

    pub fn on_recv_transfer(
        deps: DepsMut,
        info: MessageInfo,
        receiver: String,
        source_channel: String,
    ) -> Result<Response, ContractError> {
        let voucher = one_coin(&info)?;
        let receiver = deps.api.addr_validate(&receiver)?;
        let params = PARAMS.load(deps.storage)?;

        let credit = |amount: Coin| BankMsg::Send {
            to_address: receiver.to_string(),
            amount: vec![amount],
        };

        if !policy::is_eligible(&params, &source_channel) {
            deps.api.debug(&format!("onboarding: skipping transfer from {source_channel}"));
            return Ok(Response::new()
                .add_message(credit(voucher))
                .add_attribute("method", "on_recv_transfer")
                .add_attribute("action", "skip"));
        }

        let config = CONFIG.load(deps.storage)?;
        let venue = swap_venue(deps.as_ref(), &config, &voucher.denom);
        let balance = match &venue {
            Some((amm_params, _)) => {
                deps.querier
                    .query_balance(&receiver, &amm_params.standard_denom)?
                    .amount
            }
            None => Uint128::zero(),
        };
        let token_contract = conversion_target(deps.as_ref(), &config, &voucher.denom);

        let action = policy::decide(&PolicyInput {
            params: &params,
            transferred: &voucher,
            balance,
            pool: venue.as_ref().map(|(_, pool)| pool),
            fee: venue.as_ref().map_or(Decimal::zero(), |(amm_params, _)| amm_params.fee),
            max_swap_amount: venue
                .as_ref()
                .and_then(|(amm_params, _)| amm_params.max_swap_amount_for(&voucher.denom)),
            convertible: token_contract.is_some(),
        });

        let mut response = Response::new().add_attribute("method", "on_recv_transfer");
        let mut residual = voucher.amount;

        if let (Some(plan), Some((_, pool))) = (action.swap(), &venue) {
            response = response
                .add_message(swap_msg(
                    &config,
                    &voucher.denom,
                    &pool.standard_denom,
                    &receiver,
                    plan,
                )?)
                .add_attribute("swap_input", plan.input())
                .add_attribute("swap_output", plan.output());
            residual -= plan.input();
        }

        match (action.convert(), token_contract, &config.token_converter) {
            (Some(amount), Some(token_contract), Some(converter)) => {
                let convert = WasmMsg::Execute {
                    contract_addr: converter.to_string(),
                    msg: to_json_binary(&converter::ExecuteMsg::ConvertCoin {
                        receiver: receiver.to_string(),
                    })?,
                    funds: vec![coin(amount.u128(), &voucher.denom)],
                };
                let event = Event::new(CONVERT_COIN_EVENT)
                    .add_attribute("amount", amount)
                    .add_attribute("denom", &voucher.denom)
                    .add_attribute("receiver", &receiver)
                    .add_attribute("token_contract", token_contract);
                response = response.add_message(convert).add_event(event);
            }
            _ if !residual.is_zero() => {
                response = response.add_message(credit(coin(residual.u128(), &voucher.denom)));
            }
            _ => {}
        }

        Ok(response.add_attribute(
            "action",
            match action {
                OnboardingAction::NoOp => "none",
                OnboardingAction::Swap(_) => "swap",
                OnboardingAction::Convert(_) => "convert",
                OnboardingAction::SwapThenConvert(..) => "swap_then_convert",
            },
        ))
    }

    pub fn update_params(
        deps: DepsMut,
        info: MessageInfo,
        params: Params,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        params.validate()?;
        PARAMS.save(deps.storage, &params)?;

        Ok(Response::new()
            .add_attribute("method", "update_params")
            .add_attribute("enable_onboarding", params.enable_onboarding.to_string())
            .add_attribute("auto_swap_threshold", params.auto_swap_threshold))
    }

    pub fn update_config(
        deps: DepsMut,
        info: MessageInfo,
        amm: Option<String>,
        token_converter: Option<String>,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        let mut config = CONFIG.load(deps.storage)?;
        if let Some(amm) = amm {
            config.amm = deps.api.addr_validate(&amm)?;
        }
        if let Some(token_converter) = token_converter {
            config.token_converter = Some(deps.api.addr_validate(&token_converter)?);
        }
        CONFIG.save(deps.storage, &config)?;

        Ok(Response::new()
            .add_attribute("method", "update_config")
            .add_attribute("amm", config.amm))
    }

    pub fn clear_token_converter(
        deps: DepsMut,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
            config.token_converter = None;
            Ok(config)
        })?;

        Ok(Response::new().add_attribute("method", "clear_token_converter"))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Params {} => to_json_binary(&PARAMS.load(deps.storage)?),
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
    }
}
