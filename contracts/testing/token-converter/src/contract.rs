#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use strand_token_converter_utils::{ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::{error::ContractError, state::TOKEN_PAIRS};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterTokenPair {
            denom,
            cw20_contract,
            enabled,
        } => execute::register_token_pair(deps, info, denom, cw20_contract, enabled),
        ExecuteMsg::ToggleTokenPair { denom } => execute::toggle_token_pair(deps, info, denom),
        ExecuteMsg::ConvertCoin { receiver } => execute::convert_coin(deps, info, receiver),
        ExecuteMsg::UpdateOwnership(action) => {
            cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new().add_attribute("method", "update_ownership"))
        }
    }
}

mod execute {
    use cosmwasm_std::{to_json_binary, DepsMut, MessageInfo, Response, WasmMsg};
    use cw_ownable::assert_owner;
    use cw_utils::one_coin;
    use strand_token_converter_utils::TokenPair;

    use crate::{state::TOKEN_PAIRS, ContractError};

    pub fn register_token_pair(
        deps: DepsMut,
        info: MessageInfo,
        denom: String,
        cw20_contract: String,
        enabled: bool,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        let pair = TokenPair {
            denom: denom.clone(),
            cw20_contract: deps.api.addr_validate(&cw20_contract)?,
            enabled,
        };
        TOKEN_PAIRS.save(deps.storage, &denom, &pair)?;

        Ok(Response::new()
            .add_attribute("method", "register_token_pair")
            .add_attribute("denom", denom)
            .add_attribute("cw20_contract", pair.cw20_contract))
    }

    pub fn toggle_token_pair(
        deps: DepsMut,
        info: MessageInfo,
        denom: String,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        let pair = TOKEN_PAIRS.update(deps.storage, &denom, |pair| match pair {
            Some(mut pair) => {
                pair.enabled = !pair.enabled;
                Ok(pair)
            }
            None => Err(ContractError::TokenPairNotFound(denom.clone())),
        })?;

        Ok(Response::new()
            .add_attribute("method", "toggle_token_pair")
            .add_attribute("denom", denom)
            .add_attribute("enabled", pair.enabled.to_string()))
    }

    pub fn convert_coin(
        deps: DepsMut,
        info: MessageInfo,
        receiver: String,
    ) -> Result<Response, ContractError> {
        let voucher = one_coin(&info)?;
        let receiver = deps.api.addr_validate(&receiver)?;

        let pair = TOKEN_PAIRS
            .may_load(deps.storage, &voucher.denom)?
            .ok_or_else(|| ContractError::TokenPairNotFound(voucher.denom.clone()))?;
        if !pair.enabled {
            return Err(ContractError::TokenPairDisabled(voucher.denom));
        }

        // the voucher stays escrowed here; the cw20 is minted in its place
        let mint = WasmMsg::Execute {
            contract_addr: pair.cw20_contract.to_string(),
            msg: to_json_binary(&cw20::Cw20ExecuteMsg::Mint {
                recipient: receiver.to_string(),
                amount: voucher.amount,
            })?,
            funds: vec![],
        };

        Ok(Response::new()
            .add_message(mint)
            .add_attribute("method", "convert_coin")
            .add_attribute("denom", voucher.denom)
            .add_attribute("amount", voucher.amount)
            .add_attribute("receiver", receiver))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TokenPair { denom } => {
            to_json_binary(&TOKEN_PAIRS.may_load(deps.storage, &denom)?)
        }
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
    }
}
