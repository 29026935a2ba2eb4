#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use strand_gov_bridge_utils::{
    msg::{Config, ExecuteMsg, InstantiateMsg, QueryMsg},
    port::PortQueryMsg,
    proposal::{ProposalMetadata, ProposalRecord},
};

use crate::{error::ContractError, state::CONFIG};

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

    let config = Config {
        authority: deps.api.addr_validate(&msg.authority)?,
        port: msg
            .port
            .map(|port| deps.api.addr_validate(&port))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("authority", config.authority))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::LendingMarketProposal {
            title,
            description,
            metadata,
        } => execute::execute_proposal(
            deps,
            info,
            title,
            description,
            ProposalMetadata::LendingMarket(metadata),
        ),
        ExecuteMsg::TreasuryProposal {
            title,
            description,
            metadata,
        } => execute::execute_proposal(
            deps,
            info,
            title,
            description,
            ProposalMetadata::Treasury(metadata),
        ),
        ExecuteMsg::UpdatePort { port } => execute::update_port(deps, info, port),
    }
}

mod execute {
    use cosmwasm_std::{to_json_binary, DepsMut, MessageInfo, Response, StdResult, WasmMsg};
    use cw_utils::nonpayable;
    use strand_gov_bridge_utils::{port::PortExecuteMsg, proposal::ProposalMetadata};

    use crate::{
        encode::encode,
        state::{CONFIG, EXECUTED},
        ContractError,
    };

    fn assert_authority(deps: &DepsMut, info: &MessageInfo) -> Result<(), ContractError> {
        let config = CONFIG.load(deps.storage)?;
        if info.sender != config.authority {
            return Err(ContractError::Unauthorized {});
        }
        Ok(())
    }

    pub fn execute_proposal(
        deps: DepsMut,
        info: MessageInfo,
        title: String,
        description: String,
        metadata: ProposalMetadata,
    ) -> Result<Response, ContractError> {
        assert_authority(&deps, &info)?;
        nonpayable(&info)?;

        let calls = encode(&metadata)?;
        let port = CONFIG
            .load(deps.storage)?
            .port
            .ok_or(ContractError::PortNotConfigured {})?;

        let id = metadata.prop_id();
        if EXECUTED.has(deps.storage, id) {
            return Err(ContractError::ProposalAlreadyExecuted { id });
        }
        EXECUTED.save(deps.storage, id, &())?;

        let msgs = calls
            .into_iter()
            .map(|call| {
                Ok(WasmMsg::Execute {
                    contract_addr: port.to_string(),
                    msg: to_json_binary(&PortExecuteMsg::AddProposalCall {
                        id,
                        title: title.clone(),
                        description: description.clone(),
                        call,
                    })?,
                    funds: vec![],
                })
            })
            .collect::<StdResult<Vec<_>>>()?;

        Ok(Response::new()
            .add_attribute("method", "execute_proposal")
            .add_attribute("prop_id", id.to_string())
            .add_attribute("calls", msgs.len().to_string())
            .add_messages(msgs))
    }

    pub fn update_port(
        deps: DepsMut,
        info: MessageInfo,
        port: String,
    ) -> Result<Response, ContractError> {
        assert_authority(&deps, &info)?;

        let port = deps.api.addr_validate(&port)?;
        CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
            config.port = Some(port.clone());
            Ok(config)
        })?;

        Ok(Response::new()
            .add_attribute("method", "update_port")
            .add_attribute("port", port))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::ProposalRecord { id } => {
            let port = CONFIG
                .load(deps.storage)?
                .port
                .ok_or(ContractError::PortNotConfigured {})?;
            let record: ProposalRecord = deps
                .querier
                .query_wasm_smart(port, &PortQueryMsg::Proposal { id })?;
            Ok(to_json_binary(&record)?)
        }
    }
}
