#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use strand_gov_bridge_utils::{
    port::{PortExecuteMsg, PortInstantiateMsg, PortQueryMsg},
    proposal::ProposalRecord,
};

use crate::{error::ContractError, state::PROPOSALS};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: PortInstantiateMsg,
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
    msg: PortExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        PortExecuteMsg::AddProposalCall {
            id,
            title,
            description,
            call,
        } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;

            let mut record = PROPOSALS
                .may_load(deps.storage, id)?
                .unwrap_or(ProposalRecord {
                    id,
                    title,
                    description,
                    targets: vec![],
                    values: vec![],
                    signatures: vec![],
                    calldatas: vec![],
                });
            record.targets.push(call.target);
            record.values.push(call.value);
            record.signatures.push(call.signature);
            record.calldatas.extend(call.calldata);
            PROPOSALS.save(deps.storage, id, &record)?;

            Ok(Response::new()
                .add_attribute("method", "add_proposal_call")
                .add_attribute("id", id.to_string())
                .add_attribute("calls", record.targets.len().to_string()))
        }
        PortExecuteMsg::UpdateOwnership(action) => {
            cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new().add_attribute("method", "update_ownership"))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: PortQueryMsg) -> StdResult<Binary> {
    match msg {
        PortQueryMsg::Proposal { id } => to_json_binary(&PROPOSALS.load(deps.storage, id)?),
        PortQueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
    }
}
