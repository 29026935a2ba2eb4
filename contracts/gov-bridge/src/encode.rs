//! Turns proposal metadata into the calls the port executes.

use strand_gov_bridge_utils::proposal::{
    LendingMarketMetadata, ProposalCall, ProposalMetadata, TreasuryMetadata,
};

use crate::ContractError;

pub fn encode(metadata: &ProposalMetadata) -> Result<Vec<ProposalCall>, ContractError> {
    match metadata {
        ProposalMetadata::LendingMarket(metadata) => encode_lending_market(metadata),
        ProposalMetadata::Treasury(metadata) => encode_treasury(metadata),
    }
}

fn encode_lending_market(
    metadata: &LendingMarketMetadata,
) -> Result<Vec<ProposalCall>, ContractError> {
    let len = metadata.targets.len();
    if len == 0 {
        return Err(ContractError::MalformedMetadata {
            reason: "no calls".to_string(),
        });
    }
    if metadata.values.len() != len
        || metadata.calldatas.len() != len
        || metadata.signatures.len() != len
    {
        return Err(ContractError::MalformedMetadata {
            reason: format!(
                "length mismatch: {} targets, {} values, {} calldatas, {} signatures",
                len,
                metadata.values.len(),
                metadata.calldatas.len(),
                metadata.signatures.len()
            ),
        });
    }

    Ok(metadata
        .targets
        .iter()
        .zip(&metadata.values)
        .zip(&metadata.calldatas)
        .zip(&metadata.signatures)
        .map(|(((target, value), calldata), signature)| ProposalCall {
            target: target.clone(),
            value: *value,
            signature: signature.clone(),
            calldata: Some(calldata.clone()),
        })
        .collect())
}

fn encode_treasury(metadata: &TreasuryMetadata) -> Result<Vec<ProposalCall>, ContractError> {
    if metadata.amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }
    if metadata.recipient.is_empty() || metadata.denom.is_empty() {
        return Err(ContractError::MalformedMetadata {
            reason: "treasury recipient and denom are required".to_string(),
        });
    }

    Ok(vec![ProposalCall {
        target: metadata.recipient.clone(),
        value: metadata.amount,
        signature: metadata.denom.clone(),
        calldata: None,
    }])
}
