use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Malformed proposal metadata: {reason}")]
    MalformedMetadata { reason: String },

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Port contract is not configured")]
    PortNotConfigured {},

    #[error("Proposal {id} was already executed")]
    ProposalAlreadyExecuted { id: u64 },
}
