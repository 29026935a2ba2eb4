use cosmwasm_std::{StdError, Uint128};
use cw_ownable::OwnershipError;
use cw_utils::PaymentError;
use strand_amm_utils::error::PoolError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("Pool {lpt_denom} not found")]
    PoolNotFound { lpt_denom: String },

    #[error("Pool for {paired_denom} already exists")]
    PoolAlreadyExists { paired_denom: String },

    #[error("Invalid denom: {denom}")]
    InvalidDenom { denom: String },

    #[error("Invalid funds: expected {expected}")]
    InvalidFunds { expected: String },

    #[error("Standard reserve {reserve} would exceed the per pool maximum {max}")]
    MaxStandardCoinPerPoolExceeded { reserve: Uint128, max: Uint128 },

    #[error("Deadline exceeded")]
    Expired {},

    #[error("Standard denom can't be changed")]
    StandardDenomImmutable {},
}
