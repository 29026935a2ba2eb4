use cosmwasm_std::Uint128;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PoolError {
    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Denom {denom} is not part of pool {lpt_denom}")]
    UnknownDenom { denom: String, lpt_denom: String },

    #[error("Insufficient liquidity")]
    InsufficientLiquidity {},

    #[error("Input amount is too small to produce any output")]
    InputTooSmall {},

    #[error("Slippage exceeded: got {output}, expected at least {min_output}")]
    SlippageExceeded {
        output: Uint128,
        min_output: Uint128,
    },

    #[error("Required input {input} exceeds the maximum {max_input}")]
    MaxInputExceeded { input: Uint128, max_input: Uint128 },

    #[error("Insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        requested: Uint128,
        available: Uint128,
    },

    #[error("Fee rate must be lower than one")]
    InvalidFee {},

    #[error("Arithmetic overflow in pool maths")]
    Overflow {},

    #[error("Division by zero in pool maths")]
    DivisionByZero {},
}
