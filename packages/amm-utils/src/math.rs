//! Constant product pricing.
//!
//! All intermediate values are computed over 512 bits so that products of two
//! reserves and the fee denominator never overflow; results are narrowed back to
//! `Uint128` and fail with [`PoolError::Overflow`] if they don't fit.

use cosmwasm_std::{Decimal, Fraction, Uint128, Uint256, Uint512};

use crate::error::PoolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

fn wide(value: Uint128) -> Uint512 {
    Uint512::from(value.u128())
}

fn narrow(value: Uint512) -> Result<Uint128, PoolError> {
    let value = Uint256::try_from(value).map_err(|_| PoolError::Overflow {})?;
    Uint128::try_from(value).map_err(|_| PoolError::Overflow {})
}

fn divide(
    numerator: Uint512,
    denominator: Uint512,
    rounding: Rounding,
) -> Result<Uint128, PoolError> {
    let quotient = numerator
        .checked_div(denominator)
        .map_err(|_| PoolError::DivisionByZero {})?;
    let remainder = numerator
        .checked_rem(denominator)
        .map_err(|_| PoolError::DivisionByZero {})?;

    match rounding {
        Rounding::Up if !remainder.is_zero() => narrow(quotient + Uint512::one()),
        _ => narrow(quotient),
    }
}

/// Computes `a * b / c` without intermediate overflow.
pub fn mul_div(
    a: Uint128,
    b: Uint128,
    c: Uint128,
    rounding: Rounding,
) -> Result<Uint128, PoolError> {
    divide(wide(a) * wide(b), wide(c), rounding)
}

/// Splits the fee rate into the fixed-point denominator and the part of it
/// that stays with the trader, i.e. `(D, D - n)` for a rate of `n / D`.
fn fee_parts(fee: Decimal) -> Result<(Uint512, Uint512), PoolError> {
    let denominator = fee.denominator();
    let retained = denominator
        .checked_sub(fee.numerator())
        .map_err(|_| PoolError::InvalidFee {})?;
    if retained.is_zero() {
        return Err(PoolError::InvalidFee {});
    }
    Ok((wide(denominator), wide(retained)))
}

/// Output paid for an exact input:
/// `floor(y * dx * (1 - f) / (x + dx * (1 - f)))`.
pub fn get_output_amount(
    input_amount: Uint128,
    input_reserve: Uint128,
    output_reserve: Uint128,
    fee: Decimal,
) -> Result<Uint128, PoolError> {
    if input_amount.is_zero() {
        return Err(PoolError::InvalidAmount {});
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(PoolError::InsufficientLiquidity {});
    }

    let (denominator, retained) = fee_parts(fee)?;
    let input_with_fee = wide(input_amount) * retained;
    let numerator = input_with_fee * wide(output_reserve);
    let denominator = wide(input_reserve) * denominator + input_with_fee;

    let output = divide(numerator, denominator, Rounding::Down)?;
    if output.is_zero() {
        return Err(PoolError::InputTooSmall {});
    }
    Ok(output)
}

/// Smallest input whose output is at least `output_amount`:
/// `ceil(x * dy / ((y - dy) * (1 - f)))`.
pub fn get_input_amount(
    output_amount: Uint128,
    input_reserve: Uint128,
    output_reserve: Uint128,
    fee: Decimal,
) -> Result<Uint128, PoolError> {
    if output_amount.is_zero() {
        return Err(PoolError::InvalidAmount {});
    }
    if input_reserve.is_zero() || output_amount >= output_reserve {
        return Err(PoolError::InsufficientLiquidity {});
    }

    let (denominator, retained) = fee_parts(fee)?;
    let numerator = wide(input_reserve) * wide(output_amount) * denominator;
    let denominator = wide(output_reserve - output_amount) * retained;

    divide(numerator, denominator, Rounding::Up)
}
