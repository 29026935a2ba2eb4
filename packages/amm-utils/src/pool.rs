use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, Uint128, Uint256};
use sha2::{Digest, Sha256};

use crate::{
    error::PoolError,
    math::{get_input_amount, get_output_amount, mul_div, Rounding},
};

pub const LPT_DENOM_PREFIX: &str = "lpt-";

/// Pool token denomination for the pool pairing `paired_denom` with the standard denom.
pub fn lpt_denom(paired_denom: &str) -> String {
    let hash = hex::encode(Sha256::digest(paired_denom.as_bytes()));
    format!("{LPT_DENOM_PREFIX}{}", &hash[..40])
}

#[cw_serde]
pub struct LiquidityPool {
    pub lpt_denom: String,
    pub paired_denom: String,
    pub standard_denom: String,
    pub paired_reserve: Uint128,
    pub standard_reserve: Uint128,
    pub lpt_supply: Uint128,
}

#[cw_serde]
pub struct DepositOutcome {
    pub minted: Uint128,
    pub paired_used: Uint128,
    pub standard_used: Uint128,
}

#[cw_serde]
pub struct WithdrawOutcome {
    pub paired: Uint128,
    pub standard: Uint128,
}

impl LiquidityPool {
    pub fn new(standard_denom: impl Into<String>, paired_denom: impl Into<String>) -> Self {
        let paired_denom = paired_denom.into();
        Self {
            lpt_denom: lpt_denom(&paired_denom),
            paired_denom,
            standard_denom: standard_denom.into(),
            paired_reserve: Uint128::zero(),
            standard_reserve: Uint128::zero(),
            lpt_supply: Uint128::zero(),
        }
    }

    pub fn has_denom(&self, denom: &str) -> bool {
        denom == self.paired_denom || denom == self.standard_denom
    }

    pub fn reserve_of(&self, denom: &str) -> Result<Uint128, PoolError> {
        if denom == self.paired_denom {
            Ok(self.paired_reserve)
        } else if denom == self.standard_denom {
            Ok(self.standard_reserve)
        } else {
            Err(self.unknown(denom))
        }
    }

    /// The other side of the pool.
    pub fn counter_denom(&self, denom: &str) -> Result<&str, PoolError> {
        if denom == self.paired_denom {
            Ok(&self.standard_denom)
        } else if denom == self.standard_denom {
            Ok(&self.paired_denom)
        } else {
            Err(self.unknown(denom))
        }
    }

    pub fn product(&self) -> Uint256 {
        self.paired_reserve.full_mul(self.standard_reserve)
    }

    pub fn quote(
        &self,
        input_denom: &str,
        input_amount: Uint128,
        fee: Decimal,
    ) -> Result<Uint128, PoolError> {
        let input_reserve = self.reserve_of(input_denom)?;
        let output_reserve = self.reserve_of(self.counter_denom(input_denom)?)?;
        get_output_amount(input_amount, input_reserve, output_reserve, fee)
    }

    /// Input needed to take exactly `output_amount` of `output_denom` out of the pool.
    pub fn quote_exact_output(
        &self,
        output_denom: &str,
        output_amount: Uint128,
        fee: Decimal,
    ) -> Result<Uint128, PoolError> {
        let output_reserve = self.reserve_of(output_denom)?;
        let input_reserve = self.reserve_of(self.counter_denom(output_denom)?)?;
        get_input_amount(output_amount, input_reserve, output_reserve, fee)
    }

    pub fn swap(
        &mut self,
        input_denom: &str,
        input_amount: Uint128,
        min_output: Uint128,
        fee: Decimal,
    ) -> Result<Uint128, PoolError> {
        let output = self.quote(input_denom, input_amount, fee)?;
        if output < min_output {
            return Err(PoolError::SlippageExceeded { output, min_output });
        }
        self.apply_trade(input_denom, input_amount, output)?;
        Ok(output)
    }

    /// Takes exactly `output_amount` out of the pool and returns the input charged for it.
    pub fn swap_exact_output(
        &mut self,
        output_denom: &str,
        output_amount: Uint128,
        max_input: Uint128,
        fee: Decimal,
    ) -> Result<Uint128, PoolError> {
        let input = self.quote_exact_output(output_denom, output_amount, fee)?;
        if input > max_input {
            return Err(PoolError::MaxInputExceeded { input, max_input });
        }
        let input_denom = self.counter_denom(output_denom)?.to_string();
        self.apply_trade(&input_denom, input, output_amount)?;
        Ok(input)
    }

    fn apply_trade(
        &mut self,
        input_denom: &str,
        input: Uint128,
        output: Uint128,
    ) -> Result<(), PoolError> {
        if !self.has_denom(input_denom) {
            return Err(self.unknown(input_denom));
        }
        let (input_reserve, output_reserve) = if input_denom == self.paired_denom {
            (&mut self.paired_reserve, &mut self.standard_reserve)
        } else {
            (&mut self.standard_reserve, &mut self.paired_reserve)
        };

        // output is always strictly below the reserve, checked again here so that a
        // reserve can never be emptied by a trade
        if output >= *output_reserve {
            return Err(PoolError::InsufficientLiquidity {});
        }
        *input_reserve = input_reserve
            .checked_add(input)
            .map_err(|_| PoolError::Overflow {})?;
        *output_reserve -= output;

        Ok(())
    }

    /// Adds liquidity. An empty pool takes both amounts as the baseline ratio and
    /// mints `standard_in` shares; otherwise the smaller of the two contribution
    /// ratios decides the shares and only the matching amounts are taken.
    pub fn deposit(
        &mut self,
        paired_in: Uint128,
        standard_in: Uint128,
    ) -> Result<DepositOutcome, PoolError> {
        if paired_in.is_zero() || standard_in.is_zero() {
            return Err(PoolError::InvalidAmount {});
        }

        let outcome = if self.lpt_supply.is_zero() {
            DepositOutcome {
                minted: standard_in,
                paired_used: paired_in,
                standard_used: standard_in,
            }
        } else {
            if self.paired_reserve.is_zero() || self.standard_reserve.is_zero() {
                return Err(PoolError::InsufficientLiquidity {});
            }
            let supply = self.lpt_supply;
            let minted = std::cmp::min(
                mul_div(paired_in, supply, self.paired_reserve, Rounding::Down)?,
                mul_div(standard_in, supply, self.standard_reserve, Rounding::Down)?,
            );
            if minted.is_zero() {
                return Err(PoolError::InvalidAmount {});
            }
            DepositOutcome {
                minted,
                paired_used: mul_div(minted, self.paired_reserve, supply, Rounding::Up)?,
                standard_used: mul_div(minted, self.standard_reserve, supply, Rounding::Up)?,
            }
        };

        self.paired_reserve = self
            .paired_reserve
            .checked_add(outcome.paired_used)
            .map_err(|_| PoolError::Overflow {})?;
        self.standard_reserve = self
            .standard_reserve
            .checked_add(outcome.standard_used)
            .map_err(|_| PoolError::Overflow {})?;
        self.lpt_supply = self
            .lpt_supply
            .checked_add(outcome.minted)
            .map_err(|_| PoolError::Overflow {})?;

        Ok(outcome)
    }

    /// Burns `shares` owned by a holder with `holder_balance` and returns the
    /// pro-rata reserves.
    pub fn withdraw(
        &mut self,
        shares: Uint128,
        holder_balance: Uint128,
    ) -> Result<WithdrawOutcome, PoolError> {
        if shares.is_zero() {
            return Err(PoolError::InvalidAmount {});
        }
        if shares > holder_balance {
            return Err(PoolError::InsufficientShares {
                requested: shares,
                available: holder_balance,
            });
        }
        if shares > self.lpt_supply {
            return Err(PoolError::InsufficientShares {
                requested: shares,
                available: self.lpt_supply,
            });
        }

        let supply = self.lpt_supply;
        let outcome = WithdrawOutcome {
            paired: mul_div(shares, self.paired_reserve, supply, Rounding::Down)?,
            standard: mul_div(shares, self.standard_reserve, supply, Rounding::Down)?,
        };

        self.paired_reserve -= outcome.paired;
        self.standard_reserve -= outcome.standard;
        self.lpt_supply -= shares;

        Ok(outcome)
    }

    fn unknown(&self, denom: &str) -> PoolError {
        PoolError::UnknownDenom {
            denom: denom.to_string(),
            lpt_denom: self.lpt_denom.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "ibc/usdc";
    const NATIVE: &str = "atide";

    fn fee() -> Decimal {
        Decimal::permille(3)
    }

    fn pool(paired: u128, standard: u128) -> LiquidityPool {
        let mut pool = LiquidityPool::new(NATIVE, USDC);
        pool.deposit(paired.into(), standard.into()).unwrap();
        pool
    }

    #[test]
    fn lpt_denom_is_deterministic() {
        assert_eq!(lpt_denom(USDC), lpt_denom(USDC));
        assert_ne!(lpt_denom(USDC), lpt_denom("uatom"));
        assert!(lpt_denom(USDC).starts_with(LPT_DENOM_PREFIX));
        assert_eq!(lpt_denom(USDC).len(), LPT_DENOM_PREFIX.len() + 40);
    }

    #[test]
    fn swap_moves_reserves() {
        let mut pool = pool(1000, 1000);

        let out = pool.swap(USDC, 100u128.into(), Uint128::zero(), fee()).unwrap();

        assert_eq!(out, Uint128::new(90));
        assert_eq!(pool.paired_reserve, Uint128::new(1100));
        assert_eq!(pool.standard_reserve, Uint128::new(910));
        assert_eq!(pool.lpt_supply, Uint128::new(1000));
    }

    #[test]
    fn swap_never_decreases_product() {
        let mut pool = pool(5_000_000, 2_000_000_000);

        for (denom, amount) in [
            (USDC, 1u128),
            (NATIVE, 1_000),
            (USDC, 77_777),
            (NATIVE, 999_999_999),
            (USDC, 4_000_000),
        ] {
            let before = pool.product();
            pool.swap(denom, amount.into(), Uint128::zero(), fee())
                .unwrap_or_default();
            assert!(pool.product() >= before);
        }

        let before = pool.product();
        pool.swap_exact_output(NATIVE, 12_345u128.into(), Uint128::MAX, fee())
            .unwrap();
        assert!(pool.product() >= before);
    }

    #[test]
    fn swap_respects_min_output() {
        let mut pool = pool(1000, 1000);
        let err = pool
            .swap(USDC, 100u128.into(), 91u128.into(), fee())
            .unwrap_err();

        assert_eq!(
            err,
            PoolError::SlippageExceeded {
                output: Uint128::new(90),
                min_output: Uint128::new(91)
            }
        );
        // failed swaps leave the pool untouched
        assert_eq!(pool.paired_reserve, Uint128::new(1000));
    }

    #[test]
    fn swap_exact_output_delivers_exact_amount() {
        let mut pool = pool(10_000_000_000, 10_000 * 10u128.pow(18));
        let wanted = Uint128::new(3 * 10u128.pow(18));

        let quoted = pool.quote_exact_output(NATIVE, wanted, fee()).unwrap();
        let charged = pool
            .swap_exact_output(NATIVE, wanted, quoted, fee())
            .unwrap();

        assert_eq!(quoted, charged);
        assert_eq!(
            pool.standard_reserve,
            Uint128::new(10_000 * 10u128.pow(18)) - wanted
        );
        assert_eq!(pool.paired_reserve, Uint128::new(10_000_000_000) + charged);
    }

    #[test]
    fn swap_exact_output_respects_max_input() {
        let mut pool = pool(1000, 1000);
        let err = pool
            .swap_exact_output(NATIVE, 90u128.into(), 10u128.into(), fee())
            .unwrap_err();
        assert!(matches!(err, PoolError::MaxInputExceeded { .. }));
    }

    #[test]
    fn unknown_denom_is_rejected() {
        let pool = pool(1000, 1000);
        let err = pool.quote("uatom", 10u128.into(), fee()).unwrap_err();
        assert_eq!(
            err,
            PoolError::UnknownDenom {
                denom: "uatom".to_string(),
                lpt_denom: lpt_denom(USDC)
            }
        );
    }

    #[test]
    fn first_deposit_sets_baseline() {
        let mut pool = LiquidityPool::new(NATIVE, USDC);
        let outcome = pool.deposit(500u128.into(), 2000u128.into()).unwrap();

        assert_eq!(outcome.minted, Uint128::new(2000));
        assert_eq!(outcome.paired_used, Uint128::new(500));
        assert_eq!(outcome.standard_used, Uint128::new(2000));
        assert_eq!(pool.lpt_supply, Uint128::new(2000));
    }

    #[test]
    fn deposit_mints_proportionally() {
        let mut pool = pool(500, 2000);

        // 10% of the paired side but 20% of the standard side: paired limits
        let outcome = pool.deposit(50u128.into(), 400u128.into()).unwrap();

        assert_eq!(outcome.minted, Uint128::new(200));
        assert_eq!(outcome.paired_used, Uint128::new(50));
        assert_eq!(outcome.standard_used, Uint128::new(200));
        assert_eq!(pool.paired_reserve, Uint128::new(550));
        assert_eq!(pool.standard_reserve, Uint128::new(2200));
        assert_eq!(pool.lpt_supply, Uint128::new(2200));
    }

    #[test]
    fn deposit_too_small_to_mint_fails() {
        let mut pool = pool(1_000_000, 1);
        let err = pool.deposit(1u128.into(), 1u128.into()).unwrap_err();
        assert_eq!(err, PoolError::InvalidAmount {});
    }

    #[test]
    fn withdraw_returns_pro_rata_reserves() {
        let mut pool = pool(500, 2000);

        let outcome = pool.withdraw(500u128.into(), 2000u128.into()).unwrap();

        assert_eq!(outcome.paired, Uint128::new(125));
        assert_eq!(outcome.standard, Uint128::new(500));
        assert_eq!(pool.lpt_supply, Uint128::new(1500));
    }

    #[test]
    fn full_withdraw_empties_pool() {
        let mut pool = pool(500, 2000);
        pool.swap(USDC, 100u128.into(), Uint128::zero(), fee())
            .unwrap();

        pool.withdraw(2000u128.into(), 2000u128.into()).unwrap();

        assert!(pool.lpt_supply.is_zero());
        assert!(pool.paired_reserve.is_zero());
        assert!(pool.standard_reserve.is_zero());

        // an emptied pool takes a new baseline
        let outcome = pool.deposit(10u128.into(), 10u128.into()).unwrap();
        assert_eq!(outcome.minted, Uint128::new(10));
    }

    #[test]
    fn withdraw_more_than_held_fails() {
        let mut pool = pool(500, 2000);
        let err = pool.withdraw(600u128.into(), 500u128.into()).unwrap_err();
        assert_eq!(
            err,
            PoolError::InsufficientShares {
                requested: Uint128::new(600),
                available: Uint128::new(500)
            }
        );
    }
}
