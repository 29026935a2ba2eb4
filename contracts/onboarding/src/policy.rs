//! Onboarding decision. Everything here is pure: the contract gathers the
//! balances, the pool and the token mapping, and turns the returned action into
//! messages.

use cosmwasm_std::{Coin, Decimal, Uint128};
use strand_amm_utils::LiquidityPool;
use strand_onboarding_utils::msg::Params;

pub struct PolicyInput<'a> {
    pub params: &'a Params,
    /// The relayed voucher.
    pub transferred: &'a Coin,
    /// Receiver's balance of the standard denom before the transfer is handled.
    pub balance: Uint128,
    /// Pool pairing the voucher with the standard denom, if any.
    pub pool: Option<&'a LiquidityPool>,
    pub fee: Decimal,
    /// Cap on the voucher amount the auto-swap may spend.
    pub max_swap_amount: Option<Uint128>,
    /// Whether the voucher has a usable cw20 mapping.
    pub convertible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapPlan {
    /// Buy exactly `output` of the standard denom for `input` of the voucher.
    ExactOutput { input: Uint128, output: Uint128 },
    /// Sell `input` of the voucher, expecting `output` of the standard denom.
    ExactInput { input: Uint128, output: Uint128 },
}

impl SwapPlan {
    pub fn input(&self) -> Uint128 {
        match self {
            SwapPlan::ExactOutput { input, .. } | SwapPlan::ExactInput { input, .. } => *input,
        }
    }

    pub fn output(&self) -> Uint128 {
        match self {
            SwapPlan::ExactOutput { output, .. } | SwapPlan::ExactInput { output, .. } => *output,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnboardingAction {
    /// The voucher is credited as is.
    NoOp,
    /// Swap, then credit what is left of the voucher as is.
    Swap(SwapPlan),
    Convert(Uint128),
    SwapThenConvert(SwapPlan, Uint128),
}

impl OnboardingAction {
    pub fn swap(&self) -> Option<SwapPlan> {
        match self {
            OnboardingAction::Swap(plan) | OnboardingAction::SwapThenConvert(plan, _) => {
                Some(*plan)
            }
            _ => None,
        }
    }

    pub fn convert(&self) -> Option<Uint128> {
        match self {
            OnboardingAction::Convert(amount) | OnboardingAction::SwapThenConvert(_, amount) => {
                Some(*amount)
            }
            _ => None,
        }
    }
}

pub fn is_eligible(params: &Params, source_channel: &str) -> bool {
    params.enable_onboarding
        && params
            .whitelisted_channels
            .iter()
            .any(|channel| channel == source_channel)
}

pub fn decide(input: &PolicyInput) -> OnboardingAction {
    let swap = plan_swap(input);
    let residual = input
        .transferred
        .amount
        .saturating_sub(swap.map(|plan| plan.input()).unwrap_or_default());

    match (swap, input.convertible && !residual.is_zero()) {
        (None, false) => OnboardingAction::NoOp,
        (None, true) => OnboardingAction::Convert(residual),
        (Some(plan), false) => OnboardingAction::Swap(plan),
        (Some(plan), true) => OnboardingAction::SwapThenConvert(plan, residual),
    }
}

fn plan_swap(input: &PolicyInput) -> Option<SwapPlan> {
    let threshold = input.params.auto_swap_threshold;
    if input.balance >= threshold {
        return None;
    }
    let target = threshold - input.balance;

    let pool = input.pool?;
    let denom = input.transferred.denom.as_str();
    if denom != pool.paired_denom {
        return None;
    }

    let available = input
        .max_swap_amount
        .map_or(input.transferred.amount, |cap| {
            cap.min(input.transferred.amount)
        });
    if available.is_zero() {
        return None;
    }

    match pool.quote_exact_output(&pool.standard_denom, target, input.fee) {
        Ok(required) if required <= available => Some(SwapPlan::ExactOutput {
            input: required,
            output: target,
        }),
        // not enough to reach the threshold: spend what may be spent
        _ => pool
            .quote(denom, available, input.fee)
            .ok()
            .map(|output| SwapPlan::ExactInput {
                input: available,
                output,
            }),
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;

    use super::*;

    const NATIVE: &str = "atide";
    const VOUCHER: &str = "ibc/voucher";
    const CHANNEL: &str = "channel-0";
    const THRESHOLD: u128 = 3_000_000_000_000_000_000;
    const TRANSFER: u128 = 10_000_000_000;

    fn params() -> Params {
        Params {
            enable_onboarding: true,
            auto_swap_threshold: Uint128::new(THRESHOLD),
            whitelisted_channels: vec![CHANNEL.to_string()],
        }
    }

    fn pool() -> LiquidityPool {
        let mut pool = LiquidityPool::new(NATIVE, VOUCHER);
        pool.deposit(
            Uint128::new(10_000_000_000),
            Uint128::new(10_000 * 10u128.pow(18)),
        )
        .unwrap();
        pool
    }

    fn input<'a>(
        params: &'a Params,
        transferred: &'a Coin,
        pool: Option<&'a LiquidityPool>,
        balance: u128,
    ) -> PolicyInput<'a> {
        PolicyInput {
            params,
            transferred,
            balance: Uint128::new(balance),
            pool,
            fee: Decimal::permille(3),
            max_swap_amount: None,
            convertible: true,
        }
    }

    #[test]
    fn eligibility() {
        let mut params = params();
        assert!(is_eligible(&params, CHANNEL));
        assert!(!is_eligible(&params, "channel-7"));

        params.enable_onboarding = false;
        assert!(!is_eligible(&params, CHANNEL));
    }

    #[test]
    fn empty_balance_is_topped_up_to_threshold() {
        let (params, pool) = (params(), pool());
        let transferred = coin(TRANSFER, VOUCHER);

        let action = decide(&input(&params, &transferred, Some(&pool), 0));

        let plan = action.swap().unwrap();
        assert_eq!(plan.output(), Uint128::new(THRESHOLD));
        assert!(matches!(plan, SwapPlan::ExactOutput { .. }));
        assert_eq!(
            plan.input(),
            pool.quote_exact_output(NATIVE, Uint128::new(THRESHOLD), Decimal::permille(3))
                .unwrap()
        );
        assert_eq!(
            action.convert(),
            Some(Uint128::new(TRANSFER) - plan.input())
        );
    }

    #[test]
    fn partial_balance_swaps_the_deficit() {
        let (params, pool) = (params(), pool());
        let transferred = coin(TRANSFER, VOUCHER);
        let balance = THRESHOLD / 3;

        let action = decide(&input(&params, &transferred, Some(&pool), balance));

        assert_eq!(
            action.swap().unwrap().output(),
            Uint128::new(THRESHOLD - balance)
        );
    }

    #[test]
    fn balance_at_or_above_threshold_does_not_swap() {
        let (params, pool) = (params(), pool());
        let transferred = coin(TRANSFER, VOUCHER);

        for balance in [THRESHOLD, THRESHOLD + 1] {
            let action = decide(&input(&params, &transferred, Some(&pool), balance));
            assert_eq!(action, OnboardingAction::Convert(Uint128::new(TRANSFER)));
        }
    }

    #[test]
    fn missing_pool_does_not_swap() {
        let params = params();
        let transferred = coin(TRANSFER, VOUCHER);

        let action = decide(&input(&params, &transferred, None, 0));
        assert_eq!(action, OnboardingAction::Convert(Uint128::new(TRANSFER)));

        let mut no_convert = input(&params, &transferred, None, 0);
        no_convert.convertible = false;
        assert_eq!(decide(&no_convert), OnboardingAction::NoOp);
    }

    #[test]
    fn drained_pool_does_not_swap() {
        let params = params();
        let pool = LiquidityPool::new(NATIVE, VOUCHER);
        let transferred = coin(TRANSFER, VOUCHER);

        let action = decide(&input(&params, &transferred, Some(&pool), 0));
        assert_eq!(action, OnboardingAction::Convert(Uint128::new(TRANSFER)));
    }

    #[test]
    fn insufficient_transfer_swaps_everything_available() {
        let (params, pool) = (params(), pool());
        let transferred = coin(1_000, VOUCHER);

        let action = decide(&input(&params, &transferred, Some(&pool), 0));

        let plan = action.swap().unwrap();
        assert_eq!(
            plan,
            SwapPlan::ExactInput {
                input: Uint128::new(1_000),
                output: pool
                    .quote(VOUCHER, Uint128::new(1_000), Decimal::permille(3))
                    .unwrap()
            }
        );
        assert!(plan.output() < Uint128::new(THRESHOLD));
        // nothing left to convert
        assert_eq!(action, OnboardingAction::Swap(plan));
    }

    #[test]
    fn insufficient_transfer_on_partial_balance_swaps_everything() {
        let (params, pool) = (params(), pool());
        let transferred = coin(1_000, VOUCHER);
        let balance = THRESHOLD / 3;

        let action = decide(&input(&params, &transferred, Some(&pool), balance));

        let output = pool
            .quote(VOUCHER, Uint128::new(1_000), Decimal::permille(3))
            .unwrap();
        assert_eq!(
            action,
            OnboardingAction::Swap(SwapPlan::ExactInput {
                input: Uint128::new(1_000),
                output,
            })
        );
        assert!(Uint128::new(balance) + output < Uint128::new(THRESHOLD));
    }

    #[test]
    fn swap_cap_limits_input() {
        let (params, pool) = (params(), pool());
        let transferred = coin(TRANSFER, VOUCHER);

        let mut capped = input(&params, &transferred, Some(&pool), 0);
        capped.max_swap_amount = Some(Uint128::new(500));
        let action = decide(&capped);

        assert_eq!(action.swap().unwrap().input(), Uint128::new(500));
        assert_eq!(action.convert(), Some(Uint128::new(TRANSFER - 500)));

        capped.max_swap_amount = Some(Uint128::zero());
        assert_eq!(
            decide(&capped),
            OnboardingAction::Convert(Uint128::new(TRANSFER))
        );
    }

    #[test]
    fn dust_transfer_without_output_does_not_swap() {
        let params = params();
        let mut pool = LiquidityPool::new(NATIVE, VOUCHER);
        pool.deposit(Uint128::new(10u128.pow(30)), Uint128::new(10))
            .unwrap();
        let transferred = coin(1, VOUCHER);

        let mut dust = input(&params, &transferred, Some(&pool), 0);
        dust.convertible = false;
        assert_eq!(decide(&dust), OnboardingAction::NoOp);
    }

    #[test]
    fn zero_threshold_never_swaps() {
        let mut params = params();
        params.auto_swap_threshold = Uint128::zero();
        let pool = pool();
        let transferred = coin(TRANSFER, VOUCHER);

        let action = decide(&input(&params, &transferred, Some(&pool), 0));
        assert_eq!(action.swap(), None);
    }
}
