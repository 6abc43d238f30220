use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

use crate::constants::{ BASE, FEE_MAX, TOTAL_PROPORTION };
use crate::error::{ ErrorCode, RivuletResult };
use crate::validate;

/// Exchange rate of a pool, scaled by [`BASE`]: underlying units per receipt
/// unit. Zero supply has no rate; callers decide whether to bootstrap 1:1.
pub fn exchange_rate(env: &Env, pooled: i128, supply: i128) -> RivuletResult<i128> {
    validate!(
        env,
        pooled >= 0 && supply > 0,
        ErrorCode::InvalidAmount,
        "rate undefined for pooled {} supply {}",
        pooled,
        supply
    )?;

    pooled.fixed_div_floor(supply, BASE).ok_or(ErrorCode::MathError)
}

/// Receipts issued for `amount` underlying, rounded down so the issued
/// claim never exceeds the value paid in.
pub fn underlying_to_receipt_floor(env: &Env, amount: i128, rate: i128) -> RivuletResult<i128> {
    validate!(env, rate > 0, ErrorCode::RateUnavailable)?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    amount.fixed_div_floor(rate, BASE).ok_or(ErrorCode::MathError)
}

/// Receipts required to cover `amount` underlying, rounded up so the burn
/// always covers the payout.
pub fn underlying_to_receipt_ceil(env: &Env, amount: i128, rate: i128) -> RivuletResult<i128> {
    validate!(env, rate > 0, ErrorCode::RateUnavailable)?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    amount.fixed_div_ceil(rate, BASE).ok_or(ErrorCode::MathError)
}

/// Underlying owed for `amount` receipts, rounded down.
pub fn receipt_to_underlying_floor(env: &Env, amount: i128, rate: i128) -> RivuletResult<i128> {
    validate!(env, rate > 0, ErrorCode::RateUnavailable)?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    amount.fixed_mul_floor(rate, BASE).ok_or(ErrorCode::MathError)
}

/// Fee charged on a gross amount, rounded down.
pub fn fee_on(env: &Env, gross: i128, fee_rate: i128) -> RivuletResult<i128> {
    validate!(
        env,
        (0..FEE_MAX).contains(&fee_rate),
        ErrorCode::InvalidFee,
        "fee rate {} outside [0, {})",
        fee_rate,
        FEE_MAX
    )?;
    validate!(env, gross >= 0, ErrorCode::InvalidAmount)?;

    gross.fixed_mul_floor(fee_rate, BASE).ok_or(ErrorCode::MathError)
}

/// Smallest gross amount whose net after `fee_rate` is at least `net`:
/// `ceil(net * BASE / (BASE - fee_rate))`. The protocol collects the
/// difference, so it never under-collects relative to what it pays out.
pub fn gross_up(env: &Env, net: i128, fee_rate: i128) -> RivuletResult<i128> {
    validate!(
        env,
        (0..FEE_MAX).contains(&fee_rate),
        ErrorCode::InvalidFee,
        "fee rate {} outside [0, {})",
        fee_rate,
        FEE_MAX
    )?;
    validate!(env, net >= 0, ErrorCode::InvalidAmount)?;

    net.fixed_div_ceil(BASE - fee_rate, BASE).ok_or(ErrorCode::MathError)
}

/// Share of `amount` owned by `proportion` out of [`TOTAL_PROPORTION`],
/// rounded down. Truncation remainders are the caller's to assign.
pub fn proportional_share(env: &Env, amount: i128, proportion: u32) -> RivuletResult<i128> {
    validate!(
        env,
        proportion <= TOTAL_PROPORTION,
        ErrorCode::ProportionSumInvalid,
        "proportion {} exceeds {}",
        proportion,
        TOTAL_PROPORTION
    )?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    amount
        .fixed_mul_floor(proportion as i128, TOTAL_PROPORTION as i128)
        .ok_or(ErrorCode::MathError)
}
