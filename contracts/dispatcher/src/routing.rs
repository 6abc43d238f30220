use rivulet::{
    constants::TOTAL_PROPORTION,
    error::{ ErrorCode, RivuletResult },
    math::{ rate::proportional_share, safe_math::SafeMath },
    types::HandlerAllocation,
    validate,
};
use soroban_sdk::{ Address, Env, Vec };

/// Check a proposed allocation table and turn it into storage form.
/// Handlers and proportions are parallel arrays; the table must be
/// non-empty, duplicate-free and sum to [`TOTAL_PROPORTION`].
pub fn validate_table(
    env: &Env,
    handlers: &Vec<Address>,
    proportions: &Vec<u32>
) -> RivuletResult<Vec<HandlerAllocation>> {
    validate!(
        env,
        handlers.len() == proportions.len(),
        ErrorCode::LengthMismatch,
        "handlers length {} does not match proportions length {}",
        handlers.len(),
        proportions.len()
    )?;
    validate!(env, !handlers.is_empty(), ErrorCode::EmptyHandlerTable)?;

    let mut sum: u64 = 0;
    let mut allocations = Vec::new(env);
    for (i, handler) in handlers.iter().enumerate() {
        let proportion = proportions.get_unchecked(i as u32);
        sum = sum.safe_add(proportion as u64, env)?;

        for j in 0..i {
            validate!(
                env,
                handlers.get_unchecked(j as u32) != handler,
                ErrorCode::DuplicateHandler,
                "handler appears twice in the table"
            )?;
        }

        allocations.push_back(HandlerAllocation { handler, proportion });
    }

    validate!(
        env,
        sum == TOTAL_PROPORTION as u64,
        ErrorCode::ProportionSumInvalid,
        "proportions sum to {} instead of {}",
        sum,
        TOTAL_PROPORTION
    )?;

    Ok(allocations)
}

/// Split `amount` across the table by proportion. Integer truncation
/// remainders accumulate on the last handler so the parts always sum to
/// `amount` exactly.
pub fn split_deposit(
    env: &Env,
    allocations: &Vec<HandlerAllocation>,
    amount: i128
) -> RivuletResult<Vec<i128>> {
    validate!(env, !allocations.is_empty(), ErrorCode::EmptyHandlerTable)?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    let last = allocations.len() - 1;
    let mut shares = Vec::new(env);
    let mut distributed: i128 = 0;

    for (i, allocation) in allocations.iter().enumerate() {
        let share = if (i as u32) == last {
            amount.safe_sub(distributed, env)?
        } else {
            proportional_share(env, amount, allocation.proportion)?
        };

        distributed = distributed.safe_add(share, env)?;
        shares.push_back(share);
    }

    Ok(shares)
}

/// Decide how much to pull from each handler to gather `amount`. The first
/// pass follows the table proportions clamped to each handler's reported
/// liquidity; whatever is still missing is then drawn from spare liquidity
/// in table order. Fails only when the table as a whole cannot cover
/// `amount`.
pub fn plan_withdrawals(
    env: &Env,
    allocations: &Vec<HandlerAllocation>,
    liquidity: &Vec<i128>,
    amount: i128
) -> RivuletResult<Vec<i128>> {
    validate!(
        env,
        allocations.len() == liquidity.len(),
        ErrorCode::LengthMismatch,
        "allocations length {} does not match liquidity length {}",
        allocations.len(),
        liquidity.len()
    )?;
    validate!(env, !allocations.is_empty(), ErrorCode::EmptyHandlerTable)?;
    validate!(env, amount >= 0, ErrorCode::InvalidAmount)?;

    let mut total_liquidity: i128 = 0;
    for available in liquidity.iter() {
        validate!(env, available >= 0, ErrorCode::InvalidAmount)?;
        total_liquidity = total_liquidity.safe_add(available, env)?;
    }
    validate!(
        env,
        amount <= total_liquidity,
        ErrorCode::InsufficientLiquidity,
        "requested {} but only {} is withdrawable",
        amount,
        total_liquidity
    )?;

    let last = allocations.len() - 1;
    let mut takes = Vec::new(env);
    let mut gathered: i128 = 0;

    for (i, allocation) in allocations.iter().enumerate() {
        let want = if (i as u32) == last {
            amount.safe_sub(gathered, env)?
        } else {
            proportional_share(env, amount, allocation.proportion)?
        };

        let take = want.min(liquidity.get_unchecked(i as u32));
        gathered = gathered.safe_add(take, env)?;
        takes.push_back(take);
    }

    let mut shortfall = amount.safe_sub(gathered, env)?;
    for i in 0..takes.len() {
        if shortfall == 0 {
            break;
        }
        let spare = liquidity.get_unchecked(i).safe_sub(takes.get_unchecked(i), env)?;
        if spare == 0 {
            continue;
        }
        let extra = spare.min(shortfall);
        takes.set(i, takes.get_unchecked(i).safe_add(extra, env)?);
        shortfall = shortfall.safe_sub(extra, env)?;
    }

    Ok(takes)
}
