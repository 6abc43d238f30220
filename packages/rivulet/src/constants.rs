/// Fixed-point scale shared by exchange rates and fee rates.
pub const BASE: i128 = 1_000_000_000_000_000_000;

/// Fee rates must stay strictly below one tenth of [`BASE`].
pub const FEE_MAX: i128 = BASE / 10;

/// Allocation proportions are integers out of this denominator.
pub const TOTAL_PROPORTION: u32 = 1_000_000;

/// Sentinel amount meaning "withdraw the handler's full balance".
pub const WITHDRAW_ALL: i128 = i128::MAX;

pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;
