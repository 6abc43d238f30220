use rivulet::types::VaultOperation;
use soroban_sdk::{ Address, Env, String, Vec };

pub trait VaultTokenTrait {
    /// Single-shot setup. Re-initialization fails.
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        env: Env,
        admin: Address,
        asset: Address,
        dispatcher: Address,
        fee_recipient: Address,
        decimal: u32,
        name: String,
        symbol: String
    );

    /// Deposit `gross_amount` underlying and receive receipt tokens at the
    /// current exchange rate, net of the mint fee.
    fn mint(env: Env, sender: Address, recipient: Address, gross_amount: i128);

    /// Burn `receipt_amount` receipt tokens and receive their underlying
    /// value, net of the redeem fee.
    fn redeem(env: Env, sender: Address, recipient: Address, receipt_amount: i128);

    /// Burn exactly enough receipt tokens for `net_amount` underlying to
    /// arrive at `recipient` after the redeem fee.
    fn redeem_underlying(env: Env, sender: Address, recipient: Address, net_amount: i128);

    /// Relocate deployed capital between handlers. Supply and user claims
    /// are untouched.
    fn rebalance(
        env: Env,
        withdraw_handlers: Vec<Address>,
        withdraw_amounts: Vec<i128>,
        deposit_handlers: Vec<Address>,
        deposit_amounts: Vec<i128>
    );

    fn update_origination_fee(env: Env, operation: VaultOperation, rate: i128);

    /// Live exchange rate: pooled underlying per receipt unit, scaled by
    /// `BASE`. Zero while no receipts exist.
    fn get_exchange_rate(env: Env) -> i128;

    /// The rate snapshot persisted by the last state-changing operation.
    fn get_exchange_rate_stored(env: Env) -> i128;

    fn get_total_balance(env: Env) -> i128;

    fn get_handlers(env: Env) -> Vec<Address>;

    fn origination_fee(env: Env, operation: VaultOperation) -> i128;

    fn total_supply(env: Env) -> i128;

    /// Underlying value of `account`'s receipts at the live rate.
    fn get_underlying_balance(env: Env, account: Address) -> i128;

    fn query_admin(env: Env) -> Address;

    fn query_asset(env: Env) -> Address;

    fn query_dispatcher(env: Env) -> Address;

    fn query_fee_recipient(env: Env) -> Address;
}
