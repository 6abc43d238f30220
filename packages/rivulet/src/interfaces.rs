use soroban_sdk::{ contractclient, Address, Env, Vec };

use crate::types::Payout;

/// Uniform surface every capital-deployment handler exposes to the
/// dispatcher. `deposit` expects the underlying to have been transferred to
/// the handler beforehand; `withdraw` pushes funds to `to`.
#[contractclient(name = "HandlerClient")]
pub trait HandlerInterface {
    fn enable_tokens(env: Env, assets: Vec<Address>);
    fn disable_tokens(env: Env, assets: Vec<Address>);
    fn token_is_enabled(env: Env, asset: Address) -> bool;
    fn deposit(env: Env, asset: Address, amount: i128);
    fn withdraw(env: Env, asset: Address, to: Address, amount: i128);
    fn get_balance(env: Env, asset: Address) -> i128;
    fn get_liquidity(env: Env, asset: Address) -> i128;
}

/// The dispatcher surface the vault drives during mint, redeem and
/// rebalance flows.
#[contractclient(name = "DispatchClient")]
pub trait DispatchInterface {
    fn deposit(env: Env, asset: Address, amount: i128);
    fn withdraw(env: Env, asset: Address, amount: i128, payouts: Vec<Payout>);
    fn rebalance(
        env: Env,
        asset: Address,
        withdraw_handlers: Vec<Address>,
        withdraw_amounts: Vec<i128>,
        deposit_handlers: Vec<Address>,
        deposit_amounts: Vec<i128>
    );
    fn get_handlers(env: Env) -> Vec<Address>;
    fn get_balance(env: Env, asset: Address) -> i128;
    fn get_liquidity(env: Env, asset: Address) -> i128;
}

/// Asset-to-vault routing lookups, used to authorize dispatcher calls.
#[contractclient(name = "RoutingClient")]
pub trait RoutingInterface {
    fn vault_of(env: Env, asset: Address) -> Option<Address>;
}

/// Surface of an external lending venue as seen by its handler. Positions
/// are share-denominated; underlying value follows the venue's own
/// exchange rate.
#[contractclient(name = "VenueClient")]
pub trait VenueInterface {
    fn asset(env: Env) -> Address;
    fn deposit(env: Env, from: Address, amount: i128);
    fn withdraw(env: Env, holder: Address, to: Address, amount: i128);
    fn value_of(env: Env, holder: Address) -> i128;
    fn share_balance(env: Env, holder: Address) -> i128;
    fn exchange_rate(env: Env) -> i128;
    fn cash(env: Env) -> i128;
}
