use soroban_sdk::{ contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env };

use rivulet::{
    constants::BASE,
    error::ErrorCode,
    interfaces::VenueInterface,
    math::rate::{ receipt_to_underlying_floor, underlying_to_receipt_ceil, underlying_to_receipt_floor },
    unwrap_contract,
};

use crate::storage::{
    get_config,
    get_rate,
    get_shares,
    get_total_shares,
    is_initialized,
    save_config,
    save_rate,
    save_shares,
    save_total_shares,
    set_initialized,
    Config,
};

contractmeta!(key = "Description", val = "Share-accounted lending venue with an accruable rate");

#[contract]
pub struct VenueMock;

#[contractimpl]
impl VenueMock {
    pub fn initialize(env: Env, admin: Address, asset: Address) {
        if is_initialized(&env) {
            log!(&env, "Venue Mock: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);
        save_config(&env, &(Config { admin, asset }));
        save_rate(&env, BASE);
    }

    /// Raise the venue's share price to simulate accrued interest. The extra
    /// underlying backing the higher rate has to be funded into the venue
    /// separately, which is also how the venue ends up less liquid than its
    /// reported balance.
    pub fn accrue(env: Env, new_rate: i128) {
        let config = get_config(&env);
        config.admin.require_auth();

        let rate = get_rate(&env);
        if new_rate < rate {
            log!(&env, "Venue Mock: Accrue: rate {} may not fall below {}", new_rate, rate);
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        save_rate(&env, new_rate);
    }
}

#[contractimpl]
impl VenueInterface for VenueMock {
    fn asset(env: Env) -> Address {
        get_config(&env).asset
    }

    fn deposit(env: Env, from: Address, amount: i128) {
        from.require_auth();

        if amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        let rate = get_rate(&env);
        let shares = unwrap_contract!(&env, underlying_to_receipt_floor(&env, amount, rate));
        if shares == 0 {
            panic_with_error!(&env, ErrorCode::DustAmount);
        }

        save_shares(&env, &from, get_shares(&env, &from) + shares);
        save_total_shares(&env, get_total_shares(&env) + shares);

        token::Client::new(&env, &config.asset).transfer(
            &from,
            &env.current_contract_address(),
            &amount
        );
    }

    fn withdraw(env: Env, holder: Address, to: Address, amount: i128) {
        holder.require_auth();

        if amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        let rate = get_rate(&env);
        let token_client = token::Client::new(&env, &config.asset);

        let cash = token_client.balance(&env.current_contract_address());
        if amount > cash {
            log!(&env, "Venue Mock: Withdraw: requested {} exceeds venue cash {}", amount, cash);
            panic_with_error!(&env, ErrorCode::InsufficientLiquidity);
        }

        let shares = unwrap_contract!(&env, underlying_to_receipt_ceil(&env, amount, rate));
        let held = get_shares(&env, &holder);
        if shares > held {
            log!(&env, "Venue Mock: Withdraw: position too small for {}", amount);
            panic_with_error!(&env, ErrorCode::InsufficientLiquidity);
        }

        save_shares(&env, &holder, held - shares);
        save_total_shares(&env, get_total_shares(&env) - shares);

        token_client.transfer(&env.current_contract_address(), &to, &amount);
    }

    fn value_of(env: Env, holder: Address) -> i128 {
        let shares = get_shares(&env, &holder);
        let rate = get_rate(&env);
        unwrap_contract!(&env, receipt_to_underlying_floor(&env, shares, rate))
    }

    fn share_balance(env: Env, holder: Address) -> i128 {
        get_shares(&env, &holder)
    }

    fn exchange_rate(env: Env) -> i128 {
        get_rate(&env)
    }

    fn cash(env: Env) -> i128 {
        let config = get_config(&env);
        token::Client::new(&env, &config.asset).balance(&env.current_contract_address())
    }
}
