use soroban_sdk::{
    contract,
    contractimpl,
    contractmeta,
    log,
    panic_with_error,
    token,
    Address,
    Env,
    Vec,
};

use rivulet::{
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::ErrorCode,
    interfaces::HandlerInterface,
};

use crate::{
    events::HandlerEvents,
    storage::{ get_config, is_enabled, is_initialized, save_config, set_enabled, set_initialized, Config },
};

contractmeta!(key = "Description", val = "Handler keeping idle underlying directly in custody");

#[contract]
pub struct ReserveHandler;

#[contractimpl]
impl ReserveHandler {
    pub fn initialize(env: Env, admin: Address, dispatcher: Address) {
        if is_initialized(&env) {
            log!(&env, "Reserve Handler: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);
        save_config(&env, &(Config { admin, dispatcher }));
    }

    pub fn query_admin(env: Env) -> Address {
        get_config(&env).admin
    }

    pub fn query_dispatcher(env: Env) -> Address {
        get_config(&env).dispatcher
    }
}

#[contractimpl]
impl HandlerInterface for ReserveHandler {
    fn enable_tokens(env: Env, assets: Vec<Address>) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        for asset in assets.iter() {
            set_enabled(&env, &asset, true);
        }

        HandlerEvents::tokens_enabled(&env, assets.len());
    }

    fn disable_tokens(env: Env, assets: Vec<Address>) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        for asset in assets.iter() {
            set_enabled(&env, &asset, false);
        }

        HandlerEvents::tokens_disabled(&env, assets.len());
    }

    fn token_is_enabled(env: Env, asset: Address) -> bool {
        is_enabled(&env, &asset)
    }

    // Underlying arrives by direct transfer before this is invoked; custody
    // is the handler's own token balance, so there is nothing to push
    // further.
    fn deposit(env: Env, asset: Address, amount: i128) {
        let config = get_config(&env);
        config.dispatcher.require_auth();

        if !is_enabled(&env, &asset) {
            log!(&env, "Reserve Handler: Deposit: token is not enabled");
            panic_with_error!(&env, ErrorCode::HandlerNotEnabled);
        }
        if amount < 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        HandlerEvents::deposit(&env, asset, amount);
    }

    fn withdraw(env: Env, asset: Address, to: Address, amount: i128) {
        let config = get_config(&env);
        config.dispatcher.require_auth();

        if !is_enabled(&env, &asset) {
            log!(&env, "Reserve Handler: Withdraw: token is not enabled");
            panic_with_error!(&env, ErrorCode::HandlerNotEnabled);
        }
        if amount < 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let token_client = token::Client::new(&env, &asset);
        let cash = token_client.balance(&env.current_contract_address());
        if amount > cash {
            log!(&env, "Reserve Handler: Withdraw: requested {} but only {} held", amount, cash);
            panic_with_error!(&env, ErrorCode::InsufficientLiquidity);
        }

        token_client.transfer(&env.current_contract_address(), &to, &amount);

        HandlerEvents::withdraw(&env, asset, to, amount);
    }

    fn get_balance(env: Env, asset: Address) -> i128 {
        token::Client::new(&env, &asset).balance(&env.current_contract_address())
    }

    // Idle custody is withdrawable in full at any time.
    fn get_liquidity(env: Env, asset: Address) -> i128 {
        Self::get_balance(env, asset)
    }
}
