use soroban_sdk::auth::{ ContractContext, InvokerContractAuthEntry, SubContractInvocation };
use soroban_sdk::{
    contract,
    contractimpl,
    contractmeta,
    log,
    panic_with_error,
    vec,
    Address,
    Env,
    IntoVal,
    Symbol,
    Vec,
};

use rivulet::{
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::ErrorCode,
    interfaces::{ HandlerInterface, VenueClient },
};

use crate::{
    events::HandlerEvents,
    storage::{ get_config, is_enabled, is_initialized, save_config, set_enabled, set_initialized, Config },
};

contractmeta!(key = "Description", val = "Handler deploying underlying into a share-accounted venue");

#[contract]
pub struct VenueHandler;

#[contractimpl]
impl VenueHandler {
    pub fn initialize(env: Env, admin: Address, dispatcher: Address, venue: Address) {
        if is_initialized(&env) {
            log!(&env, "Venue Handler: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);
        save_config(&env, &(Config { admin, dispatcher, venue }));
    }

    pub fn query_admin(env: Env) -> Address {
        get_config(&env).admin
    }

    pub fn query_dispatcher(env: Env) -> Address {
        get_config(&env).dispatcher
    }

    pub fn query_venue(env: Env) -> Address {
        get_config(&env).venue
    }
}

#[contractimpl]
impl HandlerInterface for VenueHandler {
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

    /// Pushes underlying that arrived by direct transfer into the venue,
    /// converting it into venue shares at the venue's current rate.
    fn deposit(env: Env, asset: Address, amount: i128) {
        let config = get_config(&env);
        config.dispatcher.require_auth();

        if !is_enabled(&env, &asset) {
            log!(&env, "Venue Handler: Deposit: token is not enabled");
            panic_with_error!(&env, ErrorCode::HandlerNotEnabled);
        }
        if amount < 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }
        if amount == 0 {
            return;
        }

        // the venue pulls the underlying out of this handler, so the
        // transfer it performs has to be pre-authorized here
        env.authorize_as_current_contract(
            vec![
                &env,
                InvokerContractAuthEntry::Contract(SubContractInvocation {
                    context: ContractContext {
                        contract: asset.clone(),
                        fn_name: Symbol::new(&env, "transfer"),
                        args: (
                            env.current_contract_address(),
                            config.venue.clone(),
                            amount,
                        ).into_val(&env),
                    },
                    sub_invocations: vec![&env],
                })
            ]
        );
        VenueClient::new(&env, &config.venue).deposit(&env.current_contract_address(), &amount);

        HandlerEvents::deposit(&env, asset, amount);
    }

    fn withdraw(env: Env, asset: Address, to: Address, amount: i128) {
        let config = get_config(&env);
        config.dispatcher.require_auth();

        if !is_enabled(&env, &asset) {
            log!(&env, "Venue Handler: Withdraw: token is not enabled");
            panic_with_error!(&env, ErrorCode::HandlerNotEnabled);
        }
        if amount < 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }
        if amount == 0 {
            return;
        }

        // The venue rejects withdrawals its cash cannot cover, even when the
        // share position is worth more.
        VenueClient::new(&env, &config.venue).withdraw(
            &env.current_contract_address(),
            &to,
            &amount
        );

        HandlerEvents::withdraw(&env, asset, to, amount);
    }

    /// Underlying value of the handler's share position at the venue's
    /// current rate.
    fn get_balance(env: Env, asset: Address) -> i128 {
        let config = get_config(&env);
        let venue = VenueClient::new(&env, &config.venue);
        if asset != venue.asset() {
            return 0;
        }
        venue.value_of(&env.current_contract_address())
    }

    /// Withdrawable now: capped by the cash the venue actually holds.
    fn get_liquidity(env: Env, asset: Address) -> i128 {
        let config = get_config(&env);
        let venue = VenueClient::new(&env, &config.venue);
        let balance = Self::get_balance(env, asset);
        balance.min(venue.cash())
    }
}
