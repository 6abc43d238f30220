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
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, WITHDRAW_ALL },
    error::{ ErrorCode, RivuletResult },
    interfaces::{ DispatchInterface, HandlerClient, RoutingClient },
    math::safe_math::SafeMath,
    types::{ HandlerAllocation, Payout },
    unwrap_contract,
    validate,
};

use crate::{
    events::DispatcherEvents,
    routing::{ plan_withdrawals, split_deposit, validate_table },
    storage::{
        get_allocations,
        get_config,
        is_initialized,
        save_allocations,
        save_config,
        set_initialized,
        Config,
    },
};

contractmeta!(key = "Description", val = "Routes pooled capital across yield handlers");

#[contract]
pub struct Dispatcher;

#[contractimpl]
impl Dispatcher {
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        handlers: Vec<Address>,
        proportions: Vec<u32>
    ) {
        if is_initialized(&env) {
            log!(&env, "Dispatcher: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);

        let allocations = unwrap_contract!(&env, validate_table(&env, &handlers, &proportions));
        save_allocations(&env, &allocations);
        save_config(&env, &(Config { admin: admin.clone(), registry: registry.clone() }));

        DispatcherEvents::initialization(&env, admin, registry, handlers.len());
    }

    /// Atomic replacement of the allocation table. Deployed funds stay where
    /// they are until an explicit rebalance relocates them.
    pub fn reset_handlers(env: Env, handlers: Vec<Address>, proportions: Vec<u32>) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let allocations = unwrap_contract!(&env, validate_table(&env, &handlers, &proportions));
        save_allocations(&env, &allocations);

        DispatcherEvents::handlers_reset(&env, handlers.len());
    }

    /// Re-weight the current handler set. The given handlers must be exactly
    /// the ones already in the table.
    pub fn update_proportions(env: Env, handlers: Vec<Address>, proportions: Vec<u32>) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let allocations = unwrap_contract!(&env, validate_table(&env, &handlers, &proportions));

        let current = get_allocations(&env);
        if allocations.len() != current.len() {
            log!(&env, "Dispatcher: Update proportions: handler set size changed");
            panic_with_error!(&env, ErrorCode::LengthMismatch);
        }
        for allocation in allocations.iter() {
            if !current.iter().any(|existing| existing.handler == allocation.handler) {
                log!(&env, "Dispatcher: Update proportions: handler not in the current table");
                panic_with_error!(&env, ErrorCode::UnknownHandler);
            }
        }

        save_allocations(&env, &allocations);

        DispatcherEvents::proportions_updated(&env, handlers.len());
    }

    pub fn get_allocations(env: Env) -> Vec<HandlerAllocation> {
        get_allocations(&env)
    }

    pub fn get_proportions(env: Env) -> Vec<u32> {
        let mut proportions = Vec::new(&env);
        for allocation in get_allocations(&env).iter() {
            proportions.push_back(allocation.proportion);
        }
        proportions
    }

    /// Funds sitting on the dispatcher itself, waiting for redeployment.
    pub fn get_idle_balance(env: Env, asset: Address) -> i128 {
        token::Client::new(&env, &asset).balance(&env.current_contract_address())
    }

    pub fn query_admin(env: Env) -> Address {
        get_config(&env).admin
    }

    pub fn query_registry(env: Env) -> Address {
        get_config(&env).registry
    }
}

#[contractimpl]
impl DispatchInterface for Dispatcher {
    /// Fan a deposit out across the table. The underlying must already sit
    /// on the dispatcher; only the vault routed to `asset` may call this.
    fn deposit(env: Env, asset: Address, amount: i128) {
        authorize_vault(&env, &asset);

        if amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let allocations = get_allocations(&env);
        let shares = unwrap_contract!(&env, split_deposit(&env, &allocations, amount));

        let token_client = token::Client::new(&env, &asset);
        let own = env.current_contract_address();
        for (i, allocation) in allocations.iter().enumerate() {
            let share = shares.get_unchecked(i as u32);
            if share == 0 {
                continue;
            }
            token_client.transfer(&own, &allocation.handler, &share);
            HandlerClient::new(&env, &allocation.handler).deposit(&asset, &share);
        }

        DispatcherEvents::deposit_routed(&env, asset, amount);
    }

    /// Gather `amount` and pay it out. The idle buffer is drained first,
    /// then handlers per the allocation table, falling back to spare
    /// liquidity wherever a handler runs short.
    fn withdraw(env: Env, asset: Address, amount: i128, payouts: Vec<Payout>) {
        authorize_vault(&env, &asset);

        if amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }
        unwrap_contract!(&env, check_payouts(&env, &payouts, amount));

        let token_client = token::Client::new(&env, &asset);
        let own = env.current_contract_address();

        let idle = token_client.balance(&own);
        let from_idle = idle.min(amount);
        let remaining = amount - from_idle;

        if remaining > 0 {
            let allocations = get_allocations(&env);
            let mut liquidity = Vec::new(&env);
            for allocation in allocations.iter() {
                liquidity.push_back(HandlerClient::new(&env, &allocation.handler).get_liquidity(&asset));
            }

            let takes = unwrap_contract!(
                &env,
                plan_withdrawals(&env, &allocations, &liquidity, remaining)
            );
            for (i, allocation) in allocations.iter().enumerate() {
                let take = takes.get_unchecked(i as u32);
                if take == 0 {
                    continue;
                }
                HandlerClient::new(&env, &allocation.handler).withdraw(&asset, &own, &take);
            }
        }

        for payout in payouts.iter() {
            if payout.amount == 0 {
                continue;
            }
            token_client.transfer(&own, &payout.to, &payout.amount);
        }

        DispatcherEvents::withdrawal_routed(&env, asset, amount, from_idle);
    }

    /// Relocate deployed capital between handlers. Withdrawals land in the
    /// idle buffer and deposits are paid from it, so a lopsided rebalance
    /// parks funds idle (or redeploys a previously parked buffer) without
    /// touching the pool's total balance.
    fn rebalance(
        env: Env,
        asset: Address,
        withdraw_handlers: Vec<Address>,
        withdraw_amounts: Vec<i128>,
        deposit_handlers: Vec<Address>,
        deposit_amounts: Vec<i128>
    ) {
        authorize_vault(&env, &asset);

        unwrap_contract!(
            &env,
            validate!(
                &env,
                withdraw_handlers.len() == withdraw_amounts.len() &&
                    deposit_handlers.len() == deposit_amounts.len(),
                ErrorCode::LengthMismatch,
                "rebalance arrays are ragged"
            )
        );

        let allocations = get_allocations(&env);
        let own = env.current_contract_address();
        let token_client = token::Client::new(&env, &asset);

        let mut withdrawn: i128 = 0;
        for (i, handler) in withdraw_handlers.iter().enumerate() {
            require_in_table(&env, &allocations, &handler);

            let requested = withdraw_amounts.get_unchecked(i as u32);
            if requested < 0 {
                panic_with_error!(&env, ErrorCode::InvalidAmount);
            }

            let client = HandlerClient::new(&env, &handler);
            let amount = if requested == WITHDRAW_ALL {
                client.get_balance(&asset)
            } else {
                requested
            };
            if amount == 0 {
                continue;
            }

            client.withdraw(&asset, &own, &amount);
            withdrawn = unwrap_contract!(&env, withdrawn.safe_add(amount, &env));
        }

        let mut deposited: i128 = 0;
        for (i, handler) in deposit_handlers.iter().enumerate() {
            require_in_table(&env, &allocations, &handler);

            let amount = deposit_amounts.get_unchecked(i as u32);
            if amount < 0 {
                panic_with_error!(&env, ErrorCode::InvalidAmount);
            }
            if amount == 0 {
                continue;
            }

            let idle = token_client.balance(&own);
            if amount > idle {
                log!(&env, "Dispatcher: Rebalance: deposit {} exceeds idle buffer {}", amount, idle);
                panic_with_error!(&env, ErrorCode::InsufficientLiquidity);
            }

            token_client.transfer(&own, &handler, &amount);
            HandlerClient::new(&env, &handler).deposit(&asset, &amount);
            deposited = unwrap_contract!(&env, deposited.safe_add(amount, &env));
        }

        DispatcherEvents::rebalance(&env, asset, withdrawn, deposited);
    }

    fn get_handlers(env: Env) -> Vec<Address> {
        let mut handlers = Vec::new(&env);
        for allocation in get_allocations(&env).iter() {
            handlers.push_back(allocation.handler);
        }
        handlers
    }

    /// Pooled total for `asset`: the idle buffer plus every handler's
    /// reported balance.
    fn get_balance(env: Env, asset: Address) -> i128 {
        let own = env.current_contract_address();
        let mut total = token::Client::new(&env, &asset).balance(&own);
        for allocation in get_allocations(&env).iter() {
            let balance = HandlerClient::new(&env, &allocation.handler).get_balance(&asset);
            total = unwrap_contract!(&env, total.safe_add(balance, &env));
        }
        total
    }

    /// Immediately withdrawable total for `asset`.
    fn get_liquidity(env: Env, asset: Address) -> i128 {
        let own = env.current_contract_address();
        let mut total = token::Client::new(&env, &asset).balance(&own);
        for allocation in get_allocations(&env).iter() {
            let liquidity = HandlerClient::new(&env, &allocation.handler).get_liquidity(&asset);
            total = unwrap_contract!(&env, total.safe_add(liquidity, &env));
        }
        total
    }
}

/// Look the asset's vault up in the registry and require its authorization.
/// The vault is the only caller allowed to move pooled funds.
fn authorize_vault(env: &Env, asset: &Address) -> Address {
    let config = get_config(env);
    let vault = match RoutingClient::new(env, &config.registry).vault_of(asset) {
        Some(vault) => vault,
        None => {
            log!(env, "Dispatcher: no vault routed for asset");
            panic_with_error!(env, ErrorCode::UnknownAsset);
        }
    };
    vault.require_auth();
    vault
}

fn require_in_table(env: &Env, allocations: &Vec<HandlerAllocation>, handler: &Address) {
    if !allocations.iter().any(|allocation| allocation.handler == *handler) {
        log!(env, "Dispatcher: handler is not part of the allocation table");
        panic_with_error!(env, ErrorCode::UnknownHandler);
    }
}

fn check_payouts(env: &Env, payouts: &Vec<Payout>, amount: i128) -> RivuletResult {
    let mut sum: i128 = 0;
    for payout in payouts.iter() {
        validate!(env, payout.amount >= 0, ErrorCode::InvalidAmount)?;
        sum = sum.safe_add(payout.amount, env)?;
    }
    validate!(
        env,
        sum == amount,
        ErrorCode::InvalidAmount,
        "payouts sum to {} instead of {}",
        sum,
        amount
    )?;
    Ok(())
}
