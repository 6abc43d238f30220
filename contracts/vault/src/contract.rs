use soroban_sdk::{
    contract,
    contractimpl,
    contractmeta,
    log,
    panic_with_error,
    token,
    token::TokenInterface,
    Address,
    Env,
    String,
    Vec,
};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

use rivulet::{
    constants::{ BASE, FEE_MAX, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::ErrorCode,
    interfaces::DispatchClient,
    math::rate::{
        exchange_rate,
        fee_on,
        gross_up,
        receipt_to_underlying_floor,
        underlying_to_receipt_ceil,
        underlying_to_receipt_floor,
    },
    math::safe_math::SafeMath,
    types::{ Payout, VaultOperation },
    unwrap_contract,
};

use crate::{
    allowance::{ read_allowance, spend_allowance, write_allowance },
    balance::{ read_balance, receive_balance, spend_balance },
    events::VaultEvents,
    metadata::{ read_decimal, read_name, read_symbol, write_metadata },
    storage::{
        get_config,
        is_initialized,
        read_fee,
        read_stored_rate,
        read_total_supply,
        save_config,
        set_initialized,
        write_fee,
        write_stored_rate,
        write_total_supply,
        Config,
    },
    vault_token::VaultTokenTrait,
};

contractmeta!(key = "Description", val = "Receipt token backed by yield-routed underlying");

#[contract]
pub struct VaultToken;

#[contractimpl]
impl VaultTokenTrait for VaultToken {
    fn initialize(
        env: Env,
        admin: Address,
        asset: Address,
        dispatcher: Address,
        fee_recipient: Address,
        decimal: u32,
        name: String,
        symbol: String
    ) {
        if is_initialized(&env) {
            log!(&env, "Vault Token: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }
        if decimal > 18 {
            panic!("Decimal must not be greater than 18");
        }

        set_initialized(&env);
        save_config(&env, &(Config {
            admin: admin.clone(),
            asset: asset.clone(),
            dispatcher: dispatcher.clone(),
            fee_recipient,
        }));
        write_metadata(&env, TokenMetadata {
            decimal,
            name,
            symbol,
        });

        VaultEvents::initialization(&env, admin, asset, dispatcher);
    }

    fn mint(env: Env, sender: Address, recipient: Address, gross_amount: i128) {
        sender.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if gross_amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        let supply = read_total_supply(&env);
        let dispatch = DispatchClient::new(&env, &config.dispatcher);
        let pooled = dispatch.get_balance(&config.asset);

        // An empty ledger bootstraps 1:1; once receipts exist the pool has
        // to be worth something for new deposits to be priced.
        let rate = if supply == 0 {
            BASE
        } else {
            unwrap_contract!(&env, exchange_rate(&env, pooled, supply))
        };
        if rate == 0 {
            log!(&env, "Vault Token: Mint: exchange rate should not be 0");
            panic_with_error!(&env, ErrorCode::RateUnavailable);
        }

        let fee = unwrap_contract!(
            &env,
            fee_on(&env, gross_amount, read_fee(&env, VaultOperation::Mint))
        );
        let net = gross_amount - fee;
        let minted = unwrap_contract!(&env, underlying_to_receipt_floor(&env, net, rate));
        if minted == 0 {
            log!(&env, "Vault Token: Mint: can not mint the smallest unit with the given amount");
            panic_with_error!(&env, ErrorCode::DustAmount);
        }

        receive_balance(&env, recipient.clone(), minted);
        write_total_supply(&env, unwrap_contract!(&env, supply.safe_add(minted, &env)));

        let token_client = token::Client::new(&env, &config.asset);
        token_client.transfer(&sender, &config.dispatcher, &net);
        if fee > 0 {
            token_client.transfer(&sender, &config.fee_recipient, &fee);
        }
        dispatch.deposit(&config.asset, &net);

        snapshot_rate(&env, &config);

        TokenUtils::new(&env).events().mint(config.admin, recipient.clone(), minted);
        VaultEvents::deposit(&env, sender, recipient, gross_amount, minted, fee);
    }

    fn redeem(env: Env, sender: Address, recipient: Address, receipt_amount: i128) {
        sender.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if receipt_amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        let dispatch = DispatchClient::new(&env, &config.dispatcher);
        let rate = require_rate(&env, &config, &dispatch);

        let gross = unwrap_contract!(&env, receipt_to_underlying_floor(&env, receipt_amount, rate));
        if gross == 0 {
            log!(&env, "Vault Token: Redeem: receipt amount converts to no underlying");
            panic_with_error!(&env, ErrorCode::DustAmount);
        }
        let fee = unwrap_contract!(&env, fee_on(&env, gross, read_fee(&env, VaultOperation::Redeem)));
        let net = gross - fee;

        let supply = read_total_supply(&env);
        spend_balance(&env, sender.clone(), receipt_amount);
        write_total_supply(&env, unwrap_contract!(&env, supply.safe_sub(receipt_amount, &env)));

        dispatch.withdraw(&config.asset, &gross, &payouts(&env, &config, &recipient, net, fee));

        snapshot_rate(&env, &config);

        TokenUtils::new(&env).events().burn(sender.clone(), receipt_amount);
        VaultEvents::redemption(&env, sender, recipient, receipt_amount, net, fee);
    }

    fn redeem_underlying(env: Env, sender: Address, recipient: Address, net_amount: i128) {
        sender.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if net_amount <= 0 {
            panic_with_error!(&env, ErrorCode::InvalidAmount);
        }

        let config = get_config(&env);
        let dispatch = DispatchClient::new(&env, &config.dispatcher);
        let rate = require_rate(&env, &config, &dispatch);

        // Gross is rounded up so the fee never eats into the requested net,
        // and the burn is rounded up so the pool never pays out more value
        // than it retires.
        let gross = unwrap_contract!(
            &env,
            gross_up(&env, net_amount, read_fee(&env, VaultOperation::Redeem))
        );
        let fee = gross - net_amount;
        let burned = unwrap_contract!(&env, underlying_to_receipt_ceil(&env, gross, rate));
        if burned == 0 {
            log!(&env, "Vault Token: Redeem underlying: amount converts to no receipts");
            panic_with_error!(&env, ErrorCode::DustAmount);
        }

        let supply = read_total_supply(&env);
        spend_balance(&env, sender.clone(), burned);
        write_total_supply(&env, unwrap_contract!(&env, supply.safe_sub(burned, &env)));

        dispatch.withdraw(&config.asset, &gross, &payouts(&env, &config, &recipient, net_amount, fee));

        snapshot_rate(&env, &config);

        TokenUtils::new(&env).events().burn(sender.clone(), burned);
        VaultEvents::redemption(&env, sender, recipient, burned, net_amount, fee);
    }

    fn rebalance(
        env: Env,
        withdraw_handlers: Vec<Address>,
        withdraw_amounts: Vec<i128>,
        deposit_handlers: Vec<Address>,
        deposit_amounts: Vec<i128>
    ) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let withdraw_count = withdraw_handlers.len();
        let deposit_count = deposit_handlers.len();

        DispatchClient::new(&env, &config.dispatcher).rebalance(
            &config.asset,
            &withdraw_handlers,
            &withdraw_amounts,
            &deposit_handlers,
            &deposit_amounts
        );

        snapshot_rate(&env, &config);

        VaultEvents::rebalance(&env, config.admin, withdraw_count, deposit_count);
    }

    fn update_origination_fee(env: Env, operation: VaultOperation, rate: i128) {
        let config = get_config(&env);
        config.admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if !(0..FEE_MAX).contains(&rate) {
            log!(&env, "Vault Token: Update origination fee: rate {} breaches the ceiling", rate);
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        let old_rate = read_fee(&env, operation);
        write_fee(&env, operation, rate);

        VaultEvents::fee_update(&env, operation, old_rate, rate);
    }

    fn get_exchange_rate(env: Env) -> i128 {
        let config = get_config(&env);
        let dispatch = DispatchClient::new(&env, &config.dispatcher);
        live_rate(&env, &config, &dispatch)
    }

    fn get_exchange_rate_stored(env: Env) -> i128 {
        read_stored_rate(&env)
    }

    fn get_total_balance(env: Env) -> i128 {
        let config = get_config(&env);
        DispatchClient::new(&env, &config.dispatcher).get_balance(&config.asset)
    }

    fn get_handlers(env: Env) -> Vec<Address> {
        let config = get_config(&env);
        DispatchClient::new(&env, &config.dispatcher).get_handlers()
    }

    fn origination_fee(env: Env, operation: VaultOperation) -> i128 {
        read_fee(&env, operation)
    }

    fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    fn get_underlying_balance(env: Env, account: Address) -> i128 {
        let config = get_config(&env);
        let dispatch = DispatchClient::new(&env, &config.dispatcher);
        let rate = live_rate(&env, &config, &dispatch);
        if rate == 0 {
            return 0;
        }
        let held = read_balance(&env, account);
        unwrap_contract!(&env, receipt_to_underlying_floor(&env, held, rate))
    }

    fn query_admin(env: Env) -> Address {
        get_config(&env).admin
    }

    fn query_asset(env: Env) -> Address {
        get_config(&env).asset
    }

    fn query_dispatcher(env: Env) -> Address {
        get_config(&env).dispatcher
    }

    fn query_fee_recipient(env: Env) -> Address {
        get_config(&env).fee_recipient
    }
}

#[contractimpl]
impl token::Interface for VaultToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        read_allowance(&env, from, spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        check_nonnegative_amount(amount);
        from.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        write_allowance(&env, from.clone(), spender.clone(), amount, expiration_ledger);
        TokenUtils::new(&env).events().approve(from, spender, amount, expiration_ledger);
    }

    fn balance(env: Env, id: Address) -> i128 {
        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        read_balance(&env, id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        check_nonnegative_amount(amount);
        from.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        spend_balance(&env, from.clone(), amount);
        receive_balance(&env, to.clone(), amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        check_nonnegative_amount(amount);
        spender.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        spend_allowance(&env, from.clone(), spender, amount);
        spend_balance(&env, from.clone(), amount);
        receive_balance(&env, to.clone(), amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    // Supply only ever changes through mint and the redeem paths; a free
    // burn would inflate the exchange rate for everyone else.
    fn burn(env: Env, _from: Address, _amount: i128) {
        panic_with_error!(&env, ErrorCode::NotAuthorized);
    }

    fn burn_from(env: Env, _spender: Address, _from: Address, _amount: i128) {
        panic_with_error!(&env, ErrorCode::NotAuthorized);
    }

    fn decimals(env: Env) -> u32 {
        read_decimal(&env)
    }

    fn name(env: Env) -> String {
        read_name(&env)
    }

    fn symbol(env: Env) -> String {
        read_symbol(&env)
    }
}

fn check_nonnegative_amount(amount: i128) {
    if amount < 0 {
        panic!("negative amount is not allowed: {}", amount)
    }
}

/// Live rate from fresh handler balances; zero while no receipts exist.
fn live_rate(env: &Env, config: &Config, dispatch: &DispatchClient) -> i128 {
    let supply = read_total_supply(env);
    if supply == 0 {
        return 0;
    }
    let pooled = dispatch.get_balance(&config.asset);
    unwrap_contract!(env, exchange_rate(env, pooled, supply))
}

/// Redemption paths need an established, non-zero rate.
fn require_rate(env: &Env, config: &Config, dispatch: &DispatchClient) -> i128 {
    let rate = live_rate(env, config, dispatch);
    if rate == 0 {
        log!(env, "Vault Token: exchange rate should not be 0");
        panic_with_error!(env, ErrorCode::RateUnavailable);
    }
    rate
}

/// Persist the post-operation rate so the stored value always matches a
/// fresh recomputation.
fn snapshot_rate(env: &Env, config: &Config) {
    let dispatch = DispatchClient::new(env, &config.dispatcher);
    write_stored_rate(env, live_rate(env, config, &dispatch));
}

fn payouts(env: &Env, config: &Config, recipient: &Address, net: i128, fee: i128) -> Vec<Payout> {
    let mut payouts = Vec::new(env);
    payouts.push_back(Payout { to: recipient.clone(), amount: net });
    if fee > 0 {
        payouts.push_back(Payout { to: config.fee_recipient.clone(), amount: fee });
    }
    payouts
}
