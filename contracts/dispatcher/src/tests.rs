extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, token, vec, Address, Env };

use rivulet::constants::{ BASE, TOTAL_PROPORTION, WITHDRAW_ALL };
use rivulet::types::{ HandlerAllocation, Payout };
use rivulet_registry::{ Registry, RegistryClient };
use rivulet_reserve_handler::{ ReserveHandler, ReserveHandlerClient };
use rivulet_venue_handler::{ VenueHandler, VenueHandlerClient };
use rivulet_venue_mock::{ VenueMock, VenueMockClient };

use crate::contract::{ Dispatcher, DispatcherClient };

struct Setup<'a> {
    admin: Address,
    vault: Address,
    token: token::StellarAssetClient<'a>,
    token_client: token::Client<'a>,
    registry: RegistryClient<'a>,
    dispatcher: DispatcherClient<'a>,
    reserve: ReserveHandlerClient<'a>,
    venue: VenueMockClient<'a>,
    venue_handler: VenueHandlerClient<'a>,
}

/// Reserve handler at 70%, venue handler at 30%, one registered vault.
fn deploy_dispatcher(env: &Env) -> Setup<'_> {
    let admin = Address::generate(env);
    let vault = Address::generate(env);

    let token = token::StellarAssetClient::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone()).address()
    );
    let token_client = token::Client::new(env, &token.address);

    let registry = RegistryClient::new(env, &env.register(Registry, ()));
    registry.initialize(&admin);
    registry.set_vaults(&vec![env, token.address.clone()], &vec![env, vault.clone()]);

    let dispatcher = DispatcherClient::new(env, &env.register(Dispatcher, ()));

    let reserve = ReserveHandlerClient::new(env, &env.register(ReserveHandler, ()));
    reserve.initialize(&admin, &dispatcher.address);
    reserve.enable_tokens(&vec![env, token.address.clone()]);

    let venue = VenueMockClient::new(env, &env.register(VenueMock, ()));
    venue.initialize(&admin, &token.address);

    let venue_handler = VenueHandlerClient::new(env, &env.register(VenueHandler, ()));
    venue_handler.initialize(&admin, &dispatcher.address, &venue.address);
    venue_handler.enable_tokens(&vec![env, token.address.clone()]);

    dispatcher.initialize(
        &admin,
        &registry.address,
        &vec![env, reserve.address.clone(), venue_handler.address.clone()],
        &vec![env, 700_000_u32, 300_000]
    );

    Setup {
        admin,
        vault,
        token,
        token_client,
        registry,
        dispatcher,
        reserve,
        venue,
        venue_handler,
    }
}

fn fund_and_deposit(setup: &Setup, amount: i128) {
    setup.token.mint(&setup.dispatcher.address, &amount);
    setup.dispatcher.deposit(&setup.token.address, &amount);
}

#[test]
fn deposit_splits_per_proportions_exactly() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    assert_eq!(setup.reserve.get_balance(&setup.token.address), 700_000);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 300_000);
    assert_eq!(setup.dispatcher.get_idle_balance(&setup.token.address), 0);
    assert_eq!(setup.dispatcher.get_balance(&setup.token.address), 1_000_000);
}

#[test]
fn deposit_assigns_truncation_remainder_to_the_last_handler() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);

    let reserve_b = ReserveHandlerClient::new(&env, &env.register(ReserveHandler, ()));
    reserve_b.initialize(&setup.admin, &setup.dispatcher.address);
    reserve_b.enable_tokens(&vec![&env, setup.token.address.clone()]);

    setup.dispatcher.reset_handlers(
        &vec![
            &env,
            setup.reserve.address.clone(),
            setup.venue_handler.address.clone(),
            reserve_b.address.clone()
        ],
        &vec![&env, 333_333_u32, 333_333, 333_334]
    );

    fund_and_deposit(&setup, 100);

    assert_eq!(setup.reserve.get_balance(&setup.token.address), 33);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 33);
    assert_eq!(reserve_b.get_balance(&setup.token.address), 34);
    assert_eq!(setup.dispatcher.get_balance(&setup.token.address), 100);
}

#[test]
fn withdraw_sources_proportionally() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    let recipient = Address::generate(&env);
    setup.dispatcher.withdraw(
        &setup.token.address,
        &100_000,
        &vec![&env, Payout { to: recipient.clone(), amount: 100_000 }]
    );

    assert_eq!(setup.token_client.balance(&recipient), 100_000);
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 630_000);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 270_000);
}

#[test]
fn withdraw_drains_the_idle_buffer_first() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000);

    // park extra funds idle on the dispatcher
    setup.token.mint(&setup.dispatcher.address, &500);

    let recipient = Address::generate(&env);
    setup.dispatcher.withdraw(
        &setup.token.address,
        &500,
        &vec![&env, Payout { to: recipient.clone(), amount: 500 }]
    );

    assert_eq!(setup.token_client.balance(&recipient), 500);
    assert_eq!(setup.dispatcher.get_idle_balance(&setup.token.address), 0);
    // handlers untouched
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 700);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 300);
}

/// Empties the venue's cash so the venue handler reports zero liquidity
/// while still reporting a balance.
fn drain_venue_cash(env: &Env, setup: &Setup) {
    let whale = Address::generate(env);
    setup.token.mint(&whale, &1_000_000);
    setup.venue.deposit(&whale, &1_000_000);
    setup.venue.accrue(&(2 * BASE));

    let cash = setup.venue.cash();
    setup.venue.withdraw(&whale, &whale, &cash);
}

#[test]
fn shortfall_is_covered_by_handlers_with_spare_liquidity() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    drain_venue_cash(&env, &setup);

    // venue position is worth 600_000 on paper but nothing is withdrawable
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 600_000);
    assert_eq!(setup.venue_handler.get_liquidity(&setup.token.address), 0);

    let recipient = Address::generate(&env);
    setup.dispatcher.withdraw(
        &setup.token.address,
        &700_000,
        &vec![&env, Payout { to: recipient.clone(), amount: 700_000 }]
    );

    // the reserve handler covered the venue's share
    assert_eq!(setup.token_client.balance(&recipient), 700_000);
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn withdraw_beyond_aggregate_liquidity_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    drain_venue_cash(&env, &setup);

    let recipient = Address::generate(&env);
    setup.dispatcher.withdraw(
        &setup.token.address,
        &700_001,
        &vec![&env, Payout { to: recipient, amount: 700_001 }]
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #12)")]
fn payouts_must_sum_to_the_withdrawn_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000);

    setup.dispatcher.withdraw(
        &setup.token.address,
        &500,
        &vec![&env, Payout { to: Address::generate(&env), amount: 499 }]
    );
}

#[test]
fn rebalance_relocates_a_full_handler_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    setup.dispatcher.rebalance(
        &setup.token.address,
        &vec![&env, setup.reserve.address.clone()],
        &vec![&env, WITHDRAW_ALL],
        &vec![&env, setup.venue_handler.address.clone()],
        &vec![&env, 700_000_i128]
    );

    assert_eq!(setup.reserve.get_balance(&setup.token.address), 0);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 1_000_000);
    assert_eq!(setup.dispatcher.get_balance(&setup.token.address), 1_000_000);
}

#[test]
fn lopsided_rebalance_parks_funds_in_the_idle_buffer() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    setup.dispatcher.rebalance(
        &setup.token.address,
        &vec![&env, setup.reserve.address.clone()],
        &vec![&env, 100_000_i128],
        &vec![&env],
        &vec![&env]
    );

    assert_eq!(setup.dispatcher.get_idle_balance(&setup.token.address), 100_000);
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 600_000);
    // parked funds still count toward the pooled total
    assert_eq!(setup.dispatcher.get_balance(&setup.token.address), 1_000_000);

    // and can be redeployed later without a matching withdrawal
    setup.dispatcher.rebalance(
        &setup.token.address,
        &vec![&env],
        &vec![&env],
        &vec![&env, setup.venue_handler.address.clone()],
        &vec![&env, 100_000_i128]
    );

    assert_eq!(setup.dispatcher.get_idle_balance(&setup.token.address), 0);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 400_000);
    assert_eq!(setup.dispatcher.get_balance(&setup.token.address), 1_000_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #15)")]
fn rebalance_rejects_handlers_outside_the_table() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000);

    setup.dispatcher.rebalance(
        &setup.token.address,
        &vec![&env, Address::generate(&env)],
        &vec![&env, 1_i128],
        &vec![&env],
        &vec![&env]
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn rebalance_deposit_cannot_exceed_the_idle_buffer() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000);

    setup.dispatcher.rebalance(
        &setup.token.address,
        &vec![&env, setup.reserve.address.clone()],
        &vec![&env, 100_i128],
        &vec![&env, setup.venue_handler.address.clone()],
        &vec![&env, 101_i128]
    );
}

#[test]
fn reset_handlers_is_idempotent_and_moves_no_funds() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);
    fund_and_deposit(&setup, 1_000_000);

    let handlers = vec![
        &env,
        setup.reserve.address.clone(),
        setup.venue_handler.address.clone()
    ];
    let proportions = vec![&env, 700_000_u32, 300_000];

    setup.dispatcher.reset_handlers(&handlers, &proportions);
    let first = setup.dispatcher.get_allocations();
    setup.dispatcher.reset_handlers(&handlers, &proportions);

    assert_eq!(setup.dispatcher.get_allocations(), first);
    assert_eq!(
        first,
        vec![
            &env,
            HandlerAllocation { handler: setup.reserve.address.clone(), proportion: 700_000 },
            HandlerAllocation { handler: setup.venue_handler.address.clone(), proportion: 300_000 }
        ]
    );
    // reconfiguration alone leaves deployed capital where it is
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 700_000);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 300_000);
}

#[test]
fn update_proportions_reweights_future_deposits() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);

    setup.dispatcher.update_proportions(
        &vec![&env, setup.reserve.address.clone(), setup.venue_handler.address.clone()],
        &vec![&env, 300_000_u32, 700_000]
    );

    let mut sum: u32 = 0;
    for proportion in setup.dispatcher.get_proportions().iter() {
        sum += proportion;
    }
    assert_eq!(sum, TOTAL_PROPORTION);

    fund_and_deposit(&setup, 1_000_000);
    assert_eq!(setup.reserve.get_balance(&setup.token.address), 300_000);
    assert_eq!(setup.venue_handler.get_balance(&setup.token.address), 700_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #15)")]
fn update_proportions_rejects_a_changed_handler_set() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);

    let stranger = ReserveHandlerClient::new(&env, &env.register(ReserveHandler, ()));
    stranger.initialize(&setup.admin, &setup.dispatcher.address);

    setup.dispatcher.update_proportions(
        &vec![&env, setup.reserve.address.clone(), stranger.address.clone()],
        &vec![&env, 300_000_u32, 700_000]
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #8)")]
fn reset_handlers_rejects_a_bad_proportion_sum() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);

    setup.dispatcher.reset_handlers(
        &vec![&env, setup.reserve.address.clone(), setup.venue_handler.address.clone()],
        &vec![&env, 700_000_u32, 300_001]
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn deposits_for_unrouted_assets_are_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = deploy_dispatcher(&env);

    let other_admin = Address::generate(&env);
    let other = token::StellarAssetClient::new(
        &env,
        &env.register_stellar_asset_contract_v2(other_admin).address()
    );
    other.mint(&setup.dispatcher.address, &1_000);

    assert_eq!(setup.registry.vault_of(&other.address), None);
    setup.dispatcher.deposit(&other.address, &1_000);
}

#[test]
#[should_panic(expected = "Auth")]
fn pool_moves_require_the_routed_vault() {
    let env = Env::default();

    let setup = {
        env.mock_all_auths();
        let setup = deploy_dispatcher(&env);
        fund_and_deposit(&setup, 1_000);
        setup
    };

    env.set_auths(&[]);
    setup.dispatcher.withdraw(
        &setup.token.address,
        &100,
        &vec![&env, Payout { to: setup.vault.clone(), amount: 100 }]
    );
}
