extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, token, vec, Address, Env };

use crate::contract::{ ReserveHandler, ReserveHandlerClient };

fn deploy_token_contract<'a>(env: &Env, admin: &Address) -> token::StellarAssetClient<'a> {
    token::StellarAssetClient::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone()).address()
    )
}

struct Setup<'a> {
    token: token::StellarAssetClient<'a>,
    handler: ReserveHandlerClient<'a>,
    dispatcher: Address,
}

fn deploy_handler(env: &Env) -> Setup<'_> {
    let admin = Address::generate(env);
    let dispatcher = Address::generate(env);
    let token = deploy_token_contract(env, &admin);

    let handler = ReserveHandlerClient::new(env, &env.register(ReserveHandler, ()));
    handler.initialize(&admin, &dispatcher);
    handler.enable_tokens(&vec![env, token.address.clone()]);

    Setup { token, handler, dispatcher }
}

#[test]
fn initialize_reserve_handler() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, dispatcher } = deploy_handler(&env);

    assert_eq!(handler.query_dispatcher(), dispatcher);
    assert!(handler.token_is_enabled(&token.address));
    assert!(!handler.token_is_enabled(&Address::generate(&env)));
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn initializing_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { handler, dispatcher, .. } = deploy_handler(&env);
    handler.initialize(&Address::generate(&env), &dispatcher);
}

#[test]
fn balance_tracks_direct_custody() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, .. } = deploy_handler(&env);

    assert_eq!(handler.get_balance(&token.address), 0);

    token.mint(&handler.address, &250_000);

    assert_eq!(handler.get_balance(&token.address), 250_000);
    assert_eq!(handler.get_liquidity(&token.address), 250_000);

    // deposit only acknowledges funds that already arrived
    handler.deposit(&token.address, &250_000);
    assert_eq!(handler.get_balance(&token.address), 250_000);
}

#[test]
fn withdraw_pushes_to_destination() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, .. } = deploy_handler(&env);
    let recipient = Address::generate(&env);
    let token_client = token::Client::new(&env, &token.address);

    token.mint(&handler.address, &100_000);
    handler.withdraw(&token.address, &recipient, &40_000);

    assert_eq!(token_client.balance(&recipient), 40_000);
    assert_eq!(handler.get_balance(&token.address), 60_000);
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn withdrawing_more_than_custody_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, .. } = deploy_handler(&env);

    token.mint(&handler.address, &100);
    handler.withdraw(&token.address, &Address::generate(&env), &101);
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn depositing_a_disabled_token_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, .. } = deploy_handler(&env);

    handler.disable_tokens(&vec![&env, token.address.clone()]);
    handler.deposit(&token.address, &1);
}

#[test]
fn enabling_is_idempotent() {
    let env = Env::default();
    env.mock_all_auths();

    let Setup { token, handler, .. } = deploy_handler(&env);

    handler.enable_tokens(&vec![&env, token.address.clone()]);
    handler.enable_tokens(&vec![&env, token.address.clone()]);

    assert!(handler.token_is_enabled(&token.address));
}
