extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, token, Address, Env };

use rivulet::constants::BASE;

use crate::contract::{ VenueMock, VenueMockClient };

fn deploy_venue<'a>(env: &Env) -> (token::StellarAssetClient<'a>, VenueMockClient<'a>) {
    let admin = Address::generate(env);
    let token = token::StellarAssetClient::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone()).address()
    );

    let venue = VenueMockClient::new(env, &env.register(VenueMock, ()));
    venue.initialize(&admin, &token.address);

    (token, venue)
}

#[test]
fn deposits_mint_shares_at_par() {
    let env = Env::default();
    env.mock_all_auths();

    let (token, venue) = deploy_venue(&env);
    let depositor = Address::generate(&env);
    token.mint(&depositor, &1_000_000);

    venue.deposit(&depositor, &1_000_000);

    assert_eq!(venue.share_balance(&depositor), 1_000_000);
    assert_eq!(venue.value_of(&depositor), 1_000_000);
    assert_eq!(venue.cash(), 1_000_000);
}

#[test]
fn accrual_raises_position_value_not_cash() {
    let env = Env::default();
    env.mock_all_auths();

    let (token, venue) = deploy_venue(&env);
    let depositor = Address::generate(&env);
    token.mint(&depositor, &1_000_000);

    venue.deposit(&depositor, &1_000_000);
    venue.accrue(&(BASE + BASE / 10));

    assert_eq!(venue.share_balance(&depositor), 1_000_000);
    assert_eq!(venue.value_of(&depositor), 1_100_000);
    assert_eq!(venue.cash(), 1_000_000);
}

#[test]
fn withdraw_burns_shares_rounding_up() {
    let env = Env::default();
    env.mock_all_auths();

    let (token, venue) = deploy_venue(&env);
    let depositor = Address::generate(&env);
    let token_client = token::Client::new(&env, &token.address);
    token.mint(&depositor, &1_000_000);

    venue.deposit(&depositor, &1_000_000);
    venue.accrue(&(2 * BASE));

    // 3 underlying against a 2:1 share price burns ceil(1.5) = 2 shares
    venue.withdraw(&depositor, &depositor, &3);

    assert_eq!(venue.share_balance(&depositor), 999_998);
    assert_eq!(token_client.balance(&depositor), 3);
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn withdrawing_beyond_cash_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let (token, venue) = deploy_venue(&env);
    let depositor = Address::generate(&env);
    token.mint(&depositor, &1_000);

    venue.deposit(&depositor, &1_000);
    venue.accrue(&(2 * BASE));

    // position is worth 2_000 but the venue only holds 1_000 in cash
    venue.withdraw(&depositor, &depositor, &1_500);
}

#[test]
#[should_panic(expected = "Error(Contract, #12)")]
fn rate_may_not_fall() {
    let env = Env::default();
    env.mock_all_auths();

    let (_token, venue) = deploy_venue(&env);
    venue.accrue(&(BASE - 1));
}
