extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, vec, Address, Env };

use crate::contract::{ Registry, RegistryClient };

fn deploy_registry<'a>(env: &Env, admin: &Address) -> RegistryClient<'a> {
    let registry = RegistryClient::new(env, &env.register(Registry, ()));
    registry.initialize(admin);
    registry
}

#[test]
fn initialize_registry() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    assert_eq!(registry.query_admin(), admin);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn initializing_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    registry.initialize(&admin);
}

#[test]
fn set_and_look_up_relations() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    let asset_a = Address::generate(&env);
    let asset_b = Address::generate(&env);
    let vault_a = Address::generate(&env);
    let vault_b = Address::generate(&env);

    registry.set_vaults(
        &vec![&env, asset_a.clone(), asset_b.clone()],
        &vec![&env, vault_a.clone(), vault_b.clone()]
    );

    assert_eq!(registry.vault_of(&asset_a), Some(vault_a));
    assert_eq!(registry.vault_of(&asset_b), Some(vault_b));
    assert_eq!(registry.vault_of(&Address::generate(&env)), None);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn mismatched_relation_lengths_fail() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    registry.set_vaults(&vec![&env, Address::generate(&env)], &vec![&env]);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn setting_an_existing_relation_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    let asset = Address::generate(&env);
    registry.set_vaults(
        &vec![&env, asset.clone()],
        &vec![&env, Address::generate(&env)]
    );
    registry.set_vaults(&vec![&env, asset], &vec![&env, Address::generate(&env)]);
}

#[test]
fn update_replaces_an_existing_relation() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    let asset = Address::generate(&env);
    let old_vault = Address::generate(&env);
    let new_vault = Address::generate(&env);

    registry.set_vaults(&vec![&env, asset.clone()], &vec![&env, old_vault]);
    registry.update_vault(&asset, &new_vault);

    assert_eq!(registry.vault_of(&asset), Some(new_vault));
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn updating_an_unknown_asset_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let registry = deploy_registry(&env, &admin);

    registry.update_vault(&Address::generate(&env), &Address::generate(&env));
}

#[test]
#[should_panic(expected = "Auth")]
fn relation_changes_require_the_admin() {
    let env = Env::default();

    let admin = Address::generate(&env);
    let registry = RegistryClient::new(&env, &env.register(Registry, ()));
    registry.initialize(&admin);

    registry.set_vaults(
        &vec![&env, Address::generate(&env)],
        &vec![&env, Address::generate(&env)]
    );
}
