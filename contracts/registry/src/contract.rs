use soroban_sdk::{ contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, Vec };

use rivulet::{
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::{ ErrorCode, RivuletResult },
    validate,
};

use crate::{
    events::RegistryEvents,
    routing::RegistryTrait,
    storage::{ get_admin, get_vault, is_initialized, save_admin, save_vault, set_initialized },
};

contractmeta!(key = "Description", val = "Routing table mapping underlying assets to vaults");

#[contract]
pub struct Registry;

#[contractimpl]
impl RegistryTrait for Registry {
    fn initialize(env: Env, admin: Address) {
        if is_initialized(&env) {
            log!(&env, "Registry: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);
        save_admin(&env, &admin);

        RegistryEvents::initialization(&env, admin);
    }

    fn set_vaults(env: Env, assets: Vec<Address>, vaults: Vec<Address>) {
        let admin = get_admin(&env);
        admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if let Err(error_code) = set_vault_relations(&env, &assets, &vaults) {
            panic_with_error!(&env, error_code);
        }
    }

    fn update_vault(env: Env, asset: Address, vault: Address) {
        let admin = get_admin(&env);
        admin.require_auth();

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let old_vault = match get_vault(&env, &asset) {
            Some(existing) => existing,
            None => {
                log!(&env, "Registry: Update vault: asset has no relation yet");
                panic_with_error!(&env, ErrorCode::UnknownAsset);
            }
        };

        save_vault(&env, &asset, &vault);

        RegistryEvents::vault_updated(&env, asset, old_vault, vault);
    }

    fn vault_of(env: Env, asset: Address) -> Option<Address> {
        get_vault(&env, &asset)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }
}

fn set_vault_relations(env: &Env, assets: &Vec<Address>, vaults: &Vec<Address>) -> RivuletResult {
    validate!(
        env,
        assets.len() == vaults.len(),
        ErrorCode::LengthMismatch,
        "assets length {} does not match vaults length {}",
        assets.len(),
        vaults.len()
    )?;

    for (asset, vault) in assets.iter().zip(vaults.iter()) {
        validate!(
            env,
            get_vault(env, &asset).is_none(),
            ErrorCode::RelationAlreadySet,
            "asset already routed to a vault"
        )?;

        save_vault(env, &asset, &vault);

        RegistryEvents::vault_registered(env, asset, vault);
    }

    Ok(())
}
