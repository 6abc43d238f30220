use soroban_sdk::{ Address, Env, Vec };

pub trait RegistryTrait {
    /// Single-shot setup. Re-initialization fails.
    fn initialize(env: Env, admin: Address);

    /// Register vaults for assets that have no relation yet.
    fn set_vaults(env: Env, assets: Vec<Address>, vaults: Vec<Address>);

    /// Replace the vault of an asset that already has a relation.
    fn update_vault(env: Env, asset: Address, vault: Address);

    fn vault_of(env: Env, asset: Address) -> Option<Address>;

    fn query_admin(env: Env) -> Address;
}
