use soroban_sdk::{ Address, Env, Symbol };

pub struct RegistryEvents {}

impl RegistryEvents {
    /// - topics - `["initialization", admin: Address]`
    /// - data - `[]`
    pub fn initialization(env: &Env, admin: Address) {
        let topics = (Symbol::new(env, "initialization"), admin);
        env.events().publish(topics, ());
    }

    /// - topics - `["vault_registered", asset: Address]`
    /// - data - `[vault: Address]`
    pub fn vault_registered(env: &Env, asset: Address, vault: Address) {
        let topics = (Symbol::new(env, "vault_registered"), asset);
        env.events().publish(topics, vault);
    }

    /// - topics - `["vault_updated", asset: Address]`
    /// - data - `[old_vault: Address, new_vault: Address]`
    pub fn vault_updated(env: &Env, asset: Address, old_vault: Address, new_vault: Address) {
        let topics = (Symbol::new(env, "vault_updated"), asset);
        env.events().publish(topics, (old_vault, new_vault));
    }
}
