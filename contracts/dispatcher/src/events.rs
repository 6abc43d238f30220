use soroban_sdk::{ Address, Env, Symbol };

pub struct DispatcherEvents {}

impl DispatcherEvents {
    /// - topics - `["initialization", admin: Address]`
    /// - data - `[registry: Address, handler_count: u32]`
    pub fn initialization(env: &Env, admin: Address, registry: Address, handler_count: u32) {
        let topics = (Symbol::new(env, "initialization"), admin);
        env.events().publish(topics, (registry, handler_count));
    }

    /// - topics - `["deposit_routed", asset: Address]`
    /// - data - `[amount: i128]`
    pub fn deposit_routed(env: &Env, asset: Address, amount: i128) {
        let topics = (Symbol::new(env, "deposit_routed"), asset);
        env.events().publish(topics, amount);
    }

    /// - topics - `["withdrawal_routed", asset: Address]`
    /// - data - `[amount: i128, from_idle: i128]`
    pub fn withdrawal_routed(env: &Env, asset: Address, amount: i128, from_idle: i128) {
        let topics = (Symbol::new(env, "withdrawal_routed"), asset);
        env.events().publish(topics, (amount, from_idle));
    }

    /// - topics - `["rebalance", asset: Address]`
    /// - data - `[withdrawn: i128, deposited: i128]`
    pub fn rebalance(env: &Env, asset: Address, withdrawn: i128, deposited: i128) {
        let topics = (Symbol::new(env, "rebalance"), asset);
        env.events().publish(topics, (withdrawn, deposited));
    }

    /// - topics - `["handlers_reset"]`
    /// - data - `[handler_count: u32]`
    pub fn handlers_reset(env: &Env, handler_count: u32) {
        let topics = (Symbol::new(env, "handlers_reset"),);
        env.events().publish(topics, handler_count);
    }

    /// - topics - `["proportions_updated"]`
    /// - data - `[handler_count: u32]`
    pub fn proportions_updated(env: &Env, handler_count: u32) {
        let topics = (Symbol::new(env, "proportions_updated"),);
        env.events().publish(topics, handler_count);
    }
}
