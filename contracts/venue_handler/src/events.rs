use soroban_sdk::{ Address, Env, Symbol };

pub struct HandlerEvents {}

impl HandlerEvents {
    /// - topics - `["deposit", asset: Address]`
    /// - data - `[amount: i128]`
    pub fn deposit(env: &Env, asset: Address, amount: i128) {
        let topics = (Symbol::new(env, "deposit"), asset);
        env.events().publish(topics, amount);
    }

    /// - topics - `["withdraw", asset: Address]`
    /// - data - `[to: Address, amount: i128]`
    pub fn withdraw(env: &Env, asset: Address, to: Address, amount: i128) {
        let topics = (Symbol::new(env, "withdraw"), asset);
        env.events().publish(topics, (to, amount));
    }

    /// - topics - `["tokens_enabled"]`
    /// - data - `[count: u32]`
    pub fn tokens_enabled(env: &Env, count: u32) {
        let topics = (Symbol::new(env, "tokens_enabled"),);
        env.events().publish(topics, count);
    }

    /// - topics - `["tokens_disabled"]`
    /// - data - `[count: u32]`
    pub fn tokens_disabled(env: &Env, count: u32) {
        let topics = (Symbol::new(env, "tokens_disabled"),);
        env.events().publish(topics, count);
    }
}
