use rivulet::types::VaultOperation;
use soroban_sdk::{ Address, Env, Symbol };

pub struct VaultEvents {}

impl VaultEvents {
    /// - topics - `["initialization", admin: Address]`
    /// - data - `[asset: Address, dispatcher: Address]`
    pub fn initialization(env: &Env, admin: Address, asset: Address, dispatcher: Address) {
        let topics = (Symbol::new(env, "initialization"), admin);
        env.events().publish(topics, (asset, dispatcher));
    }

    /// - topics - `["deposit", sender: Address]`
    /// - data - `[recipient: Address, gross_amount: i128, minted: i128, fee: i128]`
    pub fn deposit(
        env: &Env,
        sender: Address,
        recipient: Address,
        gross_amount: i128,
        minted: i128,
        fee: i128
    ) {
        let topics = (Symbol::new(env, "deposit"), sender);
        env.events().publish(topics, (recipient, gross_amount, minted, fee));
    }

    /// - topics - `["redemption", sender: Address]`
    /// - data - `[recipient: Address, burned: i128, net: i128, fee: i128]`
    pub fn redemption(
        env: &Env,
        sender: Address,
        recipient: Address,
        burned: i128,
        net: i128,
        fee: i128
    ) {
        let topics = (Symbol::new(env, "redemption"), sender);
        env.events().publish(topics, (recipient, burned, net, fee));
    }

    /// - topics - `["rebalance", admin: Address]`
    /// - data - `[withdraw_count: u32, deposit_count: u32]`
    pub fn rebalance(env: &Env, admin: Address, withdraw_count: u32, deposit_count: u32) {
        let topics = (Symbol::new(env, "rebalance"), admin);
        env.events().publish(topics, (withdraw_count, deposit_count));
    }

    /// - topics - `["fee_update"]`
    /// - data - `[operation: VaultOperation, old_rate: i128, new_rate: i128]`
    pub fn fee_update(env: &Env, operation: VaultOperation, old_rate: i128, new_rate: i128) {
        let topics = (Symbol::new(env, "fee_update"),);
        env.events().publish(topics, (operation, old_rate, new_rate));
    }
}
