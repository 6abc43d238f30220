use rivulet::constants::{
    INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
    PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use soroban_sdk::{ contracttype, Address, Env };

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Initialized,
    Rate,
    TotalShares,
    Shares(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub asset: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Initialized).unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Config {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn save_rate(env: &Env, rate: i128) {
    env.storage().instance().set(&DataKey::Rate, &rate);
}

pub fn get_rate(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::Rate).unwrap()
}

pub fn save_total_shares(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalShares, &total);
}

pub fn get_total_shares(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalShares).unwrap_or(0)
}

pub fn save_shares(env: &Env, holder: &Address, shares: i128) {
    let key = DataKey::Shares(holder.clone());
    env.storage().persistent().set(&key, &shares);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_shares(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::Shares(holder.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}
