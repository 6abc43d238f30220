use rivulet::constants::{
    INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
    PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use rivulet::types::HandlerAllocation;
use soroban_sdk::{ contracttype, Address, Env, Vec };

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Initialized,
    Allocations,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub registry: Address,
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

pub fn save_allocations(env: &Env, allocations: &Vec<HandlerAllocation>) {
    env.storage().persistent().set(&DataKey::Allocations, allocations);
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::Allocations, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_allocations(env: &Env) -> Vec<HandlerAllocation> {
    let allocations = env
        .storage()
        .persistent()
        .get(&DataKey::Allocations)
        .expect("Dispatcher: allocation table not set");

    env.storage()
        .persistent()
        .extend_ttl(&DataKey::Allocations, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    allocations
}
