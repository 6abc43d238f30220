use rivulet::constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD };
use rivulet::types::VaultOperation;
use soroban_sdk::{ contracttype, Address, Env };

#[derive(Clone)]
#[contracttype]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    TotalSupply,
    ExchangeRate,
    Fee(VaultOperation),
    Balance(Address),
    Allowance(AllowanceDataKey),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub asset: Address,
    pub dispatcher: Address,
    pub fee_recipient: Address,
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

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
}

pub fn write_total_supply(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &total);
}

/// Snapshot of the exchange rate taken at the end of the last
/// state-changing operation. Reads recompute from live handler balances;
/// this is only the persisted trace of the last recomputation.
pub fn read_stored_rate(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::ExchangeRate).unwrap_or(0)
}

pub fn write_stored_rate(env: &Env, rate: i128) {
    env.storage().instance().set(&DataKey::ExchangeRate, &rate);
}

pub fn read_fee(env: &Env, operation: VaultOperation) -> i128 {
    env.storage().instance().get(&DataKey::Fee(operation)).unwrap_or(0)
}

pub fn write_fee(env: &Env, operation: VaultOperation, rate: i128) {
    env.storage().instance().set(&DataKey::Fee(operation), &rate);
}
