#![no_std]

mod allowance;
mod balance;
mod contract;
mod events;
mod metadata;
mod storage;
mod vault_token;

pub use crate::contract::{ VaultToken, VaultTokenClient };
