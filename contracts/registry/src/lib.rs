#![no_std]

mod contract;
mod events;
mod routing;
mod storage;

pub use crate::contract::{ Registry, RegistryClient };

#[cfg(test)]
mod tests;
