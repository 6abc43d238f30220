#![no_std]

mod contract;
mod storage;

pub use crate::contract::{ VenueMock, VenueMockClient };

#[cfg(test)]
mod tests;
