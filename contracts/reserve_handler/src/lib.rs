#![no_std]

mod contract;
mod events;
mod storage;

pub use crate::contract::{ ReserveHandler, ReserveHandlerClient };

#[cfg(test)]
mod tests;
