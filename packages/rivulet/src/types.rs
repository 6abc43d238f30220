use soroban_sdk::{ contracttype, Address };

/// Fee-bearing ledger operations.
#[contracttype]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VaultOperation {
    Mint,
    Redeem,
}

/// One row of the dispatcher's allocation table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandlerAllocation {
    pub handler: Address,
    pub proportion: u32,
}

/// A destination for withdrawn underlying.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub to: Address,
    pub amount: i128,
}
