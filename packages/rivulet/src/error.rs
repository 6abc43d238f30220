use soroban_sdk::contracterror;

pub type RivuletResult<T = ()> = Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotAuthorized = 2,
    LengthMismatch = 3,
    RelationAlreadySet = 4,
    UnknownAsset = 5,
    RateUnavailable = 6,
    DustAmount = 7,
    ProportionSumInvalid = 8,
    InsufficientLiquidity = 9,
    HandlerNotEnabled = 10,
    InvalidFee = 11,
    InvalidAmount = 12,
    DuplicateHandler = 13,
    EmptyHandlerTable = 14,
    UnknownHandler = 15,
    MathError = 16,
}
