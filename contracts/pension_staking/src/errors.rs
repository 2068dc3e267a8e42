use common::CommonError;
/// Failure classes. Every class aborts the call with no state change;
/// `Availability` is always the first guard evaluated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract not initialised, or initialised twice.
    Lifecycle = 1,
    /// Invalid tier range, amount out of bounds, fee too high.
    Validation = 2,
    /// Missing role or not the position owner.
    Authorization = 3,
    /// Unknown position or tier, already closed.
    State = 4,
    /// The ledger is paused.
    Availability = 5,
    /// Escrow cannot cover a payout.
    Liquidity = 6,
    /// An amount left the representable range.
    Arithmetic = 7,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotOwner = 4,
    LastSuperAdmin = 5,
    Paused = 6,
    UnknownTier = 7,
    InvalidRange = 8,
    InvalidLockDuration = 9,
    InvalidAmount = 10,
    BelowMinimum = 11,
    AboveMaximum = 12,
    FeeTooHigh = 13,
    NotFound = 14,
    AlreadyClosed = 15,
    InsufficientLiquidity = 16,
    ArithmeticOverflow = 17,
    UnsupportedSchema = 19,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::UnsupportedSchema => ErrorCategory::Lifecycle,
            ContractError::InvalidRange
            | ContractError::InvalidLockDuration
            | ContractError::InvalidAmount
            | ContractError::BelowMinimum
            | ContractError::AboveMaximum
            | ContractError::FeeTooHigh => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::NotOwner
            | ContractError::LastSuperAdmin => ErrorCategory::Authorization,
            ContractError::UnknownTier
            | ContractError::NotFound
            | ContractError::AlreadyClosed => ErrorCategory::State,
            ContractError::Paused => ErrorCategory::Availability,
            ContractError::InsufficientLiquidity => ErrorCategory::Liquidity,
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::LastSuperAdmin => ContractError::LastSuperAdmin,
        }
    }
}
