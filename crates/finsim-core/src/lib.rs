pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "consortium")]
pub mod consortium;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::FinsimError;
pub use types::*;

/// Standard result type for all finsim operations
pub type FinsimResult<T> = Result<T, FinsimError>;
