pub mod airports;
pub mod autocomplete;
pub mod search;

pub use airports::Airport;
pub use search::{BookingFormState, FormError, PassengerCounts, ValidatedSearch};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid travel date: {0}")]
    InvalidDate(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
