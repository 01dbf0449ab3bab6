pub mod filter;
pub mod generator;
pub mod models;

pub use filter::{Choice, DealFilter, SortMode};
pub use generator::DealGenerator;
pub use models::{format_price, Deal, DealLink, FeaturedDeal, Month, Region, TripType};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DealError {
    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: &'static str, value: String },
}
