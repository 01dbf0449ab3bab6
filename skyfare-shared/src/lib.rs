pub mod models;
pub mod pii;

pub use models::events::TelemetryEvent;
pub use pii::Masked;
