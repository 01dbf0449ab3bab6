pub mod app_config;
pub mod session_repo;

pub use app_config::Config;
pub use session_repo::{FlowStep, InMemorySessionRepository, SessionRepository, StoreError};
