use skyfare_catalog::FlightGenerator;
use skyfare_offer::DealGenerator;
use skyfare_store::{Config, InMemorySessionRepository, SessionRepository};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub flights: Arc<FlightGenerator>,
    pub deals: Arc<DealGenerator>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionRepository::new(Duration::from_secs(config.sessions.ttl_seconds))),
            flights: Arc::new(FlightGenerator::default()),
            deals: Arc::new(DealGenerator::new(config.deals.batch_size)),
        }
    }
}
