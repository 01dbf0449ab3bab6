use async_trait::async_trait;
use skyfare_order::{BookingFlow, FlowError, SubmitOutcome};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Booking session not found: {0}")]
    NotFound(Uuid),
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// A change applied to a stored flow while no other change can run.
pub type FlowStep<'a> = Box<dyn FnOnce(&mut BookingFlow) -> Result<Option<SubmitOutcome>, FlowError> + Send + 'a>;

/// Storage for in-progress booking flows, keyed by flow id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, flow: BookingFlow) -> Result<Uuid, StoreError>;

    /// `None` once the session has expired.
    async fn get(&self, id: Uuid) -> Result<Option<BookingFlow>, StoreError>;

    /// Run `step` against the stored flow and keep the result only if it
    /// succeeds. Concurrent updates of one session are applied one after
    /// the other.
    async fn update(&self, id: Uuid, step: FlowStep<'_>) -> Result<(BookingFlow, Option<SubmitOutcome>), StoreError>;

    /// Returns whether a session was actually dropped.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn purge_expired(&self) -> Result<usize, StoreError>;
}

struct Entry {
    flow: BookingFlow,
    touched: Instant,
}

/// Process-local sessions. Idle entries are dropped after `ttl`.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.touched) > self.ttl
    }

    /// The live entry for `id`, touched. An expired entry is dropped instead.
    fn live<'m>(&self, sessions: &'m mut HashMap<Uuid, Entry>, id: Uuid) -> Option<&'m mut Entry> {
        let now = Instant::now();
        if self.is_expired(sessions.get(&id)?, now) {
            sessions.remove(&id);
            debug!("Booking session {} expired on access", id);
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.touched = now;
        Some(entry)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, flow: BookingFlow) -> Result<Uuid, StoreError> {
        let id = flow.id;
        self.sessions.write().await.insert(
            id,
            Entry {
                flow,
                touched: Instant::now(),
            },
        );
        debug!("Booking session {} opened", id);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<BookingFlow>, StoreError> {
        let mut sessions = self.sessions.write().await;
        Ok(self.live(&mut sessions, id).map(|entry| entry.flow.clone()))
    }

    async fn update(&self, id: Uuid, step: FlowStep<'_>) -> Result<(BookingFlow, Option<SubmitOutcome>), StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = self.live(&mut sessions, id).ok_or(StoreError::NotFound(id))?;

        let mut flow = entry.flow.clone();
        let outcome = step(&mut flow)?;
        entry.flow = flow.clone();
        Ok((flow, outcome))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!("Booking session {} closed", id);
        }
        Ok(removed)
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let before = sessions.len();

        sessions.retain(|_, entry| !self.is_expired(entry, now));

        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {} idle booking sessions", purged);
        }
        Ok(purged)
    }
}
