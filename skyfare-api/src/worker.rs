use skyfare_store::SessionRepository;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

/// Shortest interval the sweeper accepts.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Drops booking sessions whose traveller has gone idle.
pub async fn start_session_sweeper(sessions: Arc<dyn SessionRepository>, every: Duration) {
    let every = sweep_interval(every);
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Session sweeper started, running every {:?}", every);

    loop {
        ticker.tick().await;
        match sessions.purge_expired().await {
            Ok(0) => {}
            Ok(purged) => debug!("Sweeper removed {} sessions", purged),
            Err(e) => error!("Session sweep failed: {}", e),
        }
    }
}

/// The configured interval, raised to [`MIN_SWEEP_INTERVAL`].
fn sweep_interval(configured: Duration) -> Duration {
    configured.max(MIN_SWEEP_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval_floor() {
        assert_eq!(sweep_interval(Duration::ZERO), MIN_SWEEP_INTERVAL);
        assert_eq!(sweep_interval(Duration::from_millis(250)), MIN_SWEEP_INTERVAL);
        assert_eq!(sweep_interval(Duration::from_secs(60)), Duration::from_secs(60));
    }
}
