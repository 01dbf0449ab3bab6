use serde::Serialize;
use uuid::Uuid;

/// Structured telemetry record, emitted through `tracing`.
pub trait TelemetryEvent: Serialize {
    const NAME: &'static str;

    fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(payload) => tracing::info!(event = Self::NAME, %payload, "telemetry"),
            Err(e) => tracing::warn!(event = Self::NAME, "Failed to serialize telemetry: {}", e),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FlightsSearchedEvent {
    pub origin: String,
    pub destination: String,
    pub round_trip: bool,
    pub passengers: u32,
    pub results: usize,
    pub timestamp: i64,
}

impl TelemetryEvent for FlightsSearchedEvent {
    const NAME: &'static str = "flights.searched";
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct DealsBrowsedEvent {
    pub generated: usize,
    pub shown: usize,
    pub filter: serde_json::Value,
    pub timestamp: i64,
}

impl TelemetryEvent for DealsBrowsedEvent {
    const NAME: &'static str = "deals.browsed";
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub session_id: Uuid,
    pub confirmation_code: String,
    pub seat: Option<String>,
    pub passengers: usize,
    pub timestamp: i64,
}

impl TelemetryEvent for BookingConfirmedEvent {
    const NAME: &'static str = "booking.confirmed";
}
