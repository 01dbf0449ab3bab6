use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use skyfare_catalog::{Flight, FlightQuery};
use skyfare_core::search::parse_travel_date;
use skyfare_shared::models::events::FlightsSearchedEvent;
use skyfare_shared::TelemetryEvent;
use tracing::debug;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string of `GET /api/flights`. Everything arrives as text so a bad
/// value degrades to the empty answer instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct FlightsParams {
    pub fly_from: Option<String>,
    pub fly_to: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub passengers: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    pub data: Vec<Flight>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FlightsParams {
    pub fn to_query(&self) -> Result<FlightQuery, String> {
        let (Some(origin), Some(destination), Some(date_from)) =
            (non_empty(&self.fly_from), non_empty(&self.fly_to), non_empty(&self.date_from))
        else {
            return Err("fly_from, fly_to and date_from are required".to_string());
        };

        let departure = parse_travel_date(date_from).map_err(|e| e.to_string())?;
        let return_date = non_empty(&self.date_to)
            .map(parse_travel_date)
            .transpose()
            .map_err(|e| e.to_string())?;

        Ok(FlightQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure,
            return_date,
            passengers: FlightQuery::passengers_from_raw(self.passengers.as_deref()),
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/flights", get(list_flights))
}

pub async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightsParams>,
) -> (StatusCode, Json<FlightsResponse>) {
    let query = match params.to_query() {
        Ok(q) => q,
        Err(reason) => {
            debug!("Rejected flight search: {}", reason);
            return (StatusCode::BAD_REQUEST, Json(FlightsResponse { data: Vec::new() }));
        }
    };

    let mut rng = StdRng::from_entropy();
    let data = state.flights.generate(&query, &mut rng);

    FlightsSearchedEvent {
        origin: query.origin.to_uppercase(),
        destination: query.destination.to_uppercase(),
        round_trip: query.return_date.is_some(),
        passengers: query.passengers,
        results: data.len(),
        timestamp: Utc::now().timestamp(),
    }
    .emit();

    (StatusCode::OK, Json(FlightsResponse { data }))
}
