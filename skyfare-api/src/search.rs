use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use skyfare_catalog::{CalendarDay, Flight, FlightQuery, Leg, ResultsCalendar};
use skyfare_core::airports;
use skyfare_core::search::{parse_travel_date, PassengerKind};
use skyfare_core::{Airport, BookingFormState, PassengerCounts};
use skyfare_shared::models::events::FlightsSearchedEvent;
use skyfare_shared::TelemetryEvent;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub flights: Vec<Flight>,
    /// Query string for `GET /api/calendar`
    pub calendar_query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub depart: Option<String>,
    pub ret: Option<String>,
    pub pax: Option<String>,
    /// Day picked in the outbound strip
    pub pick_depart: Option<String>,
    /// Day picked in the inbound strip
    pub pick_ret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PassengerLine {
    pub count: u32,
    pub kind: PassengerKind,
}

#[derive(Debug, Serialize)]
pub struct PassengerSummary {
    pub breakdown: Vec<PassengerLine>,
    pub total: u32,
}

impl From<PassengerCounts> for PassengerSummary {
    fn from(counts: PassengerCounts) -> Self {
        Self {
            breakdown: counts
                .breakdown()
                .into_iter()
                .filter(|(count, _)| *count > 0)
                .map(|(count, kind)| PassengerLine { count, kind })
                .collect(),
            total: counts.total(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub round_trip: bool,
    pub outbound: Vec<CalendarDay>,
    pub inbound: Vec<CalendarDay>,
    pub passengers: PassengerSummary,
    pub can_continue: bool,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", post(submit_search))
        .route("/api/calendar", get(results_calendar))
}

/// Validate the booking form and run the search it describes.
pub async fn submit_search(
    State(state): State<AppState>,
    Json(form): Json<BookingFormState>,
) -> Result<Json<SearchResponse>, AppError> {
    let search = form.validate()?;

    let query = FlightQuery {
        origin: search.origin.code.to_string(),
        destination: search.destination.code.to_string(),
        departure: search.departing,
        return_date: search.returning,
        passengers: search.passengers.total(),
    };
    let mut rng = StdRng::from_entropy();
    let flights = state.flights.generate(&query, &mut rng);

    info!(
        "Search {} → {} on {} ({} passengers)",
        search.origin.code,
        search.destination.code,
        search.departing,
        query.passengers
    );
    FlightsSearchedEvent {
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        round_trip: query.return_date.is_some(),
        passengers: query.passengers,
        results: flights.len(),
        timestamp: Utc::now().timestamp(),
    }
    .emit();

    Ok(Json(SearchResponse {
        flights,
        calendar_query: search.navigation_query(),
    }))
}

fn optional_date(raw: &Option<String>) -> Result<Option<NaiveDate>, AppError> {
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(parse_travel_date(v)?)),
        None => Ok(None),
    }
}

/// Day strips around the searched dates.
pub async fn results_calendar(Query(params): Query<CalendarParams>) -> Result<Json<CalendarResponse>, AppError> {
    let depart = optional_date(&params.depart)?
        .ok_or_else(|| AppError::ValidationError("depart is required".to_string()))?;
    let ret = optional_date(&params.ret)?;
    let today = Utc::now().date_naive();

    let mut calendar = ResultsCalendar::new(depart, ret, today);
    if let Some(day) = optional_date(&params.pick_depart)? {
        calendar.select(Leg::Outbound, day)?;
    }
    if let Some(day) = optional_date(&params.pick_ret)? {
        calendar.select(Leg::Inbound, day)?;
    }

    let passengers = PassengerCounts::parse_token(params.pax.as_deref().unwrap_or_default());

    Ok(Json(CalendarResponse {
        origin: params.from.as_deref().and_then(airports::find).copied(),
        destination: params.to.as_deref().and_then(airports::find).copied(),
        round_trip: calendar.is_round_trip(),
        outbound: calendar.outbound_days(),
        inbound: calendar.inbound_days(),
        passengers: passengers.into(),
        can_continue: calendar.can_continue(),
    }))
}
