use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use skyfare_catalog::Flight;
use skyfare_offer::DealLink;
use skyfare_order::{seat_map, BookingFlow, FlowAction, SeatCode, SubmitOutcome};
use skyfare_shared::models::events::BookingConfirmedEvent;
use skyfare_shared::TelemetryEvent;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenBookingRequest {
    #[serde(default)]
    pub flights: Option<Vec<Flight>>,
    #[serde(default)]
    pub deal: Option<DealLink>,
}

/// The flow as the booking page sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSnapshot {
    #[serde(flatten)]
    pub flow: BookingFlow,
    /// "Next" button enabled
    pub can_advance: bool,
    pub can_submit: bool,
}

impl From<BookingFlow> for BookingSnapshot {
    fn from(flow: BookingFlow) -> Self {
        Self {
            can_advance: flow.can_advance(),
            can_submit: flow.can_submit(),
            flow,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeatsResponse {
    pub data: Vec<SeatCode>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(open_booking))
        .route("/api/bookings/deal", post(open_deal_booking))
        .route("/api/bookings/{id}", get(get_booking).delete(close_booking))
        .route("/api/bookings/{id}/actions", post(apply_action))
        .route("/api/seats", get(list_seats))
}

pub async fn open_booking(
    State(state): State<AppState>,
    Json(req): Json<OpenBookingRequest>,
) -> Result<(StatusCode, Json<BookingSnapshot>), AppError> {
    let flow = match (req.deal, req.flights) {
        (Some(deal), _) => BookingFlow::from_deal(deal),
        (None, Some(flights)) => BookingFlow::from_flights(flights),
        (None, None) => {
            return Err(AppError::UnprocessableEntity(
                "Provide either flights or a deal to book".to_string(),
            ))
        }
    };

    open(&state, flow).await
}

/// Entry from a deal card link, e.g. `?title=...&image=...&price=...&last=...`.
pub async fn open_deal_booking(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<(StatusCode, Json<BookingSnapshot>), AppError> {
    let deal = DealLink::from_query(query.as_deref().unwrap_or_default());
    open(&state, BookingFlow::from_deal(deal)).await
}

async fn open(state: &AppState, flow: BookingFlow) -> Result<(StatusCode, Json<BookingSnapshot>), AppError> {
    let id = state.sessions.create(flow.clone()).await?;
    info!("Booking {} opened at step {}", id, flow.step);
    Ok((StatusCode::CREATED, Json(flow.into())))
}

async fn load(state: &AppState, id: Uuid) -> Result<BookingFlow, AppError> {
    state
        .sessions
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Booking session not found: {}", id)))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingSnapshot>, AppError> {
    Ok(Json(load(&state, id).await?.into()))
}

pub async fn apply_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<FlowAction>,
) -> Result<Json<BookingSnapshot>, AppError> {
    let mut rng = StdRng::from_entropy();
    let (flow, outcome) = state
        .sessions
        .update(id, Box::new(move |flow: &mut BookingFlow| flow.reduce(action, &mut rng)))
        .await?;

    match outcome {
        Some(SubmitOutcome::Confirmed(code)) => {
            info!("Booking {} confirmed as {}", id, code);
            BookingConfirmedEvent {
                session_id: id,
                confirmation_code: code.to_string(),
                seat: flow.seat.map(|s| s.to_string()),
                passengers: flow.passengers.len(),
                timestamp: Utc::now().timestamp(),
            }
            .emit();
        }
        Some(SubmitOutcome::Incomplete) => info!("Booking {} submitted with blank passenger fields", id),
        None => {}
    }

    Ok(Json(flow.into()))
}

/// The traveller navigated away.
pub async fn close_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await? {
        info!("Booking {} closed", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_seats() -> Json<SeatsResponse> {
    Json(SeatsResponse { data: seat_map() })
}
