use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use skyfare_core::airports::airports;
use skyfare_core::autocomplete;
use skyfare_core::Airport;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub data: Vec<Airport>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/airports", get(suggest_airports))
}

/// Autocomplete suggestions; an empty query lists the whole directory.
pub async fn suggest_airports(Query(params): Query<AirportQuery>) -> Json<AirportsResponse> {
    let data = autocomplete::filter(&params.q, airports()).into_iter().copied().collect();
    Json(AirportsResponse { data })
}
