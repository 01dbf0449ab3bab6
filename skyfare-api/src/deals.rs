use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skyfare_offer::{format_price, Deal, DealFilter, DealLink, FeaturedDeal};
use skyfare_shared::models::events::DealsBrowsedEvent;
use skyfare_shared::TelemetryEvent;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DealParams {
    #[serde(rename = "type")]
    pub trip_type: Option<String>,
    pub month: Option<String>,
    pub region: Option<String>,
    pub sort: Option<String>,
}

/// A deal as rendered on a card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCard<T> {
    #[serde(flatten)]
    pub deal: T,
    pub price_label: String,
    /// Query string for `POST /api/bookings/deal`
    pub booking_query: String,
}

impl<T> DealCard<T> {
    fn new(deal: T, link: DealLink) -> Self {
        Self {
            deal,
            price_label: format_price(link.price),
            booking_query: link.to_query(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DealsResponse {
    pub data: Vec<DealCard<Deal>>,
    pub filter: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub data: Vec<DealCard<FeaturedDeal>>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/deals", get(browse_deals))
        .route("/api/deals/featured", get(featured_deals))
}

/// A fresh batch on every call, narrowed by the filter bar.
pub async fn browse_deals(
    State(state): State<AppState>,
    Query(params): Query<DealParams>,
) -> Result<Json<DealsResponse>, AppError> {
    let filter = DealFilter::from_params(
        params.trip_type.as_deref(),
        params.month.as_deref(),
        params.region.as_deref(),
        params.sort.as_deref(),
    )?;

    let mut rng = StdRng::from_entropy();
    let batch = state.deals.generate(Utc::now().date_naive(), &mut rng);
    let shown = filter.apply(&batch);

    let filter_json = json!({
        "type": filter.trip_type.to_string(),
        "month": filter.month.to_string(),
        "region": filter.region.to_string(),
        "sort": filter.sort,
    });

    DealsBrowsedEvent {
        generated: batch.len(),
        shown: shown.len(),
        filter: filter_json.clone(),
        timestamp: Utc::now().timestamp(),
    }
    .emit();

    let data = shown
        .into_iter()
        .map(|deal| {
            let link = deal.link();
            DealCard::new(deal, link)
        })
        .collect();

    Ok(Json(DealsResponse {
        data,
        filter: filter_json,
    }))
}

pub async fn featured_deals(State(state): State<AppState>) -> Json<FeaturedResponse> {
    let mut rng = StdRng::from_entropy();
    let data = state
        .deals
        .generate_featured(Utc::now().date_naive(), &mut rng)
        .into_iter()
        .map(|deal| {
            let link = deal.link();
            DealCard::new(deal, link)
        })
        .collect();

    Json(FeaturedResponse { data })
}
