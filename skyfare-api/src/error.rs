use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_catalog::CalendarError;
use skyfare_core::{CoreError, FormError};
use skyfare_offer::DealError;
use skyfare_order::FlowError;
use skyfare_store::StoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    UnprocessableEntity(String),
    NotFoundError(String),
    ConflictError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<DealError> for AppError {
    fn from(err: DealError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

/// Carries the inline form message unchanged.
impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::InvalidTransition { .. } | FlowError::NotInStep { .. } | FlowError::SeatRequired => {
                Self::ConflictError(err.to_string())
            }
            FlowError::FlightNotOffered(_) | FlowError::UnknownSeat(_) | FlowError::PassengerNotFound(_) => {
                Self::UnprocessableEntity(err.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFoundError(err.to_string()),
            StoreError::Flow(flow) => flow.into(),
        }
    }
}
