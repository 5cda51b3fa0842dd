//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use purchases_types::{
    AppError, ConversionQuery, CreatePurchaseRequest, ExchangeRateGateway, PurchaseId,
    PurchaseRepository, PurchaseResponse,
};

use crate::PurchaseService;

/// Application state shared across handlers.
pub struct AppState<R: PurchaseRepository, G: ExchangeRateGateway> {
    pub service: PurchaseService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::IneligibleOrigin(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NoRateFound(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Gateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Record a new purchase.
#[tracing::instrument(skip(state, payload))]
pub async fn add_purchase<R: PurchaseRepository, G: ExchangeRateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let purchase = state.service.add_purchase(req).await?;
    Ok((StatusCode::CREATED, Json(PurchaseResponse::from(purchase))))
}

/// Get a purchase converted to another currency.
#[tracing::instrument(skip(state, query), fields(purchase_id = %id))]
pub async fn get_converted_purchase<R: PurchaseRepository, G: ExchangeRateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
    query: Result<Query<ConversionQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase_id: PurchaseId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid purchase ID".into()))?;
    let Query(target) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let converted = state
        .service
        .get_converted_purchase(purchase_id, &target.currency, &target.country)
        .await?;
    Ok(Json(PurchaseResponse::from(converted)))
}
