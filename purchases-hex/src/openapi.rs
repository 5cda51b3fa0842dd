//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use purchases_types::domain::PurchaseId;
use purchases_types::dto::{AmountResponse, ConversionQuery, CreatePurchaseRequest, PurchaseResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Record a purchase
#[utoipa::path(
    post,
    path = "/v1/purchases",
    tag = "purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = PurchaseResponse),
        (status = 400, description = "Invalid request")
    )
)]
async fn add_purchase() {}

/// Get a purchase converted to another currency
///
/// Uses the most recent Treasury rate published within six months before
/// the purchase date.
#[utoipa::path(
    get,
    path = "/v1/purchases/{id}/exchange-rates/conversion",
    tag = "purchases",
    params(
        ("id" = i64, Path, description = "Purchase ID"),
        ConversionQuery
    ),
    responses(
        (status = 200, description = "Purchase with converted amount", body = PurchaseResponse),
        (status = 400, description = "Missing target or purchase not recorded in US Dollars"),
        (status = 404, description = "Purchase not found"),
        (status = 422, description = "Converted amount exceeds the decimal range"),
        (status = 500, description = "No exchange rate within six months of the purchase"),
        (status = 502, description = "Exchange rate service unavailable")
    )
)]
async fn get_converted_purchase() {}

/// OpenAPI documentation for the Purchases API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Purchase Transaction Service API",
        version = "1.0.0",
        description = "Records purchases in US Dollars and converts them to other currencies using the U.S. Treasury Reporting Rates of Exchange.",
        license(name = "MIT"),
    ),
    paths(health, add_purchase, get_converted_purchase),
    components(schemas(CreatePurchaseRequest, PurchaseResponse, AmountResponse, PurchaseId)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "purchases", description = "Purchase recording and currency conversion"),
    )
)]
pub struct ApiDoc;
