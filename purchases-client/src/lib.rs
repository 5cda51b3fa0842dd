//! # Purchases Client SDK
//!
//! A typed Rust client for the Purchases API.

use chrono::NaiveDateTime;
use purchases_types::{ConversionQuery, CreatePurchaseRequest, PurchaseId, PurchaseResponse};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Purchases API client.
pub struct PurchasesClient {
    base_url: String,
    http: Client,
}

impl PurchasesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records a purchase. Currency and country default to US Dollars on the server.
    pub async fn add_purchase(
        &self,
        description: &str,
        transaction_date: NaiveDateTime,
        amount: Decimal,
        currency: Option<String>,
        country: Option<String>,
    ) -> Result<PurchaseResponse, ClientError> {
        let req = CreatePurchaseRequest {
            description: description.to_string(),
            transaction_date,
            amount,
            currency,
            country,
        };
        self.post("/v1/purchases", &req).await
    }

    /// Gets a purchase with its amount converted to the given currency.
    pub async fn get_converted_purchase(
        &self,
        id: PurchaseId,
        currency: &str,
        country: &str,
    ) -> Result<PurchaseResponse, ClientError> {
        let query = ConversionQuery {
            currency: currency.to_string(),
            country: country.to_string(),
        };
        let resp = self
            .http
            .get(format!(
                "{}/v1/purchases/{}/exchange-rates/conversion",
                self.base_url, id
            ))
            .query(&query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
