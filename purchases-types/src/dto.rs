//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ConvertedAmount, ConvertedPurchase, Purchase, PurchaseAmount, PurchaseId};

// ─────────────────────────────────────────────────────────────────────────────
// Purchase DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePurchaseRequest {
    /// Short description, at most 50 characters
    #[schema(example = "Office supplies")]
    pub description: String,
    /// Local date and time of the purchase
    #[schema(value_type = String, example = "2023-09-30T12:00:00")]
    pub transaction_date: NaiveDateTime,
    /// Purchase amount as an exact decimal
    #[schema(value_type = String, example = "11.25")]
    pub amount: Decimal,
    /// Currency label, defaults to "Dollar"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Dollar")]
    pub currency: Option<String>,
    /// Country label, defaults to "United States"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "United States")]
    pub country: Option<String>,
}

/// Target of a conversion, taken from the query string.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversionQuery {
    /// Target currency as named by the Treasury dataset
    #[param(example = "Real")]
    pub currency: String,
    /// Target country as named by the Treasury dataset
    #[param(example = "Brazil")]
    pub country: String,
}

/// An amount rendered as plain decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AmountResponse {
    #[schema(example = "56.62")]
    pub value: String,
    #[schema(example = "Real")]
    pub currency: String,
    #[schema(example = "Brazil")]
    pub country: String,
    /// Rate applied, only present on converted amounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "5.033")]
    pub exchange_rate: Option<String>,
}

impl From<&PurchaseAmount> for AmountResponse {
    fn from(amount: &PurchaseAmount) -> Self {
        Self {
            value: amount.value().to_string(),
            currency: amount.currency().to_string(),
            country: amount.country().to_string(),
            exchange_rate: None,
        }
    }
}

impl From<&ConvertedAmount> for AmountResponse {
    fn from(converted: &ConvertedAmount) -> Self {
        Self {
            exchange_rate: Some(converted.exchange_rate.to_string()),
            ..Self::from(&converted.amount)
        }
    }
}

/// A purchase, optionally with its converted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResponse {
    pub id: PurchaseId,
    #[schema(example = "Office supplies")]
    pub description: String,
    #[schema(value_type = String, example = "2023-09-30T12:00:00")]
    pub transaction_date: NaiveDateTime,
    pub original_amount: AmountResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_amount: Option<AmountResponse>,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            original_amount: AmountResponse::from(&purchase.amount),
            description: purchase.description,
            transaction_date: purchase.transaction_date,
            converted_amount: None,
        }
    }
}

impl From<ConvertedPurchase> for PurchaseResponse {
    fn from(converted: ConvertedPurchase) -> Self {
        Self {
            converted_amount: Some(AmountResponse::from(&converted.converted_amount)),
            ..Self::from(converted.purchase)
        }
    }
}
