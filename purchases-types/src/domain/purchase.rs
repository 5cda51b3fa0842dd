//! Purchase domain model.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::{ConvertedAmount, ORIGIN_COUNTRY, ORIGIN_CURRENCY, PurchaseAmount};
use crate::error::DomainError;

/// Longest accepted description, currency label or country label.
pub const MAX_LABEL_LEN: usize = 50;

/// Store-assigned identifier of a purchase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PurchaseId(i64);

impl PurchaseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PurchaseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PurchaseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Validated purchase data that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub description: String,
    pub transaction_date: NaiveDateTime,
    pub amount: PurchaseAmount,
}

impl NewPurchase {
    /// Validates raw input.
    ///
    /// # Validation
    /// - Description must be non-blank and at most 50 characters
    /// - Currency and country default to the origin pair when absent,
    ///   otherwise must be non-blank and at most 50 characters
    pub fn new(
        description: String,
        transaction_date: NaiveDateTime,
        amount: Decimal,
        currency: Option<String>,
        country: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_label("description", &description)?;

        let currency = currency.unwrap_or_else(|| ORIGIN_CURRENCY.to_string());
        validate_label("currency", &currency)?;

        let country = country.unwrap_or_else(|| ORIGIN_COUNTRY.to_string());
        validate_label("country", &country)?;

        Ok(Self {
            description,
            transaction_date,
            amount: PurchaseAmount::new(amount, currency, country),
        })
    }
}

fn validate_label(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{} cannot be blank",
            field
        )));
    }
    if value.chars().count() > MAX_LABEL_LEN {
        return Err(DomainError::ValidationError(format!(
            "{} must be at most {} characters",
            field, MAX_LABEL_LEN
        )));
    }
    Ok(())
}

/// A stored purchase.
///
/// Immutable once created: nothing in the service rewrites a stored purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub description: String,
    /// Local date-time of the purchase, no zone attached
    pub transaction_date: NaiveDateTime,
    pub amount: PurchaseAmount,
    /// Assigned by the store on insert
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Reconstructs a purchase from stored fields.
    pub fn from_parts(id: PurchaseId, new: NewPurchase, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: new.description,
            transaction_date: new.transaction_date,
            amount: new.amount,
            created_at,
        }
    }
}

/// A stored purchase together with an amount converted at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedPurchase {
    pub purchase: Purchase,
    pub converted_amount: ConvertedAmount,
}
