//! Error types for the purchases service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ports::ExchangeError;

const PURCHASE_NOT_FOUND: &str = "The purchase was not found";
const INELIGIBLE_ORIGIN: &str =
    "The conversion is not available, the original purchase was not made in US Dollars";
const NO_RATE_FOUND: &str = "No exchange rates were found to perform the conversion";
const AMOUNT_OUT_OF_RANGE: &str = "The converted amount is too large to be represented";

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Failures of a single currency conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Purchase was recorded in {currency} ({country}), not in US Dollars")]
    IneligibleOrigin { currency: String, country: String },

    #[error("No {currency} ({country}) exchange rate published between {from} and {to}")]
    NoRateFound {
        currency: String,
        country: String,
        from: NaiveDate,
        to: NaiveDate,
    },

    #[error("Converting {amount} at rate {rate} exceeds the supported decimal range")]
    AmountOutOfRange { amount: Decimal, rate: Decimal },

    #[error(transparent)]
    Gateway(#[from] ExchangeError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ineligible origin: {0}")]
    IneligibleOrigin(String),

    #[error("No exchange rate: {0}")]
    NoRateFound(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Gateway failure: {0}")]
    Gateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The not-found error for a purchase lookup.
    pub fn purchase_not_found() -> Self {
        AppError::NotFound(PURCHASE_NOT_FOUND.into())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::IneligibleOrigin { .. } => {
                AppError::IneligibleOrigin(INELIGIBLE_ORIGIN.into())
            }
            ConversionError::NoRateFound { .. } => AppError::NoRateFound(NO_RATE_FOUND.into()),
            ConversionError::AmountOutOfRange { .. } => {
                AppError::Unprocessable(AMOUNT_OUT_OF_RANGE.into())
            }
            ConversionError::Gateway(e) => AppError::Gateway(e.to_string()),
        }
    }
}
