//! Monetary amounts labelled with the currency and country they belong to.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConversionError;

/// Currency every purchase is expected to be recorded in.
pub const ORIGIN_CURRENCY: &str = "Dollar";

/// Country every purchase is expected to be recorded in.
pub const ORIGIN_COUNTRY: &str = "United States";

/// Fractional digits kept on converted amounts.
pub const CONVERTED_SCALE: u32 = 2;

/// Returns true when the pair is the supported origin ("Dollar", "United States").
///
/// Both labels must match.
pub fn is_origin(currency: &str, country: &str) -> bool {
    currency == ORIGIN_CURRENCY && country == ORIGIN_COUNTRY
}

/// An exact decimal amount tagged with free-form currency and country labels.
///
/// Labels follow the Treasury dataset naming ("Real", "Brazil"), not ISO codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseAmount {
    value: Decimal,
    currency: String,
    country: String,
}

impl PurchaseAmount {
    pub fn new(value: Decimal, currency: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
            country: country.into(),
        }
    }

    /// An amount in the origin currency and country.
    pub fn origin(value: Decimal) -> Self {
        Self::new(value, ORIGIN_CURRENCY, ORIGIN_COUNTRY)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn is_origin(&self) -> bool {
        is_origin(&self.currency, &self.country)
    }

    /// Multiplies by `rate` and rounds half-to-even to two places.
    ///
    /// The product is exact before the single rounding step. A product
    /// beyond the decimal range is `AmountOutOfRange`.
    pub fn convert(
        &self,
        rate: Decimal,
        currency: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<ConvertedAmount, ConversionError> {
        let product =
            self.value
                .checked_mul(rate)
                .ok_or_else(|| ConversionError::AmountOutOfRange {
                    amount: self.value,
                    rate,
                })?;
        let mut value = product
            .round_dp_with_strategy(CONVERTED_SCALE, RoundingStrategy::MidpointNearestEven);
        // round_dp never widens the scale; "20" must render as "20.00"
        value.rescale(CONVERTED_SCALE);

        Ok(ConvertedAmount {
            amount: PurchaseAmount::new(value, currency, country),
            exchange_rate: rate,
        })
    }
}

impl fmt::Display for PurchaseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.value, self.currency, self.country)
    }
}

/// An amount produced by applying an exchange rate.
///
/// Derived at read time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedAmount {
    pub amount: PurchaseAmount,
    /// Rate as published, precision untouched.
    pub exchange_rate: Decimal,
}
