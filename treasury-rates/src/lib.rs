//! Treasury Rates of Exchange Data Contract
//!
//! Types describing the U.S. Treasury Fiscal Data "Rates of Exchange"
//! dataset and the query grammar it accepts. This crate performs no IO:
//! it only knows how records look and how filters and sort orders are
//! spelled on the wire.
//!
//! # Example
//! ```
//! use chrono::NaiveDate;
//! use treasury_rates::{RateFilter, RateSort};
//!
//! let filter = RateFilter::new()
//!     .record_date_from(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
//!     .record_date_to(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap())
//!     .currency("Real")
//!     .country("Brazil");
//!
//! assert_eq!(
//!     filter.to_string(),
//!     "record_date:gte:2023-06-01,record_date:lte:2023-12-01,currency:eq:Real,country:eq:Brazil"
//! );
//! assert_eq!(RateSort::newest_first().to_string(), "-record_date");
//! ```

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base URL of the Fiscal Data API.
pub const DEFAULT_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service";

/// Path of the rates of exchange endpoint, relative to the base URL.
pub const RATES_OF_EXCHANGE_PATH: &str = "/v1/accounting/od/rates_of_exchange";

/// Date layout used by the dataset, both in records and in filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A single row of the rates of exchange dataset.
///
/// Only `record_date`, `country`, `currency` and `exchange_rate` matter for
/// conversions. The remaining columns are kept so a record can be logged or
/// forwarded without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateRecord {
    pub record_date: NaiveDate,
    pub country: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_currency_desc: Option<String>,
    /// Units of `currency` per U.S. dollar, exactly as published.
    pub exchange_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_line_nbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_fiscal_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_fiscal_quarter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_calendar_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_calendar_quarter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_calendar_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_calendar_day: Option<String>,
}

impl ExchangeRateRecord {
    /// Creates a record with only the columns used for conversion.
    pub fn new(
        record_date: NaiveDate,
        currency: impl Into<String>,
        country: impl Into<String>,
        exchange_rate: Decimal,
    ) -> Self {
        Self {
            record_date,
            country: country.into(),
            currency: currency.into(),
            country_currency_desc: None,
            exchange_rate,
            effective_date: None,
            src_line_nbr: None,
            record_fiscal_year: None,
            record_fiscal_quarter: None,
            record_calendar_year: None,
            record_calendar_quarter: None,
            record_calendar_month: None,
            record_calendar_day: None,
        }
    }
}

/// Pagination metadata returned alongside the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default, rename = "total-count")]
    pub total_count: Option<u64>,
    #[serde(default, rename = "total-pages")]
    pub total_pages: Option<u64>,
}

/// Pagination links, relative query strings as the API returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, rename = "self")]
    pub current: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Response envelope of the rates of exchange endpoint.
///
/// A missing `data` array deserializes as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRatePage {
    #[serde(default)]
    pub data: Vec<ExchangeRateRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl ExchangeRatePage {
    /// Consumes the page, yielding its records in upstream order.
    pub fn into_records(self) -> Vec<ExchangeRateRecord> {
        self.data
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter grammar
// ─────────────────────────────────────────────────────────────────────────────

/// Comparison operators understood by the `filter` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
        }
    }
}

/// One `field:op:value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: &'static str,
    pub op: FilterOp,
    pub value: String,
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.op.as_str(), self.value)
    }
}

/// Builder for the comma-separated `filter` expression.
///
/// Clauses are rendered in insertion order and values are inserted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateFilter {
    clauses: Vec<FilterClause>,
}

impl RateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn clause(mut self, field: &'static str, op: FilterOp, value: impl Into<String>) -> Self {
        self.clauses.push(FilterClause {
            field,
            op,
            value: value.into(),
        });
        self
    }

    /// Keeps records published on or after `date`.
    pub fn record_date_from(self, date: NaiveDate) -> Self {
        self.clause(
            "record_date",
            FilterOp::Gte,
            date.format(DATE_FORMAT).to_string(),
        )
    }

    /// Keeps records published on or before `date`.
    pub fn record_date_to(self, date: NaiveDate) -> Self {
        self.clause(
            "record_date",
            FilterOp::Lte,
            date.format(DATE_FORMAT).to_string(),
        )
    }

    pub fn currency(self, currency: impl Into<String>) -> Self {
        self.clause("currency", FilterOp::Eq, currency)
    }

    pub fn country(self, country: impl Into<String>) -> Self {
        self.clause("country", FilterOp::Eq, country)
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for RateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sort order
// ─────────────────────────────────────────────────────────────────────────────

/// Value of the `sort` query parameter. A leading `-` means descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSort {
    pub field: &'static str,
    pub descending: bool,
}

impl RateSort {
    /// Most recent `record_date` first.
    pub fn newest_first() -> Self {
        Self {
            field: "record_date",
            descending: true,
        }
    }
}

impl fmt::Display for RateSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(self.field)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
