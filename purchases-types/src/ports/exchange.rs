//! Exchange rate gateway port.
//!
//! This trait defines the interface to the external rates of exchange source.
//! Implementations can be HTTP clients, fakes for tests, etc.

use treasury_rates::{ExchangeRateRecord, RateFilter, RateSort};

/// Error type for exchange rate lookups.
///
/// Messages are shown to API callers, so upstream bodies never go in here.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Exchange rate service unavailable: {0}")]
    Unavailable(String),

    #[error("Exchange rate service unavailable: upstream returned status {status}")]
    Status { status: u16 },

    #[error("Exchange rate service unavailable: malformed response: {0}")]
    Malformed(String),
}


/// Port trait for exchange rate sources.
#[async_trait::async_trait]
pub trait ExchangeRateGateway: Send + Sync + 'static {
    /// Returns the records matching `filter`, in the order the source returns them.
    ///
    /// An empty vector means nothing matched; it is not an error.
    async fn fetch_rates(
        &self,
        filter: &RateFilter,
        sort: RateSort,
    ) -> Result<Vec<ExchangeRateRecord>, ExchangeError>;
}
