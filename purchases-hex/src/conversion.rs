//! Currency Conversion Engine
//!
//! Converts a stored purchase into a target currency using the most recent
//! Treasury rate published within six months before the purchase date.
//!
//! The flow for one conversion:
//! 1. Reject purchases not recorded in Dollar / United States
//! 2. Build the date-bounded filter for the target currency and country
//! 3. Ask the gateway for matching records, newest first
//! 4. Apply the first record's rate, rounding half-to-even to cents

use chrono::{Months, NaiveDate, NaiveDateTime};

use purchases_types::{ConversionError, ConvertedAmount, ExchangeRateGateway, Purchase};
use treasury_rates::{RateFilter, RateSort};

/// How far back from the purchase date a rate may have been published.
pub const CONVERSION_WINDOW_MONTHS: u32 = 6;

/// Returns the inclusive `(start, end)` record-date window for a purchase.
///
/// `end` is the calendar date of the purchase; `start` is six calendar months
/// earlier, clamped to the end of a shorter month (Aug 31 -> Feb 28/29).
pub fn conversion_window(transaction_date: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let end = transaction_date.date();
    let start = end
        .checked_sub_months(Months::new(CONVERSION_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// Builds the gateway filter for a window and target.
pub fn rate_filter(start: NaiveDate, end: NaiveDate, currency: &str, country: &str) -> RateFilter {
    RateFilter::new()
        .record_date_from(start)
        .record_date_to(end)
        .currency(currency)
        .country(country)
}

/// Computes converted amounts against an injected rate source.
pub struct ConversionEngine<G: ExchangeRateGateway> {
    gateway: G,
}

impl<G: ExchangeRateGateway> ConversionEngine<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Converts `purchase` into `currency` / `country`.
    ///
    /// The gateway is not called for ineligible purchases. An empty result is
    /// `NoRateFound`; gateway failures pass through as `Gateway`. A product
    /// outside the decimal range is `AmountOutOfRange`.
    #[tracing::instrument(skip(self, purchase), fields(purchase_id = %purchase.id))]
    pub async fn convert(
        &self,
        purchase: &Purchase,
        currency: &str,
        country: &str,
    ) -> Result<ConvertedAmount, ConversionError> {
        if !purchase.amount.is_origin() {
            return Err(ConversionError::IneligibleOrigin {
                currency: purchase.amount.currency().to_string(),
                country: purchase.amount.country().to_string(),
            });
        }

        let (start, end) = conversion_window(purchase.transaction_date);
        let filter = rate_filter(start, end, currency, country);
        tracing::debug!(%filter, "Querying exchange rates");

        let records = self
            .gateway
            .fetch_rates(&filter, RateSort::newest_first())
            .await?;

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| ConversionError::NoRateFound {
                currency: currency.to_string(),
                country: country.to_string(),
                from: start,
                to: end,
            })?;

        tracing::debug!(
            record_date = %record.record_date,
            exchange_rate = %record.exchange_rate,
            "Selected exchange rate"
        );

        purchase
            .amount
            .convert(record.exchange_rate, record.currency, record.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_drops_time_of_day() {
        let (start, end) = conversion_window(at(2023, 9, 30));
        assert_eq!(end, date(2023, 9, 30));
        assert_eq!(start, date(2023, 3, 30));
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let (start, end) = conversion_window(at(2024, 2, 15));
        assert_eq!(start, date(2023, 8, 15));
        assert_eq!(end, date(2024, 2, 15));
    }

    #[test]
    fn test_window_clamps_to_month_end() {
        assert_eq!(conversion_window(at(2023, 8, 31)).0, date(2023, 2, 28));
        assert_eq!(conversion_window(at(2024, 8, 31)).0, date(2024, 2, 29));
    }

    #[test]
    fn test_rate_filter_string() {
        let filter = rate_filter(date(2023, 3, 30), date(2023, 9, 30), "Real", "Brazil");
        assert_eq!(
            filter.to_string(),
            "record_date:gte:2023-03-30,record_date:lte:2023-09-30,currency:eq:Real,country:eq:Brazil"
        );
    }
}
