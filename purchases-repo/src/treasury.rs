//! HTTP adapter for the Treasury Reporting Rates of Exchange dataset.

use std::time::Duration;

use async_trait::async_trait;
use purchases_types::{ExchangeError, ExchangeRateGateway};
use tracing::{debug, instrument, warn};
use treasury_rates::{
    ExchangeRatePage, ExchangeRateRecord, RATES_OF_EXCHANGE_PATH, RateFilter, RateSort,
};

/// Rate gateway backed by the Fiscal Data API.
#[derive(Clone)]
pub struct TreasuryGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl TreasuryGateway {
    /// Creates a gateway for `base_url` using a default client.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a gateway whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RATES_OF_EXCHANGE_PATH),
        }
    }

    /// Full URL of the rates of exchange endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExchangeRateGateway for TreasuryGateway {
    #[instrument(skip_all, fields(filter = %filter, sort = %sort))]
    async fn fetch_rates(
        &self,
        filter: &RateFilter,
        sort: RateSort,
    ) -> Result<Vec<ExchangeRateRecord>, ExchangeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("filter", filter.to_string()), ("sort", sort.to_string())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Treasury request failed");
                ExchangeError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "Treasury returned an error status");
            return Err(ExchangeError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExchangeError::Unavailable(e.to_string()))?;

        let page: ExchangeRatePage =
            serde_json::from_slice(&body).map_err(|e| ExchangeError::Malformed(e.to_string()))?;

        let records = page.into_records();
        debug!(count = records.len(), "Fetched exchange rates");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
        routing::get,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Starts a local server answering the rates path with `status` and `body`.
    async fn serve(status: StatusCode, body: &'static str) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));

        async fn rates(
            State((status, body, captured)): State<(StatusCode, &'static str, Captured)>,
            Query(params): Query<HashMap<String, String>>,
        ) -> impl IntoResponse {
            captured.lock().unwrap().push(params);
            (status, [("content-type", "application/json")], body)
        }

        let app = Router::new()
            .route(RATES_OF_EXCHANGE_PATH, get(rates))
            .with_state((status, body, captured.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn brazil_filter() -> RateFilter {
        RateFilter::new()
            .record_date_from(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap())
            .record_date_to(NaiveDate::from_ymd_opt(2023, 10, 1).unwrap())
            .currency("Real")
            .country("Brazil")
    }

    const PAGE: &str = r#"{
        "data": [
            {"record_date": "2023-09-30", "country": "Brazil", "currency": "Real",
             "country_currency_desc": "Brazil-Real", "exchange_rate": "5.033",
             "effective_date": "2023-09-30"},
            {"record_date": "2023-06-30", "country": "Brazil", "currency": "Real",
             "country_currency_desc": "Brazil-Real", "exchange_rate": "4.819",
             "effective_date": "2023-06-30"}
        ],
        "meta": {"count": 2, "total-count": 2, "total-pages": 1}
    }"#;

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway = TreasuryGateway::new("http://rates.local/api/");
        assert_eq!(
            gateway.endpoint(),
            "http://rates.local/api/v1/accounting/od/rates_of_exchange"
        );
    }

    #[tokio::test]
    async fn test_fetch_rates_sends_filter_and_sort() {
        let (base, captured) = serve(StatusCode::OK, PAGE).await;
        let gateway = TreasuryGateway::new(&base);

        let records = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].exchange_rate, dec!(5.033));
        assert_eq!(
            records[0].record_date,
            NaiveDate::from_ymd_opt(2023, 9, 30).unwrap()
        );

        let params = captured.lock().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(
            params[0]["filter"],
            "record_date:gte:2023-04-01,record_date:lte:2023-10-01,currency:eq:Real,country:eq:Brazil"
        );
        assert_eq!(params[0]["sort"], "-record_date");
    }

    #[tokio::test]
    async fn test_fetch_rates_empty_page() {
        let (base, _) = serve(
            StatusCode::OK,
            r#"{"data": [], "meta": {"count": 0, "total-count": 0, "total-pages": 0}}"#,
        )
        .await;
        let gateway = TreasuryGateway::new(&base);

        let records = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rates_error_status() {
        let (base, _) = serve(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#).await;
        let gateway = TreasuryGateway::new(&base);

        let result = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ExchangeError::Status { status: 500 }));
        assert!(!err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_fetch_rates_malformed_body() {
        let (base, _) = serve(StatusCode::OK, "not json").await;
        let gateway = TreasuryGateway::new(&base);

        let result = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await;

        assert!(matches!(result, Err(ExchangeError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_fetch_rates_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway =
            TreasuryGateway::with_timeout(&format!("http://{}", addr), Duration::from_secs(2))
                .unwrap();

        let result = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await;

        assert!(matches!(result, Err(ExchangeError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_gateway_as_trait_object() {
        let (base, _) = serve(StatusCode::OK, PAGE).await;
        let gateway: Arc<dyn ExchangeRateGateway> = Arc::new(TreasuryGateway::new(&base));

        let records = gateway
            .fetch_rates(&brazil_filter(), RateSort::newest_first())
            .await
            .unwrap();

        assert_eq!(records[1].exchange_rate, dec!(4.819));
    }
}
