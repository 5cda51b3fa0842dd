//! PurchaseService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use purchases_types::{
        AppError, CreatePurchaseRequest, ExchangeError, ExchangeRateGateway, ExchangeRateRecord,
        NewPurchase, Purchase, PurchaseId, PurchaseRepository, RateFilter, RateSort, RepoError,
    };

    use crate::PurchaseService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        purchases: Mutex<HashMap<PurchaseId, Purchase>>,
        next_id: Mutex<i64>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                purchases: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl PurchaseRepository for MockRepo {
        async fn save(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
            let mut next_id = self.next_id.lock().unwrap();
            let id = PurchaseId::new(*next_id);
            *next_id += 1;

            let stored = Purchase::from_parts(id, purchase, Utc::now());
            self.purchases.lock().unwrap().insert(id, stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
            Ok(self.purchases.lock().unwrap().get(&id).cloned())
        }
    }

    /// Rate source returning canned records and recording every query.
    pub struct FakeGateway {
        records: Vec<ExchangeRateRecord>,
        fail: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeGateway {
        pub fn with_records(records: Vec<ExchangeRateRecord>) -> Self {
            Self {
                records,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn empty() -> Self {
            Self::with_records(Vec::new())
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::empty()
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExchangeRateGateway for FakeGateway {
        async fn fetch_rates(
            &self,
            filter: &RateFilter,
            sort: RateSort,
        ) -> Result<Vec<ExchangeRateRecord>, ExchangeError> {
            self.calls
                .lock()
                .unwrap()
                .push((filter.to_string(), sort.to_string()));
            if self.fail {
                return Err(ExchangeError::Unavailable("connection refused".into()));
            }
            Ok(self.records.clone())
        }
    }

    fn purchase_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, 30)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn real(rate: Decimal, day: u32) -> ExchangeRateRecord {
        ExchangeRateRecord::new(
            NaiveDate::from_ymd_opt(2023, 9, day).unwrap(),
            "Real",
            "Brazil",
            rate,
        )
    }

    fn request(currency: Option<&str>, country: Option<&str>) -> CreatePurchaseRequest {
        CreatePurchaseRequest {
            description: "Test".to_string(),
            transaction_date: purchase_date(),
            amount: dec!(11.25),
            currency: currency.map(String::from),
            country: country.map(String::from),
        }
    }

    async fn service_with(
        gateway: FakeGateway,
        currency: Option<&str>,
        country: Option<&str>,
    ) -> (PurchaseService<MockRepo, FakeGateway>, PurchaseId) {
        let service = PurchaseService::new(MockRepo::new(), gateway);
        let purchase = service
            .add_purchase(request(currency, country))
            .await
            .unwrap();
        (service, purchase.id)
    }

    #[tokio::test]
    async fn test_add_purchase_success() {
        let service = PurchaseService::new(MockRepo::new(), FakeGateway::empty());

        let purchase = service.add_purchase(request(None, None)).await.unwrap();

        assert_eq!(purchase.id, PurchaseId::new(1));
        assert_eq!(purchase.description, "Test");
        assert_eq!(purchase.amount.value(), dec!(11.25));
        assert_eq!(purchase.amount.currency(), "Dollar");
        assert_eq!(purchase.amount.country(), "United States");
        assert_eq!(purchase.transaction_date, purchase_date());
    }

    #[tokio::test]
    async fn test_add_purchase_blank_description_fails() {
        let service = PurchaseService::new(MockRepo::new(), FakeGateway::empty());

        let mut req = request(None, None);
        req.description = "  ".to_string();

        let result = service.add_purchase(req).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_add_purchase_long_description_fails() {
        let service = PurchaseService::new(MockRepo::new(), FakeGateway::empty());

        let mut req = request(None, None);
        req.description = "Testttttttttttttttttttttttttttttttttttttttttttttttt".to_string();

        let result = service.add_purchase(req).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_converted_purchase_success() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let (service, id) = service_with(gateway, None, None).await;

        let result = service
            .get_converted_purchase(id, "Real", "Brazil")
            .await
            .unwrap();

        let converted = &result.converted_amount;
        assert_eq!(converted.amount.value().to_string(), "56.62");
        assert_eq!(converted.amount.currency(), "Real");
        assert_eq!(converted.amount.country(), "Brazil");
        assert_eq!(converted.exchange_rate.to_string(), "5.033");
        assert_eq!(result.purchase.amount.value(), dec!(11.25));

        let calls = service.engine().gateway().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0,
            "record_date:gte:2023-03-30,record_date:lte:2023-09-30,currency:eq:Real,country:eq:Brazil"
        );
        assert_eq!(calls[0].1, "-record_date");
    }

    #[tokio::test]
    async fn test_converted_purchase_uses_first_record() {
        let gateway =
            FakeGateway::with_records(vec![real(dec!(5.0), 29), real(dec!(4.0), 1)]);
        let (service, id) = service_with(gateway, None, None).await;

        let result = service
            .get_converted_purchase(id, "Real", "Brazil")
            .await
            .unwrap();

        assert_eq!(result.converted_amount.amount.value().to_string(), "56.25");
        assert_eq!(result.converted_amount.exchange_rate, dec!(5.0));
    }

    #[tokio::test]
    async fn test_no_exchange_rate_found() {
        let (service, id) = service_with(FakeGateway::empty(), None, None).await;

        let result = service.get_converted_purchase(id, "Real", "Brazil").await;

        assert!(matches!(result, Err(AppError::NoRateFound(_))));
        assert_eq!(service.engine().gateway().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ineligible_currency_skips_gateway() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let (service, id) = service_with(gateway, Some("Pesos"), Some("United States")).await;

        let result = service.get_converted_purchase(id, "Real", "Brazil").await;

        assert!(matches!(result, Err(AppError::IneligibleOrigin(_))));
        assert!(service.engine().gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_ineligible_country_skips_gateway() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let (service, id) = service_with(gateway, Some("Dollar"), Some("Canada")).await;

        let result = service.get_converted_purchase(id, "Real", "Brazil").await;

        assert!(matches!(result, Err(AppError::IneligibleOrigin(_))));
        assert!(service.engine().gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_purchase_not_found() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let service = PurchaseService::new(MockRepo::new(), gateway);

        let result = service
            .get_converted_purchase(PurchaseId::new(99), "Real", "Brazil")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.engine().gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let (service, id) = service_with(FakeGateway::failing(), None, None).await;

        let result = service.get_converted_purchase(id, "Real", "Brazil").await;

        assert!(matches!(result, Err(AppError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_oversized_amount_is_rejected_not_panicking() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let service = PurchaseService::new(MockRepo::new(), gateway);
        let purchase = service
            .add_purchase(CreatePurchaseRequest {
                amount: Decimal::MAX,
                ..request(None, None)
            })
            .await
            .unwrap();

        let result = service
            .get_converted_purchase(purchase.id, "Real", "Brazil")
            .await;

        assert!(matches!(result, Err(AppError::Unprocessable(_))));
        assert_eq!(service.engine().gateway().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_target_rejected() {
        let (service, id) = service_with(FakeGateway::empty(), None, None).await;

        let result = service.get_converted_purchase(id, " ", "Brazil").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(service.engine().gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_conversion_is_repeatable() {
        let gateway = FakeGateway::with_records(vec![real(dec!(5.033), 29)]);
        let (service, id) = service_with(gateway, None, None).await;

        let first = service
            .get_converted_purchase(id, "Real", "Brazil")
            .await
            .unwrap();
        let second = service
            .get_converted_purchase(id, "Real", "Brazil")
            .await
            .unwrap();

        assert_eq!(first, second);
        let stored = service.get_purchase(id).await.unwrap();
        assert_eq!(stored, first.purchase);
    }
}
