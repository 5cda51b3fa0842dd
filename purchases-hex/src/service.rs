//! Purchase Application Service
//!
//! Orchestrates the purchase store and the conversion engine through their ports.
//! Contains NO infrastructure logic - pure business orchestration.

use purchases_types::{
    AppError, ConversionError, ConvertedPurchase, CreatePurchaseRequest, ExchangeRateGateway,
    NewPurchase, Purchase, PurchaseId, PurchaseRepository,
};

use crate::conversion::{ConversionEngine, conversion_window};

/// Application service for purchase operations.
///
/// Generic over `R: PurchaseRepository` and `G: ExchangeRateGateway` - both
/// adapters are injected at compile time. This enables:
/// - Swapping the store or the rate source without code changes
/// - Testing with an in-memory repo and a fake gateway
pub struct PurchaseService<R: PurchaseRepository, G: ExchangeRateGateway> {
    repo: R,
    engine: ConversionEngine<G>,
}

impl<R: PurchaseRepository, G: ExchangeRateGateway> PurchaseService<R, G> {
    /// Creates a new purchase service.
    pub fn new(repo: R, gateway: G) -> Self {
        Self {
            repo,
            engine: ConversionEngine::new(gateway),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the conversion engine.
    pub fn engine(&self) -> &ConversionEngine<G> {
        &self.engine
    }

    /// Records a new purchase.
    pub async fn add_purchase(&self, req: CreatePurchaseRequest) -> Result<Purchase, AppError> {
        let new = NewPurchase::new(
            req.description,
            req.transaction_date,
            req.amount,
            req.currency,
            req.country,
        )?;

        let purchase = self.repo.save(new).await?;
        tracing::info!(purchase_id = %purchase.id, "Purchase recorded");
        Ok(purchase)
    }

    /// Gets a purchase by ID.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(purchase_id = %id, "Purchase not found");
            AppError::purchase_not_found()
        })
    }

    /// Gets a purchase with its amount converted to `currency` / `country`.
    ///
    /// The stored purchase is read, never modified, so repeated calls against
    /// an unchanged rate source give identical results.
    pub async fn get_converted_purchase(
        &self,
        id: PurchaseId,
        currency: &str,
        country: &str,
    ) -> Result<ConvertedPurchase, AppError> {
        if currency.trim().is_empty() || country.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Target currency and country are required".into(),
            ));
        }

        let purchase = self.get_purchase(id).await?;

        match self.engine.convert(&purchase, currency, country).await {
            Ok(converted_amount) => Ok(ConvertedPurchase {
                purchase,
                converted_amount,
            }),
            Err(err) => {
                log_conversion_failure(&purchase, currency, country, &err);
                Err(err.into())
            }
        }
    }
}

fn log_conversion_failure(purchase: &Purchase, currency: &str, country: &str, err: &ConversionError) {
    match err {
        ConversionError::IneligibleOrigin { .. } => tracing::warn!(
            purchase_id = %purchase.id,
            origin_currency = purchase.amount.currency(),
            origin_country = purchase.amount.country(),
            currency,
            country,
            "Conversion not available for purchase origin"
        ),
        ConversionError::NoRateFound { .. } => {
            let (start, end) = conversion_window(purchase.transaction_date);
            tracing::warn!(
                purchase_id = %purchase.id,
                start_date = %start,
                end_date = %end,
                currency,
                country,
                "No exchange rates found"
            )
        }
        ConversionError::AmountOutOfRange { amount, rate } => tracing::warn!(
            purchase_id = %purchase.id,
            %amount,
            %rate,
            currency,
            country,
            "Converted amount out of range"
        ),
        ConversionError::Gateway(e) => tracing::error!(
            purchase_id = %purchase.id,
            currency,
            country,
            error = %e,
            "Exchange rate lookup failed"
        ),
    }
}
