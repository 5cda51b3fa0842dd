//! Repository port trait.
//!
//! Adapters (Postgres, SQLite, in-memory) implement this trait.

use crate::domain::{NewPurchase, Purchase, PurchaseId};
use crate::error::RepoError;

/// Storage port for purchases.
///
/// Purchases are insert-only: once saved, a record is never modified.
#[async_trait::async_trait]
pub trait PurchaseRepository: Send + Sync + 'static {
    /// Persists a purchase, assigning its id and creation timestamp.
    async fn save(&self, purchase: NewPurchase) -> Result<Purchase, RepoError>;

    /// Gets a purchase by ID.
    async fn find_by_id(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError>;
}
