//! Database row types for SQLite and PostgreSQL.
//!
//! Each backend gets its own row struct so both features can be enabled at once.

use purchases_types::{NewPurchase, Purchase, PurchaseAmount, PurchaseId, RepoError};

/// Layout of `transaction_date` in SQLite TEXT columns.
#[cfg(feature = "sqlite")]
pub const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn stored_purchase(
    id: i64,
    description: String,
    amount: PurchaseAmount,
    transaction_date: chrono::NaiveDateTime,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Purchase {
    // Stored rows were validated on insert
    let new = NewPurchase {
        description,
        transaction_date,
        amount,
    };
    Purchase::from_parts(PurchaseId::new(id), new, created_at)
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite
// ─────────────────────────────────────────────────────────────────────────────

/// Purchase row from SQLite, where decimals and dates are TEXT.
#[cfg(feature = "sqlite")]
#[derive(sqlx::FromRow)]
pub struct SqlitePurchaseRow {
    pub id: i64,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub country: String,
    pub transaction_date: String,
    pub created_at: String,
}

#[cfg(feature = "sqlite")]
impl SqlitePurchaseRow {
    /// Convert database row to domain Purchase.
    pub fn into_domain(self) -> Result<Purchase, RepoError> {
        use std::str::FromStr;

        let value = rust_decimal::Decimal::from_str(&self.amount)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let transaction_date =
            chrono::NaiveDateTime::parse_from_str(&self.transaction_date, SQLITE_DATETIME_FORMAT)
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(stored_purchase(
            self.id,
            self.description,
            PurchaseAmount::new(value, self.currency, self.country),
            transaction_date,
            created_at,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ─────────────────────────────────────────────────────────────────────────────

/// Purchase row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(sqlx::FromRow)]
pub struct PgPurchaseRow {
    pub id: i64,
    pub description: String,
    pub amount: rust_decimal::Decimal,
    pub currency: String,
    pub country: String,
    pub transaction_date: chrono::NaiveDateTime,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl PgPurchaseRow {
    /// Convert database row to domain Purchase.
    pub fn into_domain(self) -> Purchase {
        stored_purchase(
            self.id,
            self.description,
            PurchaseAmount::new(self.amount, self.currency, self.country),
            self.transaction_date,
            self.created_at,
        )
    }
}
