//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use purchases_types::{NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError};

use crate::types::{SQLITE_DATETIME_FORMAT, SqlitePurchaseRow};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to :memory: opens a fresh database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_purchases.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PurchaseRepository for SqliteRepo {
    async fn save(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
        let now = chrono::Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO purchases (description, amount, currency, country, transaction_date, created_at)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&purchase.description)
        .bind(purchase.amount.value().to_string())
        .bind(purchase.amount.currency())
        .bind(purchase.amount.country())
        .bind(
            purchase
                .transaction_date
                .format(SQLITE_DATETIME_FORMAT)
                .to_string(),
        )
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Purchase::from_parts(PurchaseId::new(id), purchase, now))
    }

    async fn find_by_id(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let row: Option<SqlitePurchaseRow> = sqlx::query_as(
            r#"SELECT id, description, amount, currency, country, transaction_date, created_at
               FROM purchases WHERE id = ?"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePurchaseRow::into_domain).transpose()
    }
}
