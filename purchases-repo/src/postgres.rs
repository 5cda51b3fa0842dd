//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use purchases_types::{NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError};

use crate::types::PgPurchaseRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_purchases_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PurchaseRepository for PostgresRepo {
    async fn save(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"INSERT INTO purchases (description, amount, currency, country, transaction_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, created_at"#,
        )
        .bind(&purchase.description)
        .bind(purchase.amount.value())
        .bind(purchase.amount.currency())
        .bind(purchase.amount.country())
        .bind(purchase.transaction_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Purchase::from_parts(PurchaseId::new(id), purchase, created_at))
    }

    async fn find_by_id(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let row: Option<PgPurchaseRow> = sqlx::query_as(
            r#"SELECT id, description, amount, currency, country, transaction_date, created_at
               FROM purchases WHERE id = $1"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgPurchaseRow::into_domain))
    }
}
