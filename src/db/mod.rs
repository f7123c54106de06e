use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::*;


/// Everything the handlers need from the backing store. Atomicity of the
/// reduce/restore arithmetic belongs to the implementation, not the caller.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// All site records, newest first.
    async fn list_sites(&self) -> AppResult<Vec<Site>>;

    /// Absolute overwrite of the Global row for `sku`. Returns rows touched.
    async fn set_stock(&self, sku: &str, level: &StockLevel) -> AppResult<u64>;

    /// The Global, non-bundle row for `sku`, if any.
    async fn find_reducible(&self, sku: &str) -> AppResult<Option<InventoryItem>>;

    async fn reduce_stock(&self, sku: &str, qty: i64) -> AppResult<()>;

    async fn restore_stock(&self, sku: &str, qty: i64) -> AppResult<()>;
}

/// Postgres-backed store. Reduce/restore go through the stored procedures
/// installed by `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockStore for PgStore {
    async fn list_sites(&self) -> AppResult<Vec<Site>> {
        fetch_all_sites(&self.pool).await
    }

    async fn set_stock(&self, sku: &str, level: &StockLevel) -> AppResult<u64> {
        update_global_stock(&self.pool, sku, level).await
    }

    async fn find_reducible(&self, sku: &str) -> AppResult<Option<InventoryItem>> {
        fetch_reducible_item(&self.pool, sku).await
    }

    async fn reduce_stock(&self, sku: &str, qty: i64) -> AppResult<()> {
        call_reduce_product_stock(&self.pool, sku, qty).await
    }

    async fn restore_stock(&self, sku: &str, qty: i64) -> AppResult<()> {
        call_restore_product_stock(&self.pool, sku, qty).await
    }
}

// ── Sites ─────────────────────────────────────────────────────────────────────

pub async fn fetch_all_sites(pool: &PgPool) -> AppResult<Vec<Site>> {
    let sites = sqlx::query_as::<_, Site>(
        "SELECT id, name, url, created_at, updated_at
         FROM sites ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(sites)
}

// ── Inventory ─────────────────────────────────────────────────────────────────

pub async fn update_global_stock(pool: &PgPool, sku: &str, level: &StockLevel) -> AppResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock_quantity = $1,
            "isInStock"    = $2,
            updated_at     = $3
        WHERE sku = $4
          AND inventory_type = $5
        "#,
    )
    .bind(&level.quantity)
    .bind(level.in_stock)
    .bind(Utc::now())
    .bind(sku)
    .bind(GLOBAL_INVENTORY_TYPE)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_reducible_item(pool: &PgPool, sku: &str) -> AppResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT sku, inventory_type, "isBundle", stock_quantity, "isInStock", updated_at
        FROM products
        WHERE sku = $1
          AND inventory_type = $2
          AND "isBundle" = false
        LIMIT 1
        "#,
    )
    .bind(sku)
    .bind(GLOBAL_INVENTORY_TYPE)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn call_reduce_product_stock(pool: &PgPool, sku: &str, qty: i64) -> AppResult<()> {
    sqlx::query("SELECT reduce_product_stock($1, $2)")
        .bind(sku)
        .bind(qty)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn call_restore_product_stock(pool: &PgPool, sku: &str, qty: i64) -> AppResult<()> {
    sqlx::query("SELECT restore_product_stock($1, $2)")
        .bind(sku)
        .bind(qty)
        .execute(pool)
        .await?;
    Ok(())
}
