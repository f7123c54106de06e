use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Inventory classifier for stock tracked directly on the product, as opposed
/// to per-location or bundle-derived stock.
pub const GLOBAL_INVENTORY_TYPE: &str = "Global";

/// One row of the `products` table as far as stock handling is concerned.
/// `sku` alone is not unique; rows are addressed by `(sku, inventory_type)`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryItem {
    pub sku: String,
    pub inventory_type: String,
    #[sqlx(rename = "isBundle")]
    #[serde(rename = "isBundle")]
    pub is_bundle: bool,
    pub stock_quantity: String,
    #[sqlx(rename = "isInStock")]
    #[serde(rename = "isInStock")]
    pub is_in_stock: bool,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_global(&self) -> bool {
        self.inventory_type == GLOBAL_INVENTORY_TYPE
    }

    /// Only Global, non-bundle rows take automated reductions. Bundles derive
    /// their stock from constituents and would otherwise be decremented twice.
    pub fn is_reducible(&self) -> bool {
        self.is_global() && !self.is_bundle
    }
}

/// Stored form of a stock count: the textual quantity and the flag derived
/// from it. `in_stock` is never set on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub quantity: String,
    pub in_stock: bool,
}

impl StockLevel {
    pub fn new(stock: i64) -> Self {
        Self {
            quantity: stock.to_string(),
            in_stock: stock > 0,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /stock/manual`: absolute overwrite.
#[derive(Debug, Deserialize)]
pub struct ManualStock {
    pub sku: String,
    pub stock: i64,
}

impl ManualStock {
    pub fn validate(&self) -> AppResult<()> {
        validate_sku(&self.sku)
    }
}

/// Body of `POST /stock/reduce` and `POST /stock/restore`: relative change.
#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub sku: String,
    pub qty: i64,
}

impl StockAdjustment {
    pub fn validate(&self) -> AppResult<()> {
        validate_sku(&self.sku)?;
        if self.qty <= 0 {
            return Err(AppError::BadRequest("qty must be > 0".to_string()));
        }
        Ok(())
    }
}

fn validate_sku(sku: &str) -> AppResult<()> {
    if sku.trim().is_empty() {
        return Err(AppError::BadRequest("sku must not be empty".to_string()));
    }
    Ok(())
}
