use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use tracing::info;

use crate::{
    error::AppResult,
    models::{ManualStock, StockAdjustment, StockLevel},
    AppState,
};

// ── POST /stock/manual ───────────────────────────────────────────────────────

/// Absolute overwrite of a Global product's stock. No auth and no version
/// check: concurrent calls are last-write-wins, and a SKU with no matching row
/// still answers `synced`.
pub async fn set_manual_stock(
    State(state): State<AppState>,
    Json(payload): Json<ManualStock>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    payload.validate()?;

    let level = StockLevel::new(payload.stock);
    let start = Instant::now();
    let touched = state.store.set_stock(&payload.sku, &level).await?;

    info!(
        sku = %payload.sku,
        stock = payload.stock,
        in_stock = level.in_stock,
        rows = touched,
        elapsed_ms = start.elapsed().as_millis(),
        "Manual stock set"
    );

    Ok((StatusCode::OK, Json(json!({ "synced": true }))))
}

// ── POST /stock/reduce ───────────────────────────────────────────────────────

/// Decrement on behalf of the storefront. Bundles and non-Global rows are
/// skipped with `ignored`; the arithmetic itself happens in the store.
pub async fn reduce_stock(
    State(state): State<AppState>,
    Json(payload): Json<StockAdjustment>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    payload.validate()?;

    let start = Instant::now();
    let Some(item) = state.store.find_reducible(&payload.sku).await? else {
        info!(sku = %payload.sku, qty = payload.qty, "No reducible product, ignoring");
        return Ok((StatusCode::OK, Json(json!({ "ignored": true }))));
    };

    state.store.reduce_stock(&item.sku, payload.qty).await?;

    info!(
        sku = %item.sku,
        qty = payload.qty,
        previous = %item.stock_quantity,
        elapsed_ms = start.elapsed().as_millis(),
        "Reduced stock"
    );

    Ok((StatusCode::OK, Json(json!({ "reduced": true }))))
}

// ── POST /stock/restore ──────────────────────────────────────────────────────

/// Increment with no auth and no bundle/type pre-check, unlike `reduce_stock`.
pub async fn restore_stock(
    State(state): State<AppState>,
    Json(payload): Json<StockAdjustment>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    payload.validate()?;

    let start = Instant::now();
    state.store.restore_stock(&payload.sku, payload.qty).await?;

    info!(
        sku = %payload.sku,
        qty = payload.qty,
        elapsed_ms = start.elapsed().as_millis(),
        "Restored stock"
    );

    Ok((StatusCode::OK, Json(json!({ "restored": true }))))
}
