use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{error::AppResult, AppState};

// ── GET /admin/sites ─────────────────────────────────────────────────────────

/// Full listing, newest first. Admin-only and low cardinality, so no paging.
pub async fn list_sites(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let sites = state.store.list_sites().await?;
    let elapsed = start.elapsed();

    info!(
        count = sites.len(),
        elapsed_ms = elapsed.as_millis(),
        "Listed sites"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": sites,
        })),
    ))
}
