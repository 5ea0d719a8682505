//! HTTP handlers for branch inventory endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::{BranchInventorySummary, InventoryService};
use crate::AppState;
use shared::snapshot::BranchStockEntry;

/// Query parameters for branch stock listing
#[derive(Debug, Deserialize)]
pub struct BranchStockQuery {
    pub search: Option<String>,
}

/// Get the transferable stock of one branch
pub async fn get_branch_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(branch_id): Path<Uuid>,
    Query(query): Query<BranchStockQuery>,
) -> AppResult<Json<Vec<BranchStockEntry>>> {
    let service = InventoryService::new(state.db);
    let stock = service
        .branch_stock(current_user.0.store_id, branch_id, query.search.as_deref())
        .await?;
    Ok(Json(stock))
}

/// Get inventory totals grouped by branch
pub async fn get_inventory_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<BranchInventorySummary>>> {
    let service = InventoryService::new(state.db);
    let summary = service.summary_by_branch(current_user.0.store_id).await?;
    Ok(Json(summary))
}
