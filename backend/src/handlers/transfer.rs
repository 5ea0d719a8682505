//! HTTP handlers for inter-branch stock transfers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::transfer::StockTransferRecord;
use crate::services::{
    CatalogService, InventoryService, PgStockMover, TransferExecutor, TransferService,
};
use crate::AppState;
use shared::models::TransferSelection;
use shared::queue::{BatchOutcome, TransferItem, TransferQueue};
use shared::types::{PaginatedResponse, Pagination};

/// Input for a single immediate transfer
#[derive(Debug, Deserialize, Validate)]
pub struct QuickTransferInput {
    pub product_id: Uuid,
    pub from_branch_id: Uuid,
    pub to_branch_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// One line of a batch transfer request
#[derive(Debug, Deserialize, Validate)]
pub struct BatchTransferItemInput {
    pub product_id: Uuid,
    pub from_branch_id: Uuid,
    pub to_branch_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Input for executing a batch of transfers
#[derive(Debug, Deserialize, Validate)]
pub struct BatchTransferInput {
    #[validate]
    pub items: Vec<BatchTransferItemInput>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Response for a completed quick transfer
#[derive(Debug, Serialize)]
pub struct QuickTransferResponse {
    pub product_id: Uuid,
    pub from_branch_id: Uuid,
    pub to_branch_id: Uuid,
    pub quantity: i64,
}

/// Execute a single transfer immediately
pub async fn quick_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<QuickTransferInput>,
) -> AppResult<Json<QuickTransferResponse>> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let store_id = current_user.0.store_id;
    let item = resolve_item(
        &state,
        store_id,
        input.product_id,
        input.from_branch_id,
        input.to_branch_id,
        input.quantity,
    )
    .await?;

    let executor = TransferExecutor::new(PgStockMover::new(state.db), state.events);
    executor.quick_transfer(&item, input.notes).await?;

    Ok(Json(QuickTransferResponse {
        product_id: item.product.id,
        from_branch_id: item.source_inventory.branch_id,
        to_branch_id: item.target_branch_id,
        quantity: item.quantity,
    }))
}

/// Execute a batch of transfers in request order
///
/// Execution stops at the first failing item. The response reports the
/// committed prefix and the items left for retry, with the failed item
/// first among them.
pub async fn batch_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<BatchTransferInput>,
) -> AppResult<Json<BatchOutcome>> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let store_id = current_user.0.store_id;

    let mut queue = TransferQueue::new();
    for line in &input.items {
        let item = resolve_item(
            &state,
            store_id,
            line.product_id,
            line.from_branch_id,
            line.to_branch_id,
            line.quantity,
        )
        .await?;
        queue.add(item);
    }

    let executor = TransferExecutor::new(PgStockMover::new(state.db), state.events);
    let outcome = executor.execute_batch(&mut queue, input.notes).await;

    Ok(Json(outcome))
}

/// List the store's committed transfers, most recent first
pub async fn list_transfers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<StockTransferRecord>>> {
    let service = TransferService::new(state.db);
    let transfers = service
        .list_transfers(current_user.0.store_id, &pagination)
        .await?;
    Ok(Json(transfers))
}

/// Resolve request ids into a queue item backed by current ledger state
///
/// Rows with no available stock are rejected here; zero-stock items are
/// never transfer candidates and must not reach the queue.
async fn resolve_item(
    state: &AppState,
    store_id: Uuid,
    product_id: Uuid,
    from_branch_id: Uuid,
    to_branch_id: Uuid,
    quantity: i64,
) -> AppResult<TransferItem> {
    let catalog = CatalogService::new(state.db.clone());
    let inventory = InventoryService::new(state.db.clone());

    let product = catalog.find_product(store_id, product_id).await?;
    let source_inventory = inventory
        .find_record(store_id, product_id, from_branch_id)
        .await?;

    if source_inventory.available_quantity < 1 {
        return Err(AppError::InsufficientStock(format!(
            "No available stock at the source branch for product {}",
            product_id
        )));
    }

    Ok(TransferItem::from_selection(TransferSelection {
        product,
        source_inventory,
        target_branch_id: to_branch_id,
        quantity,
    }))
}
