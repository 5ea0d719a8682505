//! Inter-branch stock transfer execution
//!
//! The executor drives the external atomic move primitive one item at a
//! time, sequentially and never in parallel: the partial-failure contract
//! (stop on first failure, keep the rest queued) is only meaningful when
//! each call is awaited before the next is issued.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::events::{TransferCompleted, TransferEvents};
use shared::models::{StockMoveRequest, TransferSelection};
use shared::queue::{BatchOutcome, TransferItem, TransferQueue};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::validate_selection;

/// Boundary to the atomic stock-move primitive
///
/// The implementation must atomically move `quantity` units of one product
/// between two branches, or fail with no partial effect. The executor only
/// invokes it and interprets success/failure.
#[async_trait]
pub trait StockMover: Send + Sync {
    async fn move_stock(&self, request: &StockMoveRequest) -> AppResult<()>;
}

/// Production mover backed by the `move_branch_stock` Postgres function
///
/// The function locks the source ledger row, re-checks availability at call
/// time, applies both sides of the move in one transaction, and records the
/// transfer in the audit table. A stale client snapshot therefore fails
/// here with `INSUFFICIENT_STOCK` rather than corrupting the ledger.
#[derive(Clone)]
pub struct PgStockMover {
    db: PgPool,
}

impl PgStockMover {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockMover for PgStockMover {
    async fn move_stock(&self, request: &StockMoveRequest) -> AppResult<()> {
        sqlx::query("SELECT move_branch_stock($1, $2, $3, $4, $5, $6)")
            .bind(request.product_id)
            .bind(request.from_branch_id)
            .bind(request.to_branch_id)
            .bind(request.store_id)
            .bind(request.quantity)
            .bind(&request.notes)
            .execute(&self.db)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) => {
                    move_rejection(db_err.message(), request.product_id)
                }
                _ => AppError::DatabaseError(e),
            })?;

        Ok(())
    }
}

/// Translate a rejection raised by `move_branch_stock` into an [`AppError`]
///
/// The function raises tagged messages (`INSUFFICIENT_STOCK: ...`,
/// `SAME_BRANCH: ...`, `NO_SOURCE_RECORD: ...`); anything it rejects is a
/// failed transfer, not an infrastructure error.
fn move_rejection(message: &str, product_id: Uuid) -> AppError {
    if message.contains("INSUFFICIENT_STOCK") {
        AppError::InsufficientStock(format!(
            "Not enough available stock at the source branch for product {}",
            product_id
        ))
    } else {
        AppError::TransferFailed(message.to_string())
    }
}

/// Executes quick and batch transfers against a [`StockMover`]
pub struct TransferExecutor<M> {
    mover: M,
    events: TransferEvents,
}

impl<M: StockMover> TransferExecutor<M> {
    pub fn new(mover: M, events: TransferEvents) -> Self {
        Self { mover, events }
    }

    /// Execute a single transfer immediately, bypassing the queue
    ///
    /// On success a completion is broadcast so dependent views re-fetch
    /// inventory. On failure nothing is mutated and the error is returned
    /// for the confirmation dialog to surface.
    pub async fn quick_transfer(
        &self,
        item: &TransferItem,
        notes: Option<String>,
    ) -> AppResult<()> {
        self.preflight(item)?;
        self.mover.move_stock(&item.move_request(notes)).await?;

        self.events.publish(TransferCompleted::new(
            item.source_inventory.store_id,
            1,
        ));
        Ok(())
    }

    /// Execute the whole queue in order, stopping at the first failure
    ///
    /// Items already committed stay committed; items not yet reached are
    /// never attempted. The queue is cleared only when every item succeeds,
    /// otherwise the committed prefix is dropped and the rest stays queued
    /// for retry.
    pub async fn execute_batch(
        &self,
        queue: &mut TransferQueue,
        notes: Option<String>,
    ) -> BatchOutcome {
        let items = queue.items().to_vec();
        let mut succeeded = Vec::new();
        let mut error = None;

        for item in items {
            let result = match self.preflight(&item) {
                Ok(()) => self.mover.move_stock(&item.move_request(notes.clone())).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => succeeded.push(item),
                Err(e) => {
                    tracing::warn!(
                        product_id = %item.product.id,
                        from = %item.source_inventory.branch_id,
                        to = %item.target_branch_id,
                        "batch transfer stopped: {e}"
                    );
                    error = Some(e.to_string());
                    break;
                }
            }
        }

        if error.is_none() {
            if let Some(first) = succeeded.first() {
                self.events.publish(TransferCompleted::new(
                    first.source_inventory.store_id,
                    succeeded.len(),
                ));
            }
            queue.clear();
        } else {
            queue.drop_first(succeeded.len());
        }

        BatchOutcome {
            succeeded,
            remaining: queue.items().to_vec(),
            error,
        }
    }

    /// Local validation; never reaches the external call when it fails
    fn preflight(&self, item: &TransferItem) -> AppResult<()> {
        let selection = TransferSelection {
            product: item.product.clone(),
            source_inventory: item.source_inventory.clone(),
            target_branch_id: item.target_branch_id,
            quantity: item.quantity,
        };
        validate_selection(&selection)?;
        Ok(())
    }
}

/// A committed transfer, as recorded by the move primitive
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockTransferRecord {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub from_branch_id: Uuid,
    pub to_branch_id: Uuid,
    pub quantity: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Read side of the transfer audit trail
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
}

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List committed transfers for a store, most recent first, paginated
    pub async fn list_transfers(
        &self,
        store_id: Uuid,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<StockTransferRecord>> {
        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_transfers WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_one(&self.db)
        .await?;

        let transfers = sqlx::query_as::<_, StockTransferRecord>(
            r#"
            SELECT id, store_id, product_id, from_branch_id, to_branch_id,
                   quantity, notes, created_at
            FROM stock_transfers
            WHERE store_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(store_id)
        .bind(i64::from(pagination.limit()))
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: transfers,
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }
}
