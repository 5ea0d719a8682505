//! Inventory service for per-branch stock views
//!
//! Reads the inventory ledger and projects it through the shared snapshot
//! logic. This service never mutates stock; movement goes exclusively
//! through the transfer executor.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{InventoryRecord, Product};
use shared::snapshot::{branch_stock, BranchStockEntry};
use shared::types::LocalizedText;

/// Inventory service over the branch-stock ledger
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Row for inventory ledger queries
#[derive(Debug, FromRow)]
struct InventoryRow {
    id: Uuid,
    product_id: Uuid,
    branch_id: Uuid,
    store_id: Uuid,
    quantity: i64,
    reserved_quantity: i64,
    available_quantity: i64,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        InventoryRecord {
            id: row.id,
            product_id: row.product_id,
            branch_id: row.branch_id,
            store_id: row.store_id,
            quantity: row.quantity,
            reserved_quantity: row.reserved_quantity,
            available_quantity: row.available_quantity,
        }
    }
}

/// Row for product joins within this service
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    name_en: String,
    name_ar: Option<String>,
    sku: Option<String>,
    image_url: Option<String>,
    price: Option<Decimal>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            store_id: row.store_id,
            name_localized: LocalizedText {
                en: row.name_en,
                ar: row.name_ar,
            },
            sku: row.sku,
            image_url: row.image_url,
            price: row.price,
        }
    }
}

/// Per-branch inventory totals
#[derive(Debug, Clone, Serialize)]
pub struct BranchInventorySummary {
    pub branch_id: Uuid,
    pub branch_name: String,
    pub product_count: i64,
    pub total_available: i64,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Full inventory feed for a store, in ledger order
    pub async fn inventory_feed(&self, store_id: Uuid) -> AppResult<Vec<InventoryRecord>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, product_id, branch_id, store_id,
                   quantity, reserved_quantity, available_quantity
            FROM branch_inventory
            WHERE store_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(InventoryRecord::from).collect())
    }

    /// Find the ledger row for one product at one branch
    pub async fn find_record(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        branch_id: Uuid,
    ) -> AppResult<InventoryRecord> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, product_id, branch_id, store_id,
                   quantity, reserved_quantity, available_quantity
            FROM branch_inventory
            WHERE store_id = $1 AND product_id = $2 AND branch_id = $3
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(branch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory record".to_string()))?;

        Ok(row.into())
    }

    /// Transferable stock of one branch, joined with products
    ///
    /// Only records with positive availability are returned; ordering
    /// follows the ledger.
    pub async fn branch_stock(
        &self,
        store_id: Uuid,
        branch_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<BranchStockEntry>> {
        // Validate branch belongs to store
        let branch_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM branches WHERE id = $1 AND store_id = $2)",
        )
        .bind(branch_id)
        .bind(store_id)
        .fetch_one(&self.db)
        .await?;

        if !branch_exists {
            return Err(AppError::NotFound("Branch".to_string()));
        }

        let feed = self.inventory_feed(store_id).await?;

        let product_rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, store_id, name_en, name_ar, sku, image_url, price
            FROM products
            WHERE store_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;
        let catalog: Vec<Product> = product_rows.into_iter().map(Product::from).collect();

        Ok(branch_stock(&feed, &catalog, branch_id, search))
    }

    /// Inventory totals grouped by branch
    pub async fn summary_by_branch(&self, store_id: Uuid) -> AppResult<Vec<BranchInventorySummary>> {
        let rows = sqlx::query_as::<_, (Uuid, String, i64, i64)>(
            r#"
            SELECT b.id, b.name,
                   COUNT(bi.id) FILTER (WHERE bi.available_quantity > 0) AS product_count,
                   COALESCE(SUM(bi.available_quantity), 0) AS total_available
            FROM branches b
            LEFT JOIN branch_inventory bi ON bi.branch_id = b.id
            WHERE b.store_id = $1
            GROUP BY b.id, b.name
            ORDER BY b.is_main_branch DESC, b.created_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(branch_id, branch_name, product_count, total_available)| {
                BranchInventorySummary {
                    branch_id,
                    branch_name,
                    product_count,
                    total_available,
                }
            })
            .collect())
    }
}
