//! Catalog service for store-scoped branch and product listings

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Branch, Product};
use shared::types::LocalizedText;
use shared::validation::product_matches;

/// Catalog service exposing the branch and product collections
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Row for branch queries
#[derive(Debug, FromRow)]
struct BranchRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    name_localized: Option<String>,
    code: Option<String>,
    is_main_branch: bool,
}

impl From<BranchRow> for Branch {
    fn from(row: BranchRow) -> Self {
        Branch {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            name_localized: row.name_localized,
            code: row.code,
            is_main_branch: row.is_main_branch,
        }
    }
}

/// Row for product queries
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

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all branches of a store, main branch first
    pub async fn list_branches(&self, store_id: Uuid) -> AppResult<Vec<Branch>> {
        let rows = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, store_id, name, name_localized, code, is_main_branch
            FROM branches
            WHERE store_id = $1
            ORDER BY is_main_branch DESC, created_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Branch::from).collect())
    }

    /// List a store's products, optionally filtered by a search string
    ///
    /// Matching uses the same predicate as the branch-stock snapshot, so
    /// catalog search and transfer search behave identically.
    pub async fn list_products(
        &self,
        store_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
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

        let products = rows.into_iter().map(Product::from);
        Ok(match search {
            Some(query) => products.filter(|p| product_matches(p, query)).collect(),
            None => products.collect(),
        })
    }

    /// Fetch a single product by id, scoped to the store
    pub async fn find_product(&self, store_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, store_id, name_en, name_ar, sku, image_url, price
            FROM products
            WHERE id = $1 AND store_id = $2
            "#,
        )
        .bind(product_id)
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }
}
