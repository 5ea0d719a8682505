//! HTTP handlers for branch and product catalog endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::CatalogService;
use crate::AppState;
use shared::models::{Branch, Product};

/// Query parameters for product listing
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
}

/// List all branches of the current store
pub async fn list_branches(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Branch>>> {
    let service = CatalogService::new(state.db);
    let branches = service.list_branches(current_user.0.store_id).await?;
    Ok(Json(branches))
}

/// List the store's products, optionally filtered by search string
pub async fn list_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db);
    let products = service
        .list_products(current_user.0.store_id, query.search.as_deref())
        .await?;
    Ok(Json(products))
}
