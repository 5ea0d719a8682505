//! Route definitions for the Store Operations Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - branch inventory and transfers
        .nest("/inventory", inventory_routes(state))
}

/// Inventory and transfer routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/branches", get(handlers::list_branches))
        .route("/products", get(handlers::list_products))
        // Per-branch stock
        .route("/branches/:branch_id/stock", get(handlers::get_branch_stock))
        .route("/summary", get(handlers::get_inventory_summary))
        // Transfers
        .route("/transfers", get(handlers::list_transfers))
        .route("/transfers/quick", post(handlers::quick_transfer))
        .route("/transfers/batch", post(handlers::batch_transfer))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
