//! Inventory ledger models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the per-branch inventory ledger
///
/// Owned by the external ledger; the transfer core only ever reads a
/// snapshot of it. Mutation happens exclusively through the atomic
/// stock-move primitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub branch_id: Uuid,
    pub store_id: Uuid,
    /// Total units on hand
    pub quantity: i64,
    /// Units committed to unfulfilled orders
    pub reserved_quantity: i64,
    /// `quantity - reserved_quantity`; the only quantity ever transferable
    pub available_quantity: i64,
}
