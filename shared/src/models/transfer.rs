//! Transfer request models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InventoryRecord, Product};

/// Scratch state behind the transfer confirmation dialog
///
/// Produced by a successful drop or a quick-transfer click; never
/// persisted. Confirming it either executes immediately or appends a
/// [`TransferItem`](crate::queue::TransferItem) to the queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferSelection {
    pub product: Product,
    pub source_inventory: InventoryRecord,
    pub target_branch_id: Uuid,
    pub quantity: i64,
}

/// Request shape of the external atomic stock-move primitive
///
/// The primitive must atomically decrement the source branch's available
/// quantity and increment the target branch's by exactly `quantity`, or
/// fail with no partial effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMoveRequest {
    pub product_id: Uuid,
    pub from_branch_id: Uuid,
    pub to_branch_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
