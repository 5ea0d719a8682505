//! The pending-transfer queue
//!
//! An ordered collection of transfers awaiting batch execution, unique by
//! `(product_id, source_inventory_id)`. Adding a duplicate merges
//! quantities instead of appending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{InventoryRecord, Product, StockMoveRequest, TransferSelection};
use crate::validation::clamp_transfer_quantity;

/// A pending request to move stock of one product between two branches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferItem {
    pub product: Product,
    /// Ledger row of the source branch, as captured at add time
    pub source_inventory: InventoryRecord,
    pub target_branch_id: Uuid,
    pub quantity: i64,
}

impl TransferItem {
    pub fn from_selection(selection: TransferSelection) -> Self {
        Self {
            product: selection.product,
            source_inventory: selection.source_inventory,
            target_branch_id: selection.target_branch_id,
            quantity: selection.quantity,
        }
    }

    /// Build the request handed to the atomic stock-move primitive
    pub fn move_request(&self, notes: Option<String>) -> StockMoveRequest {
        StockMoveRequest {
            product_id: self.product.id,
            from_branch_id: self.source_inventory.branch_id,
            to_branch_id: self.target_branch_id,
            store_id: self.source_inventory.store_id,
            quantity: self.quantity,
            notes,
        }
    }
}

/// Ordered, de-duplicated collection of pending transfers
///
/// Created empty per transfer session; grows via [`add`](Self::add),
/// shrinks via per-item removal or full execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransferQueue {
    items: Vec<TransferItem>,
}

impl TransferQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }

    /// Add an item, merging with any existing entry for the same
    /// `(product_id, source_inventory_id)` pair
    ///
    /// Quantities are clamped against the availability captured in the
    /// stored ledger row, so no entry ever exceeds its add-time stock.
    /// A merge with a different target branch keeps the newer target.
    /// Items whose ledger row has no available stock are ignored; every
    /// stored entry keeps `1 <= quantity <= available`.
    pub fn add(&mut self, item: TransferItem) {
        if item.source_inventory.available_quantity < 1 {
            return;
        }

        let key = (item.product.id, item.source_inventory.id);
        match self
            .items
            .iter_mut()
            .find(|existing| (existing.product.id, existing.source_inventory.id) == key)
        {
            Some(existing) => {
                existing.quantity = clamp_transfer_quantity(
                    existing.quantity + item.quantity,
                    existing.source_inventory.available_quantity,
                );
                existing.target_branch_id = item.target_branch_id;
            }
            None => {
                let available = item.source_inventory.available_quantity;
                self.items.push(TransferItem {
                    quantity: clamp_transfer_quantity(item.quantity, available),
                    ..item
                });
            }
        }
    }

    /// Remove the entry at `index`, preserving the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<TransferItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop the first `count` entries; used after a partially completed run
    pub fn drop_first(&mut self, count: usize) {
        let count = count.min(self.items.len());
        self.items.drain(..count);
    }

    /// Empty the queue; called only after a fully successful execution
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Result of one batch run, partitioned by what was actually attempted
///
/// `succeeded` holds the committed prefix in execution order; `remaining`
/// holds everything still pending, with the failed item first when the run
/// stopped early.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchOutcome {
    pub succeeded: Vec<TransferItem>,
    pub remaining: Vec<TransferItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;

    fn product(id: Uuid) -> Product {
        Product {
            id,
            store_id: Uuid::new_v4(),
            name_localized: LocalizedText::new("Item"),
            sku: None,
            image_url: None,
            price: None,
        }
    }

    fn record(id: Uuid, product_id: Uuid, available: i64) -> InventoryRecord {
        InventoryRecord {
            id,
            product_id,
            branch_id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            quantity: available,
            reserved_quantity: 0,
            available_quantity: available,
        }
    }

    fn item(product_id: Uuid, source_id: Uuid, available: i64, quantity: i64) -> TransferItem {
        TransferItem {
            product: product(product_id),
            source_inventory: record(source_id, product_id, available),
            target_branch_id: Uuid::new_v4(),
            quantity,
        }
    }

    #[test]
    fn test_add_clamps_to_available() {
        let mut queue = TransferQueue::new();
        queue.add(item(Uuid::new_v4(), Uuid::new_v4(), 5, 8));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_ignores_zero_availability() {
        let mut queue = TransferQueue::new();
        queue.add(item(Uuid::new_v4(), Uuid::new_v4(), 0, 3));
        queue.add(item(Uuid::new_v4(), Uuid::new_v4(), -2, 3));

        assert!(queue.is_empty());
    }

    #[test]
    fn test_add_merges_duplicate_pair() {
        let product_id = Uuid::new_v4();
        let source_id = Uuid::new_v4();

        let mut queue = TransferQueue::new();
        queue.add(item(product_id, source_id, 5, 3));
        queue.add(item(product_id, source_id, 5, 4));

        // clamp(3 + 4, 5) = 5
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_keeps_distinct_pairs_separate() {
        let product_id = Uuid::new_v4();

        let mut queue = TransferQueue::new();
        queue.add(item(product_id, Uuid::new_v4(), 5, 2));
        queue.add(item(product_id, Uuid::new_v4(), 5, 2));
        queue.add(item(Uuid::new_v4(), Uuid::new_v4(), 5, 2));

        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_merge_keeps_newer_target() {
        let product_id = Uuid::new_v4();
        let source_id = Uuid::new_v4();
        let newer_target = Uuid::new_v4();

        let mut queue = TransferQueue::new();
        queue.add(item(product_id, source_id, 10, 2));
        let mut second = item(product_id, source_id, 10, 2);
        second.target_branch_id = newer_target;
        queue.add(second);

        assert_eq!(queue.items()[0].target_branch_id, newer_target);
        assert_eq!(queue.items()[0].quantity, 4);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut queue = TransferQueue::new();
        let first = item(Uuid::new_v4(), Uuid::new_v4(), 5, 1);
        let second = item(Uuid::new_v4(), Uuid::new_v4(), 5, 2);
        let third = item(Uuid::new_v4(), Uuid::new_v4(), 5, 3);
        queue.add(first.clone());
        queue.add(second);
        queue.add(third.clone());

        let removed = queue.remove(1);
        assert_eq!(removed.map(|i| i.quantity), Some(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.items()[0].product.id, first.product.id);
        assert_eq!(queue.items()[1].product.id, third.product.id);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut queue = TransferQueue::new();
        queue.add(item(Uuid::new_v4(), Uuid::new_v4(), 5, 1));

        assert!(queue.remove(3).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drop_first_and_clear() {
        let mut queue = TransferQueue::new();
        for _ in 0..3 {
            queue.add(item(Uuid::new_v4(), Uuid::new_v4(), 5, 1));
        }

        queue.drop_first(2);
        assert_eq!(queue.len(), 1);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_quantity_bound_invariant_holds_after_any_add() {
        let product_id = Uuid::new_v4();
        let source_id = Uuid::new_v4();

        let mut queue = TransferQueue::new();
        for requested in [-3, 0, 2, 7, 100] {
            queue.add(item(product_id, source_id, 6, requested));
            let entry = &queue.items()[0];
            assert!(entry.quantity >= 1);
            assert!(entry.quantity <= entry.source_inventory.available_quantity);
        }
    }
}
