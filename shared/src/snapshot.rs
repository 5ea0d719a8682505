//! Read-only, per-branch view of transferable stock
//!
//! A pure projection over the full inventory feed and the product catalog.
//! Recomputed whenever any of its inputs change; never mutates anything.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{InventoryRecord, Product};
use crate::validation::product_matches;

/// One transferable line of a branch's inventory, joined with its product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchStockEntry {
    pub record: InventoryRecord,
    pub product: Product,
}

/// Project the inventory feed down to one branch's transferable stock
///
/// Keeps only records of the given branch with `available_quantity > 0`
/// whose product matches the search string. Rows whose product is missing
/// from the catalog are dropped silently. Relative ordering of the feed is
/// preserved.
pub fn branch_stock(
    feed: &[InventoryRecord],
    catalog: &[Product],
    branch_id: Uuid,
    search: Option<&str>,
) -> Vec<BranchStockEntry> {
    feed.iter()
        .filter(|record| record.branch_id == branch_id && record.available_quantity > 0)
        .filter_map(|record| {
            let product = catalog.iter().find(|p| p.id == record.product_id)?;
            let matches = match search {
                Some(query) => product_matches(product, query),
                None => true,
            };
            matches.then(|| BranchStockEntry {
                record: record.clone(),
                product: product.clone(),
            })
        })
        .collect()
}
