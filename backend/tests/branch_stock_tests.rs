//! Branch stock snapshot tests
//!
//! Tests for the per-branch stock projection including:
//! - Branch filtering and positive-availability filtering
//! - Silent dropping of ledger rows without a catalog product
//! - Search matching across localized names and SKU

use proptest::prelude::*;
use uuid::Uuid;

use shared::models::{InventoryRecord, Product};
use shared::snapshot::branch_stock;
use shared::types::LocalizedText;
use shared::validation::product_matches;

fn product_named(en: &str, ar: Option<&str>, sku: Option<&str>) -> Product {
    Product {
        id: Uuid::new_v4(),
        store_id: Uuid::new_v4(),
        name_localized: LocalizedText {
            en: en.to_string(),
            ar: ar.map(str::to_string),
        },
        sku: sku.map(str::to_string),
        image_url: None,
        price: None,
    }
}

fn record_for(product: &Product, branch_id: Uuid, available: i64) -> InventoryRecord {
    InventoryRecord {
        id: Uuid::new_v4(),
        product_id: product.id,
        branch_id,
        store_id: product.store_id,
        quantity: available,
        reserved_quantity: 0,
        available_quantity: available,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Only records of the requested branch appear
    #[test]
    fn test_filters_by_branch() {
        let branch = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p1 = product_named("Espresso Cup", None, None);
        let p2 = product_named("Serving Tray", None, None);
        let feed = vec![record_for(&p1, branch, 3), record_for(&p2, other, 3)];
        let catalog = vec![p1.clone(), p2];

        let stock = branch_stock(&feed, &catalog, branch, None);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].product.id, p1.id);
    }

    /// Zero-availability rows are hidden from the transfer view
    #[test]
    fn test_excludes_non_positive_availability() {
        let branch = Uuid::new_v4();
        let p1 = product_named("Espresso Cup", None, None);
        let p2 = product_named("Serving Tray", None, None);
        let feed = vec![record_for(&p1, branch, 0), record_for(&p2, branch, 1)];
        let catalog = vec![p1, p2.clone()];

        let stock = branch_stock(&feed, &catalog, branch, None);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].product.id, p2.id);
    }

    /// A ledger row whose product is missing from the catalog is dropped
    /// without failing the whole snapshot
    #[test]
    fn test_orphan_record_dropped_silently() {
        let branch = Uuid::new_v4();
        let known = product_named("Espresso Cup", None, None);
        let unknown = product_named("Ghost", None, None);
        let feed = vec![record_for(&unknown, branch, 4), record_for(&known, branch, 2)];
        let catalog = vec![known.clone()];

        let stock = branch_stock(&feed, &catalog, branch, None);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].product.id, known.id);
    }

    /// Search matches the English name, the Arabic name, and the SKU,
    /// case-insensitively
    #[test]
    fn test_search_matches_all_fields() {
        let p = product_named("Espresso Cup", Some("فنجان إسبريسو"), Some("CUP-001"));

        assert!(product_matches(&p, "espresso"));
        assert!(product_matches(&p, "فنجان"));
        assert!(product_matches(&p, "cup-001"));
        assert!(!product_matches(&p, "teapot"));
    }

    /// Snapshot ordering follows the feed
    #[test]
    fn test_preserves_feed_order() {
        let branch = Uuid::new_v4();
        let products: Vec<Product> = (0..5)
            .map(|i| product_named(&format!("Item {i}"), None, None))
            .collect();
        let feed: Vec<InventoryRecord> = products
            .iter()
            .map(|p| record_for(p, branch, 1))
            .collect();

        let stock = branch_stock(&feed, &products, branch, None);
        let order: Vec<Uuid> = stock.iter().map(|e| e.product.id).collect();
        let expected: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        assert_eq!(order, expected);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for availability, including zero and negative reservations
    fn availability_strategy() -> impl Strategy<Value = i64> {
        -5i64..=20
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every returned entry belongs to the requested branch and has
        /// positive availability
        #[test]
        fn prop_snapshot_entries_well_formed(
            availabilities in prop::collection::vec(availability_strategy(), 0..20),
            branch_mask in prop::collection::vec(any::<bool>(), 0..20)
        ) {
            let branch = Uuid::new_v4();
            let other = Uuid::new_v4();

            let mut catalog = Vec::new();
            let mut feed = Vec::new();
            for (i, available) in availabilities.iter().enumerate() {
                let p = product_named(&format!("Item {i}"), None, None);
                let target = if branch_mask.get(i).copied().unwrap_or(true) {
                    branch
                } else {
                    other
                };
                feed.push(record_for(&p, target, *available));
                catalog.push(p);
            }

            let stock = branch_stock(&feed, &catalog, branch, None);
            for entry in &stock {
                prop_assert_eq!(entry.record.branch_id, branch);
                prop_assert!(entry.record.available_quantity > 0);
            }
        }

        /// Searching never invents entries: the filtered snapshot is a
        /// subsequence of the unfiltered one
        #[test]
        fn prop_search_is_a_subsequence(
            count in 0usize..15
        ) {
            let branch = Uuid::new_v4();
            let names = ["Cup", "Tray", "Teapot", "Grinder"];

            let mut catalog = Vec::new();
            let mut feed = Vec::new();
            for i in 0..count {
                let p = product_named(names[i % names.len()], None, None);
                feed.push(record_for(&p, branch, 3));
                catalog.push(p);
            }

            let all = branch_stock(&feed, &catalog, branch, None);
            let filtered = branch_stock(&feed, &catalog, branch, Some("cup"));

            let mut cursor = all.iter();
            for entry in &filtered {
                prop_assert!(
                    cursor.any(|e| e.product.id == entry.product.id),
                    "filtered snapshot reordered or invented an entry"
                );
            }
        }
    }
}
