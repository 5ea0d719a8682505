//! Validation utilities for the Store Operations Platform
//!
//! Every quantity-entry point of the transfer subsystem goes through these
//! functions; no other path may bypass them.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Product, TransferSelection};

/// Why a transfer selection was rejected before reaching the ledger
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferValidationError {
    #[error("quantity {requested} is outside [1, {available}]")]
    QuantityOutOfRange { requested: i64, available: i64 },

    #[error("a branch cannot transfer stock to itself")]
    SameBranch,
}

// ============================================================================
// Quantity Validation
// ============================================================================

/// Clamp a requested transfer quantity into `[1, available]`
///
/// `available` must be at least 1; zero-stock records are never transfer
/// candidates, so callers always hold a record with positive availability.
pub fn clamp_transfer_quantity(requested: i64, available: i64) -> i64 {
    requested.max(1).min(available)
}

/// Whether stock may move between two branches
///
/// False iff the two ids are equal; this is the only structural rejection
/// rule.
pub fn can_transfer(source_branch_id: Uuid, target_branch_id: Uuid) -> bool {
    source_branch_id != target_branch_id
}

/// Validate a confirmed selection before it is queued or executed
pub fn validate_selection(selection: &TransferSelection) -> Result<(), TransferValidationError> {
    if !can_transfer(
        selection.source_inventory.branch_id,
        selection.target_branch_id,
    ) {
        return Err(TransferValidationError::SameBranch);
    }

    let available = selection.source_inventory.available_quantity;
    if selection.quantity < 1 || selection.quantity > available {
        return Err(TransferValidationError::QuantityOutOfRange {
            requested: selection.quantity,
            available,
        });
    }

    Ok(())
}

// ============================================================================
// Search Matching
// ============================================================================

/// Case-insensitive match of a product against a search string
///
/// Matches the English name, the Arabic name, or the SKU. An empty or
/// whitespace-only query matches everything.
pub fn product_matches(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    if product.name_localized.en.to_lowercase().contains(&query) {
        return true;
    }
    if let Some(ar) = &product.name_localized.ar {
        if ar.to_lowercase().contains(&query) {
            return true;
        }
    }
    if let Some(sku) = &product.sku {
        if sku.to_lowercase().contains(&query) {
            return true;
        }
    }

    false
}
