//! WebAssembly module for the Store Operations Platform
//!
//! Provides client-side computation for:
//! - Transfer quantity clamping
//! - Drop target validation during drag-and-drop
//! - Pending-queue merging
//! - Branch stock filtering and search

use uuid::Uuid;
use wasm_bindgen::prelude::*;

use shared::drag::{DragPayload, DragSession, DropOutcome};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::queue::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_uuid(value: &str, label: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(value).map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", label, e)))
}

/// Clamp a requested transfer quantity into [1, available]
#[wasm_bindgen]
pub fn clamp_quantity(requested: i32, available: i32) -> i32 {
    clamp_transfer_quantity(i64::from(requested), i64::from(available)) as i32
}

/// Whether a drop from one branch onto another is a valid transfer target
#[wasm_bindgen]
pub fn is_valid_drop_target(source_branch_id: &str, target_branch_id: &str) -> Result<bool, JsValue> {
    let source = parse_uuid(source_branch_id, "source branch id")?;
    let target = parse_uuid(target_branch_id, "target branch id")?;
    Ok(can_transfer(source, target))
}

/// Validate a transfer selection before it reaches the queue
///
/// Returns the localizable error code, or null when the selection is valid.
#[wasm_bindgen]
pub fn validate_transfer_selection(selection_json: &str) -> Result<Option<String>, JsValue> {
    let selection: TransferSelection = serde_json::from_str(selection_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection JSON: {}", e)))?;

    Ok(match validate_selection(&selection) {
        Ok(()) => None,
        Err(TransferValidationError::SameBranch) => Some("SAME_BRANCH".to_string()),
        Err(TransferValidationError::QuantityOutOfRange { .. }) => {
            Some("QUANTITY_OUT_OF_RANGE".to_string())
        }
    })
}

/// Add a selection to a serialized queue, merging duplicates
///
/// Returns the updated queue as JSON.
#[wasm_bindgen]
pub fn queue_add_selection(queue_json: &str, selection_json: &str) -> Result<String, JsValue> {
    let mut queue: TransferQueue = serde_json::from_str(queue_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid queue JSON: {}", e)))?;
    let selection: TransferSelection = serde_json::from_str(selection_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection JSON: {}", e)))?;

    queue.add(TransferItem::from_selection(selection));
    serde_json::to_string(&queue).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether a product matches a search query (English name, Arabic name, SKU)
#[wasm_bindgen]
pub fn product_matches_search(product_json: &str, query: &str) -> Result<bool, JsValue> {
    let product: Product = serde_json::from_str(product_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid product JSON: {}", e)))?;
    Ok(product_matches(&product, query))
}

/// Display name of a product for a language code ("en" or "ar")
///
/// Falls back to English when no Arabic name is configured.
#[wasm_bindgen]
pub fn product_display_name(product_json: &str, language: &str) -> Result<String, JsValue> {
    let product: Product = serde_json::from_str(product_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid product JSON: {}", e)))?;
    let language = match language {
        "ar" => Language::Arabic,
        _ => Language::English,
    };
    Ok(product.name_localized.resolve(&language).to_string())
}

/// Project the transferable stock of one branch from a serialized feed
#[wasm_bindgen]
pub fn filter_branch_stock(
    feed_json: &str,
    catalog_json: &str,
    branch_id: &str,
    search: Option<String>,
) -> Result<String, JsValue> {
    let feed: Vec<InventoryRecord> = serde_json::from_str(feed_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid feed JSON: {}", e)))?;
    let catalog: Vec<Product> = serde_json::from_str(catalog_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid catalog JSON: {}", e)))?;
    let branch = parse_uuid(branch_id, "branch id")?;

    let stock = shared::snapshot::branch_stock(&feed, &catalog, branch, search.as_deref());
    serde_json::to_string(&stock).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Stateful drag-and-drop controller for the transfer board
///
/// Wraps one drag session; the frontend forwards raw pointer events and
/// reads back the resulting selection on release.
#[wasm_bindgen]
pub struct DragController {
    session: DragSession,
}

#[wasm_bindgen]
impl DragController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DragController {
        DragController {
            session: DragSession::new(),
        }
    }

    /// Pointer down on a product chip; payload is a serialized DragPayload
    pub fn press(&mut self, x: f64, y: f64, payload_json: &str) -> Result<(), JsValue> {
        let payload: DragPayload = serde_json::from_str(payload_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid payload JSON: {}", e)))?;
        self.session.press((x, y), payload);
        Ok(())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.pointer_move((x, y));
    }

    pub fn enter_branch(&mut self, branch_id: &str) -> Result<(), JsValue> {
        let branch = parse_uuid(branch_id, "branch id")?;
        self.session.enter_branch(branch);
        Ok(())
    }

    pub fn leave_branch(&mut self) {
        self.session.leave_branch();
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Pointer released; returns the selection as JSON, or null on cancel
    pub fn release(&mut self) -> Result<Option<String>, JsValue> {
        match self.session.release() {
            DropOutcome::Dropped(selection) => serde_json::to_string(&selection)
                .map(Some)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            DropOutcome::Cancelled => Ok(None),
        }
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(8, 5), 5);
        assert_eq!(clamp_quantity(0, 5), 1);
        assert_eq!(clamp_quantity(3, 5), 3);
    }

    #[test]
    fn test_product_display_name_resolves_language() {
        let product = Product {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            name_localized: LocalizedText::new("Espresso Cup").with_ar("فنجان إسبريسو"),
            sku: None,
            image_url: None,
            price: None,
        };
        let json = serde_json::to_string(&product).unwrap();

        assert_eq!(product_display_name(&json, "en").unwrap(), "Espresso Cup");
        assert_eq!(product_display_name(&json, "ar").unwrap(), "فنجان إسبريسو");
        // unknown codes fall back to English
        assert_eq!(product_display_name(&json, "fr").unwrap(), "Espresso Cup");
    }

    #[test]
    fn test_is_valid_drop_target() {
        let a = Uuid::new_v4().to_string();
        let b = Uuid::new_v4().to_string();
        assert!(is_valid_drop_target(&a, &b).unwrap());
        assert!(!is_valid_drop_target(&a, &a).unwrap());
        assert!(is_valid_drop_target("not-a-uuid", &b).is_err());
    }

    #[test]
    fn test_queue_add_selection_merges() {
        let product_id = Uuid::new_v4();
        let source_id = Uuid::new_v4();
        let selection = serde_json::json!({
            "product": {
                "id": product_id,
                "store_id": Uuid::new_v4(),
                "name_localized": { "en": "Espresso Cup", "ar": null },
                "sku": null,
                "image_url": null,
                "price": null
            },
            "source_inventory": {
                "id": source_id,
                "product_id": product_id,
                "branch_id": Uuid::new_v4(),
                "store_id": Uuid::new_v4(),
                "quantity": 5,
                "reserved_quantity": 0,
                "available_quantity": 5
            },
            "target_branch_id": Uuid::new_v4(),
            "quantity": 3
        })
        .to_string();

        let queue = serde_json::to_string(&TransferQueue::new()).unwrap();
        let queue = queue_add_selection(&queue, &selection).unwrap();
        let queue = queue_add_selection(&queue, &selection).unwrap();

        let parsed: TransferQueue = serde_json::from_str(&queue).unwrap();
        assert_eq!(parsed.len(), 1);
        // clamp(3 + 3, 5) = 5
        assert_eq!(parsed.items()[0].quantity, 5);
    }

    #[test]
    fn test_drag_controller_drop_produces_selection() {
        let source_branch = Uuid::new_v4();
        let target_branch = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let payload = serde_json::json!({
            "product": {
                "id": product_id,
                "store_id": Uuid::new_v4(),
                "name_localized": { "en": "Espresso Cup", "ar": null },
                "sku": null,
                "image_url": null,
                "price": null
            },
            "source_inventory": {
                "id": Uuid::new_v4(),
                "product_id": product_id,
                "branch_id": source_branch,
                "store_id": Uuid::new_v4(),
                "quantity": 5,
                "reserved_quantity": 0,
                "available_quantity": 5
            }
        })
        .to_string();

        let mut controller = DragController::new();
        controller.press(0.0, 0.0, &payload).unwrap();
        controller.pointer_move(20.0, 0.0);
        assert!(controller.is_active());

        // dropping on the source branch cancels
        controller.enter_branch(&source_branch.to_string()).unwrap();
        assert!(controller.release().unwrap().is_none());

        controller.press(0.0, 0.0, &payload).unwrap();
        controller.pointer_move(20.0, 0.0);
        controller.enter_branch(&target_branch.to_string()).unwrap();
        let dropped = controller.release().unwrap().expect("selection expected");

        let selection: TransferSelection = serde_json::from_str(&dropped).unwrap();
        assert_eq!(selection.target_branch_id, target_branch);
        assert_eq!(selection.quantity, 1);
    }
}
