//! Drag-and-drop transfer session
//!
//! A transient state machine tracking a single pointer-driven drag of one
//! product chip toward a candidate branch. At most one session is active at
//! a time; pointer capture is exclusive. Cancellation is always safe: no
//! queue mutation happens until the confirmation step is confirmed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{InventoryRecord, Product, TransferSelection};
use crate::validation::can_transfer;

/// Pointer must travel this far from the press origin before a drag starts
pub const DRAG_ACTIVATION_DISTANCE: f64 = 8.0;

/// What a drag carries: the chip's product and its source ledger row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DragPayload {
    pub product: Product,
    pub source_inventory: InventoryRecord,
}

/// Session states, one variant per legal combination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on a chip but has not crossed the activation distance
    Pressed {
        origin: (f64, f64),
        payload: DragPayload,
    },
    /// Drag is active, no droppable branch under the pointer
    Dragging { payload: DragPayload },
    /// Drag is active over a droppable branch region
    OverBranch {
        payload: DragPayload,
        target_branch_id: Uuid,
    },
}

/// Terminal result of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Release over a valid target: opens the confirmation step, quantity 1
    Dropped(TransferSelection),
    /// Release anywhere else, or over the source branch; no side effect
    Cancelled,
}

/// The drag session state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drag has been activated (pointer crossed the threshold)
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            DragState::Dragging { .. } | DragState::OverBranch { .. }
        )
    }

    /// Pointer down on a product chip
    ///
    /// Ignored unless the session is idle; pointer capture is exclusive, so
    /// a second press cannot start a drag while one is in flight.
    pub fn press(&mut self, origin: (f64, f64), payload: DragPayload) {
        if matches!(self.state, DragState::Idle) {
            self.state = DragState::Pressed { origin, payload };
        }
    }

    /// Pointer moved; activates the drag once past the threshold
    pub fn pointer_move(&mut self, position: (f64, f64)) {
        if let DragState::Pressed { origin, payload } = &self.state {
            let dx = position.0 - origin.0;
            let dy = position.1 - origin.1;
            if (dx * dx + dy * dy).sqrt() > DRAG_ACTIVATION_DISTANCE {
                self.state = DragState::Dragging {
                    payload: payload.clone(),
                };
            }
        }
    }

    /// Pointer entered a droppable branch region
    pub fn enter_branch(&mut self, branch_id: Uuid) {
        match &self.state {
            DragState::Dragging { payload } | DragState::OverBranch { payload, .. } => {
                self.state = DragState::OverBranch {
                    payload: payload.clone(),
                    target_branch_id: branch_id,
                };
            }
            _ => {}
        }
    }

    /// Pointer left the branch region it was hovering
    pub fn leave_branch(&mut self) {
        if let DragState::OverBranch { payload, .. } = &self.state {
            self.state = DragState::Dragging {
                payload: payload.clone(),
            };
        }
    }

    /// Pointer released; the session always returns to idle
    ///
    /// Produces a selection only when released over a branch that differs
    /// from the source branch. A drop onto the source branch, or with no
    /// branch under the pointer, cancels with no side effect.
    pub fn release(&mut self) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::OverBranch {
                payload,
                target_branch_id,
            } if can_transfer(payload.source_inventory.branch_id, target_branch_id) => {
                DropOutcome::Dropped(TransferSelection {
                    product: payload.product,
                    source_inventory: payload.source_inventory,
                    target_branch_id,
                    quantity: 1,
                })
            }
            _ => DropOutcome::Cancelled,
        }
    }

    /// Abort the session; always side-effect-free
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;

    fn payload(source_branch: Uuid) -> DragPayload {
        let product_id = Uuid::new_v4();
        DragPayload {
            product: Product {
                id: product_id,
                store_id: Uuid::new_v4(),
                name_localized: LocalizedText::new("Item"),
                sku: None,
                image_url: None,
                price: None,
            },
            source_inventory: InventoryRecord {
                id: Uuid::new_v4(),
                product_id,
                branch_id: source_branch,
                store_id: Uuid::new_v4(),
                quantity: 5,
                reserved_quantity: 0,
                available_quantity: 5,
            },
        }
    }

    fn dragging_session(source_branch: Uuid) -> DragSession {
        let mut session = DragSession::new();
        session.press((0.0, 0.0), payload(source_branch));
        session.pointer_move((10.0, 0.0));
        assert!(session.is_active());
        session
    }

    #[test]
    fn test_activation_requires_threshold_distance() {
        let mut session = DragSession::new();
        session.press((0.0, 0.0), payload(Uuid::new_v4()));

        session.pointer_move((5.0, 5.0)); // ~7.07 units, below threshold
        assert!(!session.is_active());

        session.pointer_move((6.0, 6.0)); // ~8.49 units
        assert!(session.is_active());
    }

    #[test]
    fn test_release_before_activation_cancels() {
        let mut session = DragSession::new();
        session.press((0.0, 0.0), payload(Uuid::new_v4()));

        assert_eq!(session.release(), DropOutcome::Cancelled);
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_on_other_branch_produces_selection() {
        let source = Uuid::new_v4();
        let target = Uuid::new_v4();
        let mut session = dragging_session(source);

        session.enter_branch(target);
        match session.release() {
            DropOutcome::Dropped(selection) => {
                assert_eq!(selection.target_branch_id, target);
                assert_eq!(selection.quantity, 1);
                assert_eq!(selection.source_inventory.branch_id, source);
            }
            DropOutcome::Cancelled => panic!("drop over a valid branch must confirm"),
        }
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_on_source_branch_cancels() {
        let source = Uuid::new_v4();
        let mut session = dragging_session(source);

        session.enter_branch(source);
        assert_eq!(session.release(), DropOutcome::Cancelled);
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_release_with_no_branch_cancels() {
        let mut session = dragging_session(Uuid::new_v4());

        session.enter_branch(Uuid::new_v4());
        session.leave_branch();
        assert_eq!(session.release(), DropOutcome::Cancelled);
    }

    #[test]
    fn test_hover_target_follows_pointer() {
        let mut session = dragging_session(Uuid::new_v4());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        session.enter_branch(first);
        session.enter_branch(second);
        match session.state() {
            DragState::OverBranch {
                target_branch_id, ..
            } => assert_eq!(*target_branch_id, second),
            other => panic!("expected OverBranch, got {other:?}"),
        }
    }

    #[test]
    fn test_press_ignored_while_session_active() {
        let source = Uuid::new_v4();
        let mut session = dragging_session(source);

        session.press((50.0, 50.0), payload(Uuid::new_v4()));
        match session.state() {
            DragState::Dragging { payload } => {
                assert_eq!(payload.source_inventory.branch_id, source)
            }
            other => panic!("expected the original drag to continue, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_is_always_safe() {
        let mut session = dragging_session(Uuid::new_v4());
        session.enter_branch(Uuid::new_v4());
        session.cancel();
        assert_eq!(session.state(), &DragState::Idle);

        // cancelling an idle session is a no-op
        session.cancel();
        assert_eq!(session.state(), &DragState::Idle);
    }
}
