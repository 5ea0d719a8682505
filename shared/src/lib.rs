//! Shared types and domain logic for the Store Operations Platform
//!
//! This crate contains the inventory-transfer core shared between the
//! backend, the frontend (via WASM), and other components of the system.

pub mod drag;
pub mod models;
pub mod queue;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use drag::*;
pub use models::*;
pub use queue::*;
pub use snapshot::*;
pub use types::*;
pub use validation::*;
