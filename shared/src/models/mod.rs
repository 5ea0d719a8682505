//! Domain models for the Store Operations Platform

pub mod branch;
pub mod inventory;
pub mod product;
pub mod transfer;

pub use branch::*;
pub use inventory::*;
pub use product::*;
pub use transfer::*;
