//! HTTP handlers for the Store Operations Platform

mod catalog;
mod health;
mod inventory;
mod transfer;

pub use catalog::*;
pub use health::*;
pub use inventory::*;
pub use transfer::*;
