pub mod catalog;
pub mod events;
pub mod inventory;
pub mod transfer;

pub use catalog::CatalogService;
pub use events::{TransferCompleted, TransferEvents};
pub use inventory::{BranchInventorySummary, InventoryService};
pub use transfer::{PgStockMover, StockMover, TransferExecutor, TransferService};
