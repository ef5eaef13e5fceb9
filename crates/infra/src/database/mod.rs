//! SQLite persistence layer
//!
//! One repository per aggregate, each implementing the matching core port
//! over a shared `DbManager` pool.

pub mod manager;
pub(crate) mod sql;

mod comp_repository;
mod external_result_repository;
mod manual_input_repository;
mod people_repository;
mod sale_event_repository;
mod snapshot_repository;
mod targets_repository;

pub use comp_repository::{SqliteCommissionRateStore, SqliteCompensationPlanStore};
pub use external_result_repository::SqliteExternalResultStore;
pub use manager::DbManager;
pub use manual_input_repository::SqliteManualInputStore;
pub use people_repository::SqlitePersonDirectory;
pub use sale_event_repository::SqliteSaleEventStore;
pub use snapshot_repository::SqliteSnapshotStore;
pub use targets_repository::{SqlitePersonOverrideStore, SqliteRoleExpectationStore};
