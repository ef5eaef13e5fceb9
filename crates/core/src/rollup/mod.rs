//! Monthly financial rollup
//!
//! Merges sale events, manual monthly inputs, externally computed
//! commissions, and resolved rate/plan records into per-person, per-month
//! financial rows.

pub mod ports;
pub mod service;

pub use service::RollupService;
