//! # PaceLedger Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The temporal resolver for effective-dated records
//! - The monthly financial rollup aggregator
//! - The target cascade resolver and write-side validators
//! - The pacing/delta calculator and benchmark report assembler
//! - Port/adapter interfaces (traits) for every store
//!
//! ## Architecture Principles
//! - Only depends on `paceledger-common` and `paceledger-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod access;
pub mod comp;
pub mod pacing;
pub mod report;
pub mod rollup;
pub mod targets;
pub mod temporal;

mod utils;

// Re-export specific items to avoid ambiguity
pub use access::{require_manage_comp, require_view_reports};
pub use comp::service::{CommissionRateInput, CompensationPlanInput, ManualInputUpsert};
pub use comp::CompAdminService;
pub use pacing::pace;
pub use report::{csv_filename, render_benchmark_csv};
pub use report::ports::SnapshotStore;
pub use report::ReportService;
pub use rollup::ports::{
    CommissionRateStore, CompensationPlanStore, ExternalResultStore, ManualInputStore,
    PersonDirectory, SaleEventStore,
};
pub use rollup::RollupService;
pub use targets::ports::{PersonOverrideStore, RoleExpectationStore};
pub use targets::{BucketBreakdownInput, PersonOverrideInput, RoleExpectationInput, TargetService};
pub use temporal::{resolve_active, validate_no_overlap, EffectiveDated};
