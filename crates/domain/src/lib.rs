//! # PaceLedger Domain
//!
//! Business domain types and models for PaceLedger.
//!
//! This crate contains:
//! - Domain data types (sale events, compensation records, targets, reports)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (canonical lines of business, counted statuses)
//!
//! ## Architecture
//! - No dependencies on other PaceLedger crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
