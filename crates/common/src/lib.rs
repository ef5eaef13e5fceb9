//! # PaceLedger Common
//!
//! Foundation utilities shared by every PaceLedger crate.
//!
//! This crate contains:
//! - Common error plumbing (`CommonError`, severity classification)
//! - Calendar time math (month windows, elapsed fractions)
//! - Field-tagged validation rules
//!
//! ## Architecture
//! - No dependencies on other PaceLedger crates
//! - No I/O; pure utilities only

pub mod error;
pub mod time;
pub mod validation;

pub use error::{CommonError, CommonResult, ErrorSeverity};
