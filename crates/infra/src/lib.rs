//! # PaceLedger Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite-backed store implementations (rusqlite + r2d2)
//! - The configuration loader (environment first, file fallback)
//!
//! ## Architecture
//! - Implements traits defined in `paceledger-core`
//! - Depends on `paceledger-domain` and `paceledger-core`
//! - Contains all "impure" code (I/O, filesystem, database)

pub mod config;
pub mod database;

mod errors;

pub use database::*;
