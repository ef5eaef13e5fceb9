//! Benchmark report assembly
//!
//! Composes the rollup, target cascade, and pacing calculator into
//! office/breakdown/person views, renders the CSV export, and persists
//! verbatim snapshots.

pub mod csv;
pub mod ports;
pub mod service;

pub use csv::{csv_filename, render_benchmark_csv};
pub use service::ReportService;
