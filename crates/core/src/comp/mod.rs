//! Compensation administration
//!
//! Write side for commission rates, salary plans, and monthly manual
//! inputs.

pub mod service;

pub use service::CompAdminService;
