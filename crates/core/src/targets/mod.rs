//! Performance-target cascade
//!
//! Resolves a person's effective monthly targets from the override/role
//! hierarchy and owns the write side of role expectations and person
//! overrides.

pub mod ports;
pub mod service;
pub mod validate;

pub use service::TargetService;
pub use validate::{BucketBreakdownInput, PersonOverrideInput, RoleExpectationInput};
