//! Shared test helpers for `paceledger-core` integration tests.
//!
//! In-memory stores and fixtures so the service tests can focus on
//! behaviour instead of boilerplate.

pub mod stores;
