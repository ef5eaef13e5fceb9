//! # PaceLedger App
//!
//! HTTP surface for the analytics engine. Handlers stay thin: parse the
//! request, hand off to a core service, map the result. An upstream auth
//! proxy authenticates callers and forwards the viewer identity headers.

pub mod context;
pub mod error;
pub mod routes;
pub mod viewer;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use routes::router;
