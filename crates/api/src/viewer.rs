//! Viewer identity extraction
//!
//! The auth proxy in front of this service authenticates the caller and
//! forwards their identity in `x-org-id`, `x-person-id` and `x-org-role`
//! headers. Requests arriving without them are unauthorized.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use paceledger_domain::{PaceLedgerError, Viewer};
use uuid::Uuid;

use crate::error::ApiError;

/// Authenticated viewer, extracted from the forwarded identity headers
pub struct AuthViewer(pub Viewer);

impl<S> FromRequestParts<S> for AuthViewer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let org_id = header_uuid(parts, "x-org-id")?;
        let person_id = header_uuid(parts, "x-person-id")?;
        let role = parts
            .headers
            .get("x-org-role")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("member");

        Ok(Self(Viewer {
            org_id,
            person_id,
            is_admin: role.eq_ignore_ascii_case("admin"),
            is_owner: role.eq_ignore_ascii_case("owner"),
            is_manager: role.eq_ignore_ascii_case("manager"),
        }))
    }
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Uuid, ApiError> {
    let raw = parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| PaceLedgerError::Unauthorized(format!("missing '{name}' header")))?;
    Uuid::parse_str(raw)
        .map_err(|_| PaceLedgerError::Unauthorized(format!("malformed '{name}' header")).into())
}
