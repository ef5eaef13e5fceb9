//! Target administration endpoints: role expectations and person overrides

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use paceledger_core::{PersonOverrideInput, RoleExpectationInput};
use paceledger_domain::{PersonOverride, RoleExpectation};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::viewer::AuthViewer;

pub(crate) async fn set_role_expectation(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<RoleExpectationInput>,
) -> ApiResult<Json<RoleExpectation>> {
    Ok(Json(ctx.targets.set_role_expectation(&viewer, input).await?))
}

pub(crate) async fn set_person_override(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<PersonOverrideInput>,
) -> ApiResult<Json<PersonOverride>> {
    Ok(Json(ctx.targets.set_person_override(&viewer, input).await?))
}
