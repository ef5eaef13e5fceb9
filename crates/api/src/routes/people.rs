//! People directory endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use paceledger_domain::Person;

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::viewer::AuthViewer;

/// Active people in the viewer's org, sorted by name
pub(crate) async fn list_people(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(ctx.people.active_people(viewer.org_id).await?))
}
