//! Health endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use paceledger_domain::PaceLedgerError;
use serde_json::{json, Value};
use tokio::task;

use crate::context::AppContext;
use crate::error::ApiResult;

/// Liveness plus a database round trip
pub(crate) async fn health(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let db = Arc::clone(&ctx.db);
    task::spawn_blocking(move || db.health_check())
        .await
        .map_err(|e| PaceLedgerError::Internal(format!("health task failed: {e}")))??;
    Ok(Json(json!({ "status": "ok" })))
}
