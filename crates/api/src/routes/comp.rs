//! Compensation admin endpoints: rates, salary plans, manual inputs

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use paceledger_core::{CommissionRateInput, CompensationPlanInput, ManualInputUpsert};
use paceledger_domain::{CommissionRate, CompensationPlan, MonthlyManualInput};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::viewer::AuthViewer;

pub(crate) async fn upsert_rate(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<CommissionRateInput>,
) -> ApiResult<Json<CommissionRate>> {
    Ok(Json(ctx.comp_admin.upsert_commission_rate(&viewer, input).await?))
}

pub(crate) async fn upsert_plan(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<CompensationPlanInput>,
) -> ApiResult<Json<CompensationPlan>> {
    Ok(Json(ctx.comp_admin.upsert_compensation_plan(&viewer, input).await?))
}

pub(crate) async fn upsert_manual_input(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<ManualInputUpsert>,
) -> ApiResult<Json<MonthlyManualInput>> {
    Ok(Json(ctx.comp_admin.upsert_manual_input(&viewer, input).await?))
}
