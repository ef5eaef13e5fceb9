//! Report endpoints: benchmarks, CSV export, person ROI, snapshots

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use paceledger_core::{csv_filename, render_benchmark_csv};
use paceledger_domain::{
    BenchmarkReport, DateWindow, PersonRoiReport, ReportSnapshot,
};
use serde::Deserialize;
use uuid::Uuid;

use super::parse_statuses;
use crate::context::AppContext;
use crate::error::ApiResult;
use crate::viewer::AuthViewer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BenchmarkQuery {
    start: NaiveDate,
    end: NaiveDate,
    as_of: Option<NaiveDate>,
    statuses: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoiQuery {
    months_back: Option<u32>,
    as_of: Option<NaiveDate>,
    statuses: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotRequest {
    start: NaiveDate,
    end: NaiveDate,
    as_of: Option<NaiveDate>,
    statuses: Option<String>,
    title: String,
}

pub(crate) async fn benchmark(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Query(query): Query<BenchmarkQuery>,
) -> ApiResult<Json<BenchmarkReport>> {
    let statuses = parse_statuses(query.statuses.as_deref())?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let report = ctx
        .reports
        .benchmark_report(&viewer, DateWindow::new(query.start, query.end), &statuses, as_of)
        .await?;
    Ok(Json(report))
}

pub(crate) async fn benchmark_csv(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Query(query): Query<BenchmarkQuery>,
) -> ApiResult<Response> {
    let statuses = parse_statuses(query.statuses.as_deref())?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let report = ctx
        .reports
        .benchmark_report(&viewer, DateWindow::new(query.start, query.end), &statuses, as_of)
        .await?;
    let body = render_benchmark_csv(&report)?;
    let disposition =
        format!("attachment; filename=\"{}\"", csv_filename(query.start, query.end));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub(crate) async fn person_roi(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Path(person_id): Path<Uuid>,
    Query(query): Query<RoiQuery>,
) -> ApiResult<Json<PersonRoiReport>> {
    let statuses = parse_statuses(query.statuses.as_deref())?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let report =
        ctx.reports.person_roi(&viewer, person_id, query.months_back, &statuses, as_of).await?;
    Ok(Json(report))
}

pub(crate) async fn save_snapshot(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Json(request): Json<SnapshotRequest>,
) -> ApiResult<Json<ReportSnapshot>> {
    let statuses = parse_statuses(request.statuses.as_deref())?;
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let window = DateWindow::new(request.start, request.end);
    let report = ctx.reports.benchmark_report(&viewer, window, &statuses, as_of).await?;
    let snapshot = ctx
        .reports
        .save_benchmark_snapshot(&viewer, window, &statuses, request.title, &report, Utc::now())
        .await?;
    Ok(Json(snapshot))
}

pub(crate) async fn get_snapshot(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
    Path(snapshot_id): Path<Uuid>,
) -> ApiResult<Json<ReportSnapshot>> {
    Ok(Json(ctx.reports.snapshot(&viewer, snapshot_id).await?))
}

pub(crate) async fn list_snapshots(
    State(ctx): State<Arc<AppContext>>,
    AuthViewer(viewer): AuthViewer,
) -> ApiResult<Json<Vec<ReportSnapshot>>> {
    Ok(Json(ctx.reports.snapshots(&viewer).await?))
}
