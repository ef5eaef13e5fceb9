//! Route table and request handlers

mod comp;
mod health;
mod people;
mod reports;
mod targets;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use paceledger_domain::{PaceLedgerError, SaleStatus};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Build the full route table over the application context
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/people", get(people::list_people))
        .route("/api/people/{person_id}/roi", get(reports::person_roi))
        .route("/api/reports/benchmark", get(reports::benchmark))
        .route("/api/reports/benchmark.csv", get(reports::benchmark_csv))
        .route(
            "/api/reports/snapshots",
            get(reports::list_snapshots).post(reports::save_snapshot),
        )
        .route("/api/reports/snapshots/{snapshot_id}", get(reports::get_snapshot))
        .route("/api/comp/rates", post(comp::upsert_rate))
        .route("/api/comp/plans", post(comp::upsert_plan))
        .route("/api/comp/manual-inputs", post(comp::upsert_manual_input))
        .route("/api/targets/roles", put(targets::set_role_expectation))
        .route("/api/targets/people", put(targets::set_person_override))
        .with_state(ctx)
}

/// Parse a comma-separated status allow-list from a query parameter.
///
/// Absent or blank means "use the default counted set", which the services
/// apply themselves.
pub(crate) fn parse_statuses(raw: Option<&str>) -> ApiResult<Vec<SaleStatus>> {
    let Some(raw) = raw else { return Ok(Vec::new()) };
    let mut statuses = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let status = SaleStatus::parse(token).ok_or_else(|| {
            PaceLedgerError::validation("statuses", format!("unknown status '{token}'"))
        })?;
        statuses.push(status);
    }
    Ok(statuses)
}
