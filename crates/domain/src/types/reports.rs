//! Derived report rows and payloads.
//!
//! These types are computed fresh on every request and never persisted,
//! except for [`ReportSnapshot`], which stores a rendered payload verbatim.
//! Serialized field names are the published API contract (camelCase).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::targets::TargetSource;

/// One month of a person's financial rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResultRow {
    /// First day of the calendar month
    pub month: NaiveDate,
    pub apps: u32,
    pub premium: f64,
    pub revenue: f64,
    pub salary: f64,
    pub commissions_paid: f64,
    /// True when the external compensation engine supplied the figure
    pub commission_paid_from_external: bool,
    pub lead_spend: f64,
    /// Reserved extension point, currently always 0
    pub other_bonuses_auto: f64,
    pub other_bonuses_manual: f64,
    pub marketing_expenses: f64,
    pub net: f64,
    pub roi_percent: f64,
}

/// Pacing outcome for one (actual, target) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pace {
    pub elapsed_fraction: f64,
    pub pace_target: f64,
    /// `None` means "no target to pace against" (actual > 0 with a zero
    /// pace target), not an error
    pub pace_ratio: Option<f64>,
    /// Actual minus the full-period target, independent of elapsed time
    pub delta: f64,
}

/// Office-level totals (sums of the person rows)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeSummary {
    pub plan_mode: String,
    pub apps_actual: f64,
    pub apps_target: f64,
    pub premium_actual: f64,
    pub premium_target: f64,
    pub apps_delta: f64,
    pub premium_delta: f64,
    pub pace: OfficePace,
}

/// Office pacing for both tracked measures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficePace {
    pub apps_pace: Pace,
    pub premium_pace: Pace,
}

/// One breakdown bucket (sums of the person-level values in the bucket)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub key: String,
    pub category: String,
    pub apps_actual: f64,
    pub apps_target: f64,
    pub premium_actual: f64,
    pub premium_target: f64,
    pub premium_delta: f64,
    pub pace_premium: Option<f64>,
}

/// One person's row in the benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    pub person_id: Uuid,
    pub name: String,
    pub role_name: Option<String>,
    pub apps_actual: f64,
    pub apps_target: f64,
    pub premium_actual: f64,
    pub premium_target: f64,
    pub premium_delta: f64,
    pub pace_premium: Option<f64>,
    pub expectation_source: TargetSource,
}

/// The full benchmark report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    pub office: OfficeSummary,
    pub breakdown: BreakdownSection,
    pub people: Vec<PersonRow>,
}

/// Breakdown section with its aggregation mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSection {
    pub mode: String,
    pub rows: Vec<BreakdownRow>,
}

/// Person-ROI endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRoiReport {
    pub person_id: Uuid,
    pub person_name: String,
    /// Descending by month (most recent first)
    pub months: Vec<MonthlyResultRow>,
}

/// A persisted report payload, stored verbatim and never recomputed on read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub id: Uuid,
    pub report_type: String,
    pub start_iso: String,
    pub end_iso: String,
    pub statuses_csv: String,
    pub payload: serde_json::Value,
    pub title: String,
    pub meta: SnapshotMeta,
}

/// Snapshot bookkeeping metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub generated_at: DateTime<Utc>,
    pub version: u32,
}
