//! Report assembly service - core business logic
//!
//! Person-level figures are computed first; breakdown and office figures
//! are sums of those person-level values, never recomputed independently,
//! so every level stays additive.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use paceledger_common::time::{
    day_end_exclusive, day_start, months_spanned, trailing_month_windows,
};
use paceledger_domain::constants::{
    bucket_for_lob, BUCKET_FS, BUCKET_IPS, BUCKET_LABELS, BUCKET_PC, DEFAULT_COUNTED_STATUSES,
    DEFAULT_ROI_MONTHS_BACK, MAX_ROI_MONTHS_BACK, SNAPSHOT_VERSION,
};
use paceledger_domain::types::sales::canonical_lob;
use paceledger_domain::{
    BenchmarkReport, BreakdownRow, BreakdownSection, DateWindow, OfficePace, OfficeSummary,
    PaceLedgerError, PersonRoiReport, PersonRow, PremiumBreakdown, ReportSnapshot, Result,
    RoleExpectation, SaleStatus, SnapshotMeta, Viewer,
};
use tracing::instrument;
use uuid::Uuid;

use super::ports::SnapshotStore;
use crate::access::require_view_reports;
use crate::pacing::pace;
use crate::rollup::ports::{PersonDirectory, SaleEventStore};
use crate::rollup::RollupService;
use crate::targets::ports::RoleExpectationStore;
use crate::targets::TargetService;

/// Assembles benchmark and ROI reports and manages snapshots
pub struct ReportService {
    sales: Arc<dyn SaleEventStore>,
    people: Arc<dyn PersonDirectory>,
    expectations: Arc<dyn RoleExpectationStore>,
    targets: Arc<TargetService>,
    rollup: Arc<RollupService>,
    snapshots: Arc<dyn SnapshotStore>,
}

/// Per-person, per-bucket accumulation used for the breakdown section
#[derive(Default, Clone, Copy)]
struct BucketTotals {
    apps_actual: f64,
    apps_target: f64,
    premium_actual: f64,
    premium_target: f64,
}

impl ReportService {
    pub fn new(
        sales: Arc<dyn SaleEventStore>,
        people: Arc<dyn PersonDirectory>,
        expectations: Arc<dyn RoleExpectationStore>,
        targets: Arc<TargetService>,
        rollup: Arc<RollupService>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self { sales, people, expectations, targets, rollup, snapshots }
    }

    /// Assemble the office benchmark report over an inclusive date window.
    ///
    /// Monthly targets scale by the number of calendar months the window
    /// touches. `as_of` drives pacing and is normally today.
    #[instrument(skip(self), fields(org_id = %viewer.org_id))]
    pub async fn benchmark_report(
        &self,
        viewer: &Viewer,
        window: DateWindow,
        statuses: &[SaleStatus],
        as_of: NaiveDate,
    ) -> Result<BenchmarkReport> {
        require_view_reports(viewer)?;
        if window.start > window.end {
            return Err(PaceLedgerError::validation("window", "start is after end"));
        }
        let org_id = viewer.org_id;
        let months = f64::from(months_spanned(window.start, window.end));
        let statuses = if statuses.is_empty() { DEFAULT_COUNTED_STATUSES } else { statuses };

        let window_start = day_start(window.start);
        let window_end = day_end_exclusive(window.end);
        let as_of = day_start(as_of);

        let people = self.people.active_people(org_id).await?;

        let mut role_names: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut role_expectations: HashMap<Uuid, Option<RoleExpectation>> = HashMap::new();

        let mut person_rows = Vec::with_capacity(people.len());
        let mut buckets: HashMap<&'static str, BucketTotals> = HashMap::new();

        for person in &people {
            let events = self
                .sales
                .events_for_person(org_id, person.id, window.start, window.end, statuses)
                .await?;
            let resolved =
                self.targets.resolve_for_person(org_id, person.id, person.role_id).await?;

            let role_name = match person.role_id {
                Some(role_id) => match role_names.entry(role_id) {
                    std::collections::hash_map::Entry::Occupied(e) => e.get().clone(),
                    std::collections::hash_map::Entry::Vacant(e) => {
                        let name =
                            self.people.role(org_id, role_id).await?.map(|r| r.name);
                        e.insert(name.clone());
                        name
                    }
                },
                None => None,
            };
            let expectation = match person.role_id {
                Some(role_id) => match role_expectations.entry(role_id) {
                    std::collections::hash_map::Entry::Occupied(e) => e.get().clone(),
                    std::collections::hash_map::Entry::Vacant(e) => {
                        let exp =
                            self.expectations.expectation_for_role(org_id, role_id).await?;
                        e.insert(exp.clone());
                        exp
                    }
                },
                None => None,
            };

            let apps_actual = events.len() as f64;
            let premium_actual: f64 = events.iter().map(|e| e.premium).sum();
            let apps_target = resolved.apps_target * months;
            let premium_target = resolved.premium_target * months;
            let premium_pace =
                pace(premium_actual, premium_target, window_start, window_end, as_of);

            // Bucket actuals from the person's events
            for event in &events {
                let lob = canonical_lob(&event.line_of_business);
                if let Some(bucket) = bucket_for_lob(&lob) {
                    let totals = buckets.entry(bucket).or_default();
                    totals.apps_actual += 1.0;
                    totals.premium_actual += event.premium;
                }
            }
            // Bucket premium targets from the resolved breakdown
            match &resolved.premium_breakdown {
                Some(PremiumBreakdown::Bucket(b)) => {
                    buckets.entry(BUCKET_PC).or_default().premium_target += b.pc * months;
                    buckets.entry(BUCKET_FS).or_default().premium_target += b.fs * months;
                    if let Some(ips) = b.ips {
                        buckets.entry(BUCKET_IPS).or_default().premium_target += ips * months;
                    }
                }
                Some(PremiumBreakdown::Lob(entries)) => {
                    for entry in entries {
                        let lob = canonical_lob(&entry.lob_id);
                        if let Some(bucket) = bucket_for_lob(&lob) {
                            buckets.entry(bucket).or_default().premium_target +=
                                entry.premium * months;
                        }
                    }
                }
                None => {}
            }
            // Bucket apps targets come from the role's per-LOB goals; an
            // override carries only a headline apps number
            if let Some(expectation) = &expectation {
                for goal in &expectation.apps_goals_by_lob {
                    let lob = canonical_lob(&goal.lob_id);
                    if let Some(bucket) = bucket_for_lob(&lob) {
                        buckets.entry(bucket).or_default().apps_target +=
                            f64::from(goal.apps) * months;
                    }
                }
            }

            person_rows.push(PersonRow {
                person_id: person.id,
                name: person.name.clone(),
                role_name,
                apps_actual,
                apps_target,
                premium_actual,
                premium_target,
                premium_delta: premium_actual - premium_target,
                pace_premium: premium_pace.pace_ratio,
                expectation_source: resolved.source,
            });
        }

        // Office totals are sums of the person rows
        let apps_actual: f64 = person_rows.iter().map(|p| p.apps_actual).sum();
        let apps_target: f64 = person_rows.iter().map(|p| p.apps_target).sum();
        let premium_actual: f64 = person_rows.iter().map(|p| p.premium_actual).sum();
        let premium_target: f64 = person_rows.iter().map(|p| p.premium_target).sum();

        let office = OfficeSummary {
            plan_mode: "BUCKET".into(),
            apps_actual,
            apps_target,
            premium_actual,
            premium_target,
            apps_delta: apps_actual - apps_target,
            premium_delta: premium_actual - premium_target,
            pace: OfficePace {
                apps_pace: pace(apps_actual, apps_target, window_start, window_end, as_of),
                premium_pace: pace(
                    premium_actual,
                    premium_target,
                    window_start,
                    window_end,
                    as_of,
                ),
            },
        };

        let rows = BUCKET_LABELS
            .iter()
            .map(|&(key, label)| {
                let totals = buckets.get(key).copied().unwrap_or_default();
                let bucket_pace = pace(
                    totals.premium_actual,
                    totals.premium_target,
                    window_start,
                    window_end,
                    as_of,
                );
                BreakdownRow {
                    key: key.to_string(),
                    category: label.to_string(),
                    apps_actual: totals.apps_actual,
                    apps_target: totals.apps_target,
                    premium_actual: totals.premium_actual,
                    premium_target: totals.premium_target,
                    premium_delta: totals.premium_actual - totals.premium_target,
                    pace_premium: bucket_pace.pace_ratio,
                }
            })
            .collect();

        Ok(BenchmarkReport {
            office,
            breakdown: BreakdownSection { mode: "BUCKET".into(), rows },
            people: person_rows,
        })
    }

    /// Trailing monthly ROI rows for one person, most recent month first
    #[instrument(skip(self), fields(org_id = %viewer.org_id))]
    pub async fn person_roi(
        &self,
        viewer: &Viewer,
        person_id: Uuid,
        months_back: Option<u32>,
        statuses: &[SaleStatus],
        as_of: NaiveDate,
    ) -> Result<PersonRoiReport> {
        require_view_reports(viewer)?;
        let org_id = viewer.org_id;
        let person = self
            .people
            .person(org_id, person_id)
            .await?
            .ok_or_else(|| PaceLedgerError::NotFound(format!("person '{person_id}'")))?;

        let months_back = months_back.unwrap_or(DEFAULT_ROI_MONTHS_BACK);
        if months_back == 0 || months_back > MAX_ROI_MONTHS_BACK {
            return Err(PaceLedgerError::validation(
                "monthsBack",
                format!("must be between 1 and {MAX_ROI_MONTHS_BACK}"),
            ));
        }
        let windows = trailing_month_windows(as_of, months_back);
        let months =
            self.rollup.monthly_rollup(org_id, person_id, &windows, statuses).await?;

        Ok(PersonRoiReport { person_id, person_name: person.name, months })
    }

    /// Persist a rendered benchmark payload verbatim
    pub async fn save_benchmark_snapshot(
        &self,
        viewer: &Viewer,
        window: DateWindow,
        statuses: &[SaleStatus],
        title: String,
        report: &BenchmarkReport,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportSnapshot> {
        require_view_reports(viewer)?;
        let statuses = if statuses.is_empty() { DEFAULT_COUNTED_STATUSES } else { statuses };
        let payload = serde_json::to_value(report)
            .map_err(|e| PaceLedgerError::Internal(format!("snapshot payload: {e}")))?;

        let snapshot = ReportSnapshot {
            id: Uuid::new_v4(),
            report_type: "benchmark".into(),
            start_iso: window.start.to_string(),
            end_iso: window.end.to_string(),
            statuses_csv: statuses
                .iter()
                .map(SaleStatus::as_str)
                .collect::<Vec<_>>()
                .join(","),
            payload,
            title,
            meta: SnapshotMeta { generated_at, version: SNAPSHOT_VERSION },
        };
        self.snapshots.save(viewer.org_id, snapshot).await
    }

    /// Fetch one stored snapshot, payload exactly as saved
    pub async fn snapshot(&self, viewer: &Viewer, snapshot_id: Uuid) -> Result<ReportSnapshot> {
        require_view_reports(viewer)?;
        self.snapshots
            .get(viewer.org_id, snapshot_id)
            .await?
            .ok_or_else(|| PaceLedgerError::NotFound(format!("snapshot '{snapshot_id}'")))
    }

    /// List stored snapshots for the org, most recent first
    pub async fn snapshots(&self, viewer: &Viewer) -> Result<Vec<ReportSnapshot>> {
        require_view_reports(viewer)?;
        self.snapshots.list(viewer.org_id).await
    }
}
