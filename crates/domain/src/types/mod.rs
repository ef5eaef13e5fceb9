//! Domain types and models

pub mod compensation;
pub mod people;
pub mod reports;
pub mod sales;
pub mod targets;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export for convenience
pub use compensation::{
    CommissionRate, CompensationPlan, ExternalMonthlyResult, MonthlyManualInput,
};
pub use people::{Person, Role, Viewer};
pub use reports::{
    BenchmarkReport, BreakdownRow, BreakdownSection, MonthlyResultRow, OfficePace, OfficeSummary,
    Pace, PersonRoiReport, PersonRow, ReportSnapshot, SnapshotMeta,
};
pub use sales::{canonical_lob, SaleEvent, SaleStatus};
pub use targets::{
    ActivityTarget, BucketBreakdown, LobAppsGoal, LobPremium, PersonOverride, PremiumBreakdown,
    PremiumMode, ResolvedTargets, RoleExpectation, TargetSource,
};

/// An inclusive calendar date window (`start <= end`)
///
/// Rollup months are one window per calendar month; benchmark reports may
/// span several months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `date` falls inside the window (inclusive bounds)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
