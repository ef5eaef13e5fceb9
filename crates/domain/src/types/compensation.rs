//! Effective-dated compensation records and monthly manual inputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commission rate for one line of business, effective over a date interval.
///
/// Scope key: `(org_id, line_of_business)`. At most one rate is active at
/// any date within a scope; lookups resolve to the single active record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRate {
    pub id: Uuid,
    pub org_id: Uuid,
    /// Canonical line-of-business name
    pub line_of_business: String,
    /// Fraction of premium paid as commission (0..=1)
    pub rate: f64,
    pub effective_start: NaiveDate,
    /// `None` means open-ended / current
    pub effective_end: Option<NaiveDate>,
}

/// A salary plan for one person, effective over a date interval.
///
/// Scope key: `(org_id, person_id)`. Unlike commission rates, several plans
/// may be active simultaneously (base + supplement); their salaries sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationPlan {
    pub id: Uuid,
    pub org_id: Uuid,
    pub person_id: Uuid,
    pub monthly_salary: f64,
    pub effective_start: NaiveDate,
    pub effective_end: Option<NaiveDate>,
}

/// Hand-entered monthly cost figures, upserted per `(org, person, month)`.
///
/// `month` is the first day of the calendar month. Numeric fields default
/// to 0 when absent; the row is never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyManualInput {
    pub org_id: Uuid,
    pub person_id: Uuid,
    pub month: NaiveDate,
    #[serde(default)]
    pub commission_paid: f64,
    #[serde(default)]
    pub lead_spend: f64,
    #[serde(default)]
    pub other_bonuses_manual: f64,
    #[serde(default)]
    pub marketing_expenses: f64,
    pub notes: Option<String>,
}

/// Externally computed commission earnings for `(person, month)`.
///
/// Preferred over the manual `commission_paid` figure when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalMonthlyResult {
    pub org_id: Uuid,
    pub person_id: Uuid,
    pub month: NaiveDate,
    pub total_earnings: f64,
}
