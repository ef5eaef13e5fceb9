//! Compensation admin service - core business logic
//!
//! Field validation happens here; the commission-rate overlap check runs
//! inside the store upsert, atomically with the write, so concurrent
//! writers against one scope key cannot both pass a stale check. Salary
//! plans take no overlap check: a person may hold several at once (base
//! plus supplement) and the rollup sums them.

use std::sync::Arc;

use chrono::NaiveDate;
use paceledger_common::validation::{require_fraction, require_non_empty, require_non_negative};
use paceledger_domain::types::sales::canonical_lob;
use paceledger_domain::{
    CommissionRate, CompensationPlan, MonthlyManualInput, PaceLedgerError, Result, Viewer,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::access::require_manage_comp;
use crate::rollup::ports::{CommissionRateStore, CompensationPlanStore, ManualInputStore};
use crate::utils::from_common;

/// A commission-rate write request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRateInput {
    pub line_of_business: String,
    pub rate: f64,
    pub effective_start: NaiveDate,
    pub effective_end: Option<NaiveDate>,
}

/// A salary-plan write request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationPlanInput {
    pub person_id: Uuid,
    pub monthly_salary: f64,
    pub effective_start: NaiveDate,
    pub effective_end: Option<NaiveDate>,
}

/// A monthly manual-input write request; omitted figures default to 0
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualInputUpsert {
    pub person_id: Uuid,
    /// First day of the target calendar month
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

/// Administrative writes for rates, plans, and manual inputs
pub struct CompAdminService {
    rates: Arc<dyn CommissionRateStore>,
    plans: Arc<dyn CompensationPlanStore>,
    manual: Arc<dyn ManualInputStore>,
}

impl CompAdminService {
    pub fn new(
        rates: Arc<dyn CommissionRateStore>,
        plans: Arc<dyn CompensationPlanStore>,
        manual: Arc<dyn ManualInputStore>,
    ) -> Self {
        Self { rates, plans, manual }
    }

    /// Validate and persist a commission rate for a canonical line of
    /// business
    pub async fn upsert_commission_rate(
        &self,
        viewer: &Viewer,
        input: CommissionRateInput,
    ) -> Result<CommissionRate> {
        require_manage_comp(viewer)?;
        require_non_empty("lineOfBusiness", &input.line_of_business).map_err(from_common)?;
        require_fraction("rate", input.rate).map_err(from_common)?;
        validate_interval(input.effective_start, input.effective_end)?;

        let rate = CommissionRate {
            id: Uuid::new_v4(),
            org_id: viewer.org_id,
            line_of_business: canonical_lob(input.line_of_business.trim()),
            rate: input.rate,
            effective_start: input.effective_start,
            effective_end: input.effective_end,
        };
        let saved = self.rates.upsert_rate(rate).await?;
        info!(lob = %saved.line_of_business, start = %saved.effective_start, "commission rate saved");
        Ok(saved)
    }

    /// Validate and persist a salary plan
    pub async fn upsert_compensation_plan(
        &self,
        viewer: &Viewer,
        input: CompensationPlanInput,
    ) -> Result<CompensationPlan> {
        require_manage_comp(viewer)?;
        require_non_negative("monthlySalary", input.monthly_salary).map_err(from_common)?;
        validate_interval(input.effective_start, input.effective_end)?;

        let plan = CompensationPlan {
            id: Uuid::new_v4(),
            org_id: viewer.org_id,
            person_id: input.person_id,
            monthly_salary: input.monthly_salary,
            effective_start: input.effective_start,
            effective_end: input.effective_end,
        };
        let saved = self.plans.upsert_plan(plan).await?;
        info!(person_id = %saved.person_id, start = %saved.effective_start, "salary plan saved");
        Ok(saved)
    }

    /// Validate and upsert the manual cost figures for one month
    pub async fn upsert_manual_input(
        &self,
        viewer: &Viewer,
        input: ManualInputUpsert,
    ) -> Result<MonthlyManualInput> {
        require_manage_comp(viewer)?;
        require_non_negative("commissionPaid", input.commission_paid).map_err(from_common)?;
        require_non_negative("leadSpend", input.lead_spend).map_err(from_common)?;
        require_non_negative("otherBonusesManual", input.other_bonuses_manual)
            .map_err(from_common)?;
        require_non_negative("marketingExpenses", input.marketing_expenses)
            .map_err(from_common)?;

        let month = paceledger_common::time::month_start(input.month);
        let record = MonthlyManualInput {
            org_id: viewer.org_id,
            person_id: input.person_id,
            month,
            commission_paid: input.commission_paid,
            lead_spend: input.lead_spend,
            other_bonuses_manual: input.other_bonuses_manual,
            marketing_expenses: input.marketing_expenses,
            notes: input.notes,
        };
        self.manual.upsert_input(record).await
    }
}

fn validate_interval(start: NaiveDate, end: Option<NaiveDate>) -> Result<()> {
    if let Some(end) = end {
        if end < start {
            return Err(PaceLedgerError::validation(
                "effectiveEnd",
                "must be on or after effectiveStart",
            ));
        }
    }
    Ok(())
}
