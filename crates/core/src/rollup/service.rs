//! Rollup aggregation service - core business logic

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use paceledger_common::time::month_end;
use paceledger_common::validation::require_non_empty_list;
use paceledger_domain::constants::DEFAULT_COUNTED_STATUSES;
use paceledger_domain::types::sales::canonical_lob;
use paceledger_domain::{
    CompensationPlan, MonthlyManualInput, MonthlyResultRow, PaceLedgerError, Result, SaleEvent,
    SaleStatus,
};
use tracing::debug;
use uuid::Uuid;

use super::ports::{
    CommissionRateStore, CompensationPlanStore, ExternalResultStore, ManualInputStore,
    PersonDirectory, SaleEventStore,
};
use crate::temporal::{active_in_window, resolve_active};
use crate::utils::from_common;

/// Per-person monthly financial aggregation
pub struct RollupService {
    sales: Arc<dyn SaleEventStore>,
    rates: Arc<dyn CommissionRateStore>,
    plans: Arc<dyn CompensationPlanStore>,
    manual: Arc<dyn ManualInputStore>,
    external: Arc<dyn ExternalResultStore>,
    people: Arc<dyn PersonDirectory>,
}

impl RollupService {
    pub fn new(
        sales: Arc<dyn SaleEventStore>,
        rates: Arc<dyn CommissionRateStore>,
        plans: Arc<dyn CompensationPlanStore>,
        manual: Arc<dyn ManualInputStore>,
        external: Arc<dyn ExternalResultStore>,
        people: Arc<dyn PersonDirectory>,
    ) -> Self {
        Self { sales, rates, plans, manual, external, people }
    }

    /// Compute the monthly financial rows for one person over the given
    /// calendar-month windows.
    ///
    /// `months` must be whole calendar-month `(start, end)` pairs. An empty
    /// `statuses` list falls back to the default counted set. Rows come
    /// back descending by month (most recent first). Each month is an
    /// independent computation over its own facts.
    pub async fn monthly_rollup(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        months: &[(NaiveDate, NaiveDate)],
        statuses: &[SaleStatus],
    ) -> Result<Vec<MonthlyResultRow>> {
        validate_month_windows(months)?;

        if self.people.person(org_id, person_id).await?.is_none() {
            return Err(PaceLedgerError::NotFound(format!("person '{person_id}'")));
        }

        let statuses =
            if statuses.is_empty() { DEFAULT_COUNTED_STATUSES } else { statuses };

        // Rates and plans are effective-dated, so one fetch covers every
        // requested month; per-month facts are fetched inside the loop.
        let rates = self.rates.rates_for_org(org_id).await?;
        let plans = self.plans.plans_for_person(org_id, person_id).await?;

        let mut rows = Vec::with_capacity(months.len());
        for &(month_start, month_end) in months {
            let events = self
                .sales
                .events_for_person(org_id, person_id, month_start, month_end, statuses)
                .await?;
            let manual =
                self.manual.input_for_month(org_id, person_id, month_start).await?;
            let external =
                self.external.result_for_month(org_id, person_id, month_start).await?;
            let external_earnings = external.map(|r| r.total_earnings);

            rows.push(compute_month_row(
                month_start,
                month_end,
                &events,
                &rates,
                &plans,
                manual.as_ref(),
                external_earnings,
            ));
        }

        rows.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(rows)
    }
}

fn validate_month_windows(months: &[(NaiveDate, NaiveDate)]) -> Result<()> {
    require_non_empty_list("months", months).map_err(from_common)?;
    for &(start, end) in months {
        if start.day() != 1 || end != month_end(start) {
            return Err(PaceLedgerError::validation(
                "months",
                format!("({start}, {end}) is not a whole calendar month"),
            ));
        }
    }
    Ok(())
}

/// Pure per-month row computation over already-fetched facts
fn compute_month_row(
    month_start: NaiveDate,
    month_end: NaiveDate,
    events: &[SaleEvent],
    rates: &[paceledger_domain::CommissionRate],
    plans: &[CompensationPlan],
    manual: Option<&MonthlyManualInput>,
    external_earnings: Option<f64>,
) -> MonthlyResultRow {
    // Rate per line of business, resolved once at the month boundary
    let mut rate_map: HashMap<&str, f64> = HashMap::new();
    for rate in rates {
        rate_map.entry(rate.line_of_business.as_str()).or_insert_with(|| {
            let scoped = rates.iter().filter(|r| r.line_of_business == rate.line_of_business);
            resolve_active(scoped, month_start).map_or(0.0, |r| r.rate)
        });
    }

    let mut apps: u32 = 0;
    let mut premium = 0.0;
    let mut revenue = 0.0;
    for event in events {
        let lob = canonical_lob(&event.line_of_business);
        let rate = rate_map.get(lob.as_str()).copied().unwrap_or_else(|| {
            debug!(lob = %event.line_of_business, "no commission rate for line of business");
            0.0
        });
        apps += 1;
        premium += event.premium;
        revenue += event.premium * rate;
    }

    // Plans sum over every interval active during the month, unlike rates
    let salary: f64 = active_in_window(plans, month_start, month_end)
        .iter()
        .map(|p| p.monthly_salary)
        .sum();

    let manual_commission = manual.map_or(0.0, |m| m.commission_paid);
    let (commissions_paid, commission_paid_from_external) = match external_earnings {
        Some(earnings) => (earnings, true),
        None => (manual_commission, false),
    };

    let lead_spend = manual.map_or(0.0, |m| m.lead_spend);
    let other_bonuses_manual = manual.map_or(0.0, |m| m.other_bonuses_manual);
    let marketing_expenses = manual.map_or(0.0, |m| m.marketing_expenses);
    let other_bonuses_auto = 0.0;

    let costs = salary
        + commissions_paid
        + lead_spend
        + other_bonuses_auto
        + other_bonuses_manual
        + marketing_expenses;
    let net = revenue - costs;
    let roi_percent = if costs > 0.0 { net / costs * 100.0 } else { 0.0 };

    MonthlyResultRow {
        month: month_start,
        apps,
        premium,
        revenue,
        salary,
        commissions_paid,
        commission_paid_from_external,
        lead_spend,
        other_bonuses_auto,
        other_bonuses_manual,
        marketing_expenses,
        net,
        roi_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paceledger_domain::CommissionRate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn auto_rate(org: Uuid, rate: f64, start: NaiveDate) -> CommissionRate {
        CommissionRate {
            id: Uuid::new_v4(),
            org_id: org,
            line_of_business: "Auto".into(),
            rate,
            effective_start: start,
            effective_end: None,
        }
    }

    fn sale(org: Uuid, person: Uuid, lob: &str, premium: f64, sold: NaiveDate) -> SaleEvent {
        SaleEvent {
            id: Uuid::new_v4(),
            org_id: org,
            person_id: person,
            line_of_business: lob.into(),
            premium,
            date_sold: sold,
            status: SaleStatus::Issued,
        }
    }

    #[test]
    fn month_row_combines_all_fact_sources() {
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();
        let rates = vec![auto_rate(org, 0.08, date(2024, 1, 1))];
        let plans = vec![CompensationPlan {
            id: Uuid::new_v4(),
            org_id: org,
            person_id: person,
            monthly_salary: 3000.0,
            effective_start: date(2024, 1, 1),
            effective_end: None,
        }];
        let events = vec![sale(org, person, "Auto Insurance", 2000.0, date(2024, 1, 15))];
        let manual = MonthlyManualInput {
            org_id: org,
            person_id: person,
            month: date(2024, 1, 1),
            commission_paid: 0.0,
            lead_spend: 200.0,
            other_bonuses_manual: 0.0,
            marketing_expenses: 0.0,
            notes: None,
        };

        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &events,
            &rates,
            &plans,
            Some(&manual),
            None,
        );

        assert_eq!(row.apps, 1);
        assert!((row.premium - 2000.0).abs() < f64::EPSILON);
        assert!((row.revenue - 160.0).abs() < 1e-9);
        assert!((row.salary - 3000.0).abs() < f64::EPSILON);
        assert!((row.net - -3040.0).abs() < 1e-9);
        assert!((row.roi_percent - -95.0).abs() < 1e-9);
        assert!(!row.commission_paid_from_external);
    }

    #[test]
    fn external_earnings_are_preferred_over_manual_commission() {
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();
        let manual = MonthlyManualInput {
            org_id: org,
            person_id: person,
            month: date(2024, 1, 1),
            commission_paid: 500.0,
            lead_spend: 0.0,
            other_bonuses_manual: 0.0,
            marketing_expenses: 0.0,
            notes: None,
        };

        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &[],
            &[],
            &[],
            Some(&manual),
            Some(750.0),
        );

        assert!((row.commissions_paid - 750.0).abs() < f64::EPSILON);
        assert!(row.commission_paid_from_external);
    }

    #[test]
    fn zero_costs_yield_zero_roi_not_nan() {
        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &[],
            &[],
            &[],
            None,
            None,
        );
        assert!((row.roi_percent).abs() < f64::EPSILON);
        assert!(row.roi_percent.is_finite());
    }

    #[test]
    fn unrated_lob_contributes_premium_but_no_revenue() {
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();
        let rates = vec![auto_rate(org, 0.08, date(2024, 1, 1))];
        let events = vec![sale(org, person, "Pet Plan", 300.0, date(2024, 1, 10))];

        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &events,
            &rates,
            &[],
            None,
            None,
        );

        assert_eq!(row.apps, 1);
        assert!((row.premium - 300.0).abs() < f64::EPSILON);
        assert!((row.revenue).abs() < f64::EPSILON);
    }

    #[test]
    fn overlapping_plans_sum_their_salaries() {
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();
        let plan = |salary: f64| CompensationPlan {
            id: Uuid::new_v4(),
            org_id: org,
            person_id: person,
            monthly_salary: salary,
            effective_start: date(2023, 6, 1),
            effective_end: None,
        };
        let plans = vec![plan(3000.0), plan(500.0)];

        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &[],
            &[],
            &plans,
            None,
            None,
        );
        assert!((row.salary - 3500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rate_is_resolved_at_the_month_boundary() {
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();
        let rates = vec![
            CommissionRate {
                id: Uuid::new_v4(),
                org_id: org,
                line_of_business: "Auto".into(),
                rate: 0.05,
                effective_start: date(2023, 1, 1),
                effective_end: Some(date(2023, 12, 31)),
            },
            auto_rate(org, 0.08, date(2024, 1, 1)),
        ];
        let events = vec![sale(org, person, "Auto", 1000.0, date(2024, 1, 20))];

        let row = compute_month_row(
            date(2024, 1, 1),
            date(2024, 1, 31),
            &events,
            &rates,
            &[],
            None,
            None,
        );
        assert!((row.revenue - 80.0).abs() < 1e-9);
    }

    #[test]
    fn partial_month_window_is_rejected() {
        let err = validate_month_windows(&[(date(2024, 1, 5), date(2024, 1, 31))])
            .expect_err("mid-month start");
        assert!(matches!(err, PaceLedgerError::Validation { .. }));

        let err = validate_month_windows(&[]).expect_err("empty list");
        assert!(matches!(err, PaceLedgerError::Validation { .. }));
    }
}
