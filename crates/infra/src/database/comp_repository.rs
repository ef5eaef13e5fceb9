//! Effective-dated compensation records backed by SQLite
//!
//! Rate upserts run the overlap check inside an immediate transaction so
//! concurrent writers against one scope key serialize; the unique index on
//! `(org_id, line_of_business, effective_start)` backstops the check. Plans
//! carry no overlap gate: several plans may be active for one person at
//! once (base + supplement) and the rollup sums them.

use std::sync::Arc;

use async_trait::async_trait;
use paceledger_core::temporal::validate_no_overlap;
use paceledger_core::{CommissionRateStore, CompensationPlanStore};
use paceledger_domain::{
    CommissionRate, CompensationPlan, PaceLedgerError, Result as DomainResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{date_value, opt_date_value, uuid_value};
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `CommissionRateStore`
pub struct SqliteCommissionRateStore {
    db: Arc<DbManager>,
}

impl SqliteCommissionRateStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommissionRateStore for SqliteCommissionRateStore {
    async fn rates_for_org(&self, org_id: Uuid) -> DomainResult<Vec<CommissionRate>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<CommissionRate>> {
            let conn = db.get_connection()?;
            query_rates_for_org(&conn, org_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_rate(&self, rate: CommissionRate) -> DomainResult<CommissionRate> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<CommissionRate> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let existing =
                query_rates_for_scope(&tx, rate.org_id, &rate.line_of_business)
                    .map_err(map_sql_error)?;
            validate_no_overlap(&existing, rate.effective_start, rate.effective_end)?;

            tx.execute(
                "INSERT INTO commission_rates (
                    id, org_id, line_of_business, rate, effective_start, effective_end
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(org_id, line_of_business, effective_start) DO UPDATE SET
                    id = excluded.id,
                    rate = excluded.rate,
                    effective_end = excluded.effective_end",
                params![
                    rate.id.to_string(),
                    rate.org_id.to_string(),
                    rate.line_of_business,
                    rate.rate,
                    rate.effective_start.to_string(),
                    rate.effective_end.map(|d| d.to_string()),
                ],
            )
            .map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(rate)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// SQLite-backed implementation of `CompensationPlanStore`
pub struct SqliteCompensationPlanStore {
    db: Arc<DbManager>,
}

impl SqliteCompensationPlanStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompensationPlanStore for SqliteCompensationPlanStore {
    async fn plans_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
    ) -> DomainResult<Vec<CompensationPlan>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<CompensationPlan>> {
            let conn = db.get_connection()?;
            query_plans_for_person(&conn, org_id, person_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_plan(&self, plan: CompensationPlan) -> DomainResult<CompensationPlan> {
        if plan.effective_end.is_some_and(|end| end < plan.effective_start) {
            return Err(PaceLedgerError::validation(
                "effectiveEnd",
                "must be on or after effectiveStart",
            ));
        }

        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<CompensationPlan> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO compensation_plans (
                    id, org_id, person_id, monthly_salary, effective_start, effective_end
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(org_id, person_id, effective_start) DO UPDATE SET
                    id = excluded.id,
                    monthly_salary = excluded.monthly_salary,
                    effective_end = excluded.effective_end",
                params![
                    plan.id.to_string(),
                    plan.org_id.to_string(),
                    plan.person_id.to_string(),
                    plan.monthly_salary,
                    plan.effective_start.to_string(),
                    plan.effective_end.map(|d| d.to_string()),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(plan)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_rate_row(row: &Row) -> rusqlite::Result<CommissionRate> {
    Ok(CommissionRate {
        id: uuid_value(row, 0)?,
        org_id: uuid_value(row, 1)?,
        line_of_business: row.get(2)?,
        rate: row.get(3)?,
        effective_start: date_value(row, 4)?,
        effective_end: opt_date_value(row, 5)?,
    })
}

fn map_plan_row(row: &Row) -> rusqlite::Result<CompensationPlan> {
    Ok(CompensationPlan {
        id: uuid_value(row, 0)?,
        org_id: uuid_value(row, 1)?,
        person_id: uuid_value(row, 2)?,
        monthly_salary: row.get(3)?,
        effective_start: date_value(row, 4)?,
        effective_end: opt_date_value(row, 5)?,
    })
}

fn query_rates_for_org(conn: &Connection, org_id: Uuid) -> rusqlite::Result<Vec<CommissionRate>> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, line_of_business, rate, effective_start, effective_end
         FROM commission_rates
         WHERE org_id = ?1
         ORDER BY line_of_business ASC, effective_start ASC",
    )?;
    let rows = stmt.query_map(params![org_id.to_string()], map_rate_row)?;
    rows.collect()
}

fn query_rates_for_scope(
    conn: &Connection,
    org_id: Uuid,
    line_of_business: &str,
) -> rusqlite::Result<Vec<CommissionRate>> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, line_of_business, rate, effective_start, effective_end
         FROM commission_rates
         WHERE org_id = ?1 AND line_of_business = ?2
         ORDER BY effective_start ASC",
    )?;
    let rows = stmt.query_map(params![org_id.to_string(), line_of_business], map_rate_row)?;
    rows.collect()
}

fn query_plans_for_person(
    conn: &Connection,
    org_id: Uuid,
    person_id: Uuid,
) -> rusqlite::Result<Vec<CompensationPlan>> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, person_id, monthly_salary, effective_start, effective_end
         FROM compensation_plans
         WHERE org_id = ?1 AND person_id = ?2
         ORDER BY effective_start ASC",
    )?;
    let rows =
        stmt.query_map(params![org_id.to_string(), person_id.to_string()], map_plan_row)?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use paceledger_core::temporal::active_in_window;
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(&db_path, 4).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        (Arc::new(manager), temp_dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn test_rate(org: Uuid, start: NaiveDate, end: Option<NaiveDate>) -> CommissionRate {
        CommissionRate {
            id: Uuid::new_v4(),
            org_id: org,
            line_of_business: "Auto".into(),
            rate: 0.08,
            effective_start: start,
            effective_end: end,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rate_upsert_round_trips() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCommissionRateStore::new(db);
        let org = Uuid::new_v4();

        repo.upsert_rate(test_rate(org, date(2024, 1, 1), None)).await.expect("save rate");

        let rates = repo.rates_for_org(org).await.expect("list rates");
        assert_eq!(rates.len(), 1);
        assert!((rates[0].rate - 0.08).abs() < f64::EPSILON);
        assert!(rates[0].effective_end.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn overlapping_rate_is_rejected_in_the_transaction() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCommissionRateStore::new(db);
        let org = Uuid::new_v4();

        repo.upsert_rate(test_rate(org, date(2024, 1, 1), None)).await.expect("first rate");
        let err = repo
            .upsert_rate(test_rate(org, date(2024, 6, 1), None))
            .await
            .expect_err("overlap rejected");
        assert!(matches!(err, PaceLedgerError::Overlap(_)));

        let rates = repo.rates_for_org(org).await.expect("list rates");
        assert_eq!(rates.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn same_start_rate_replaces() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCommissionRateStore::new(db);
        let org = Uuid::new_v4();

        repo.upsert_rate(test_rate(org, date(2024, 1, 1), None)).await.expect("first rate");
        let mut update = test_rate(org, date(2024, 1, 1), Some(date(2024, 12, 31)));
        update.rate = 0.1;
        let saved = repo.upsert_rate(update).await.expect("replace rate");

        let rates = repo.rates_for_org(org).await.expect("list rates");
        assert_eq!(rates.len(), 1);
        assert!((rates[0].rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(rates[0].effective_end, Some(date(2024, 12, 31)));
        // Replace path adopts the new id, so the returned record is the
        // stored one
        assert_eq!(rates[0].id, saved.id);
    }

    fn test_plan(
        org: Uuid,
        person: Uuid,
        salary: f64,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> CompensationPlan {
        CompensationPlan {
            id: Uuid::new_v4(),
            org_id: org,
            person_id: person,
            monthly_salary: salary,
            effective_start: start,
            effective_end: end,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_plans_persist_and_sum() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCompensationPlanStore::new(db);
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();

        repo.upsert_plan(test_plan(org, person, 3000.0, date(2024, 1, 1), None))
            .await
            .expect("base plan");
        repo.upsert_plan(test_plan(org, person, 500.0, date(2024, 3, 1), None))
            .await
            .expect("supplement alongside the base plan");

        let plans = repo.plans_for_person(org, person).await.expect("list plans");
        assert_eq!(plans.len(), 2);

        let march: f64 = active_in_window(&plans, date(2024, 3, 1), date(2024, 3, 31))
            .iter()
            .map(|p| p.monthly_salary)
            .sum();
        assert!((march - 3500.0).abs() < f64::EPSILON);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn same_start_plan_replaces() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCompensationPlanStore::new(db);
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();

        repo.upsert_plan(test_plan(org, person, 3000.0, date(2024, 1, 1), None))
            .await
            .expect("first plan");
        let saved = repo
            .upsert_plan(test_plan(org, person, 3200.0, date(2024, 1, 1), None))
            .await
            .expect("replace plan");

        let plans = repo.plans_for_person(org, person).await.expect("list plans");
        assert_eq!(plans.len(), 1);
        assert!((plans[0].monthly_salary - 3200.0).abs() < f64::EPSILON);
        assert_eq!(plans[0].id, saved.id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn inverted_plan_interval_is_rejected() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteCompensationPlanStore::new(db);
        let org = Uuid::new_v4();
        let person = Uuid::new_v4();

        let err = repo
            .upsert_plan(test_plan(org, person, 3000.0, date(2024, 2, 1), Some(date(2024, 1, 1))))
            .await
            .expect_err("end before start");
        assert!(matches!(err, PaceLedgerError::Validation { .. }));
    }
}
