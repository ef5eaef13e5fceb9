//! Hand-entered monthly cost figures backed by SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use paceledger_core::ManualInputStore;
use paceledger_domain::{MonthlyManualInput, Result as DomainResult};
use rusqlite::{params, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{date_value, uuid_value};
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `ManualInputStore`
pub struct SqliteManualInputStore {
    db: Arc<DbManager>,
}

impl SqliteManualInputStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ManualInputStore for SqliteManualInputStore {
    async fn input_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> DomainResult<Option<MonthlyManualInput>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<MonthlyManualInput>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT org_id, person_id, month, commission_paid, lead_spend,
                        other_bonuses_manual, marketing_expenses, notes
                 FROM monthly_manual_inputs
                 WHERE org_id = ?1 AND person_id = ?2 AND month = ?3",
                params![org_id.to_string(), person_id.to_string(), month.to_string()],
                map_input_row,
            );
            match result {
                Ok(input) => Ok(Some(input)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_input(&self, input: MonthlyManualInput) -> DomainResult<MonthlyManualInput> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<MonthlyManualInput> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO monthly_manual_inputs (
                    org_id, person_id, month, commission_paid, lead_spend,
                    other_bonuses_manual, marketing_expenses, notes
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(org_id, person_id, month) DO UPDATE SET
                    commission_paid = excluded.commission_paid,
                    lead_spend = excluded.lead_spend,
                    other_bonuses_manual = excluded.other_bonuses_manual,
                    marketing_expenses = excluded.marketing_expenses,
                    notes = excluded.notes",
                params![
                    input.org_id.to_string(),
                    input.person_id.to_string(),
                    input.month.to_string(),
                    input.commission_paid,
                    input.lead_spend,
                    input.other_bonuses_manual,
                    input.marketing_expenses,
                    input.notes,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(input)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_input_row(row: &Row) -> rusqlite::Result<MonthlyManualInput> {
    Ok(MonthlyManualInput {
        org_id: uuid_value(row, 0)?,
        person_id: uuid_value(row, 1)?,
        month: date_value(row, 2)?,
        commission_paid: row.get(3)?,
        lead_spend: row.get(4)?,
        other_bonuses_manual: row.get(5)?,
        marketing_expenses: row.get(6)?,
        notes: row.get(7)?,
    })
}
