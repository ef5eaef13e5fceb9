//! Externally computed commission earnings backed by SQLite
//!
//! Rows arrive from the payroll ingest; the rollup only ever reads them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use paceledger_core::ExternalResultStore;
use paceledger_domain::{ExternalMonthlyResult, Result as DomainResult};
use rusqlite::{params, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{date_value, uuid_value};
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `ExternalResultStore`
pub struct SqliteExternalResultStore {
    db: Arc<DbManager>,
}

impl SqliteExternalResultStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one ingested month result
    pub async fn upsert_result(
        &self,
        result: ExternalMonthlyResult,
    ) -> DomainResult<ExternalMonthlyResult> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<ExternalMonthlyResult> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO external_monthly_results (org_id, person_id, month, total_earnings)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(org_id, person_id, month) DO UPDATE SET
                    total_earnings = excluded.total_earnings",
                params![
                    result.org_id.to_string(),
                    result.person_id.to_string(),
                    result.month.to_string(),
                    result.total_earnings,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(result)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl ExternalResultStore for SqliteExternalResultStore {
    async fn result_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> DomainResult<Option<ExternalMonthlyResult>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<ExternalMonthlyResult>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT org_id, person_id, month, total_earnings
                 FROM external_monthly_results
                 WHERE org_id = ?1 AND person_id = ?2 AND month = ?3",
                params![org_id.to_string(), person_id.to_string(), month.to_string()],
                map_result_row,
            );
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_result_row(row: &Row) -> rusqlite::Result<ExternalMonthlyResult> {
    Ok(ExternalMonthlyResult {
        org_id: uuid_value(row, 0)?,
        person_id: uuid_value(row, 1)?,
        month: date_value(row, 2)?,
        total_earnings: row.get(3)?,
    })
}
