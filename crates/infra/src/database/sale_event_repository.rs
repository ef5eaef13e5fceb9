//! Sale-event feed storage backed by SQLite
//!
//! Events are written by the external book-of-business ingest and read
//! back by the rollup within a date range and status allow-list.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use paceledger_core::SaleEventStore;
use paceledger_domain::{PaceLedgerError, Result as DomainResult, SaleEvent, SaleStatus};
use rusqlite::{params, params_from_iter, Connection, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{date_value, uuid_value};
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `SaleEventStore`
pub struct SqliteSaleEventStore {
    db: Arc<DbManager>,
}

impl SqliteSaleEventStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert one sale event from the external feed
    pub async fn insert_event(&self, event: SaleEvent) -> DomainResult<SaleEvent> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<SaleEvent> {
            let conn = db.get_connection()?;
            insert_sale_event(&conn, &event).map_err(map_sql_error)?;
            Ok(event)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl SaleEventStore for SqliteSaleEventStore {
    async fn events_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[SaleStatus],
    ) -> DomainResult<Vec<SaleEvent>> {
        if statuses.is_empty() {
            return Err(PaceLedgerError::validation("statuses", "must not be empty"));
        }
        let db = Arc::clone(&self.db);
        let statuses: Vec<String> =
            statuses.iter().map(|s| s.as_str().to_string()).collect();

        task::spawn_blocking(move || -> DomainResult<Vec<SaleEvent>> {
            let conn = db.get_connection()?;
            query_events(&conn, org_id, person_id, start, end, &statuses).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_sale_event_row(row: &Row) -> rusqlite::Result<SaleEvent> {
    let status: String = row.get(6)?;
    let status = SaleStatus::parse(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("unknown sale status '{status}'").into(),
        )
    })?;
    Ok(SaleEvent {
        id: uuid_value(row, 0)?,
        org_id: uuid_value(row, 1)?,
        person_id: uuid_value(row, 2)?,
        line_of_business: row.get(3)?,
        premium: row.get(4)?,
        date_sold: date_value(row, 5)?,
        status,
    })
}

fn insert_sale_event(conn: &Connection, event: &SaleEvent) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO sale_events (
            id, org_id, person_id, line_of_business, premium, date_sold, status
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.id.to_string(),
            event.org_id.to_string(),
            event.person_id.to_string(),
            event.line_of_business,
            event.premium,
            event.date_sold.to_string(),
            event.status.as_str(),
        ],
    )?;
    Ok(())
}

fn query_events(
    conn: &Connection,
    org_id: Uuid,
    person_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    statuses: &[String],
) -> rusqlite::Result<Vec<SaleEvent>> {
    let placeholders =
        (0..statuses.len()).map(|i| format!("?{}", i + 5)).collect::<Vec<_>>().join(", ");
    let sql = format!(
        "SELECT id, org_id, person_id, line_of_business, premium, date_sold, status
         FROM sale_events
         WHERE org_id = ?1 AND person_id = ?2
           AND date_sold >= ?3 AND date_sold <= ?4
           AND status IN ({placeholders})
         ORDER BY date_sold ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let mut values: Vec<String> = vec![
        org_id.to_string(),
        person_id.to_string(),
        start.to_string(),
        end.to_string(),
    ];
    values.extend(statuses.iter().cloned());

    let rows = stmt.query_map(params_from_iter(values.iter()), map_sale_event_row)?;
    rows.collect()
}
