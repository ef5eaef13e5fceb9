//! Report snapshot storage backed by SQLite
//!
//! Payloads are stored as rendered JSON text and returned verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use paceledger_core::SnapshotStore;
use paceledger_domain::{ReportSnapshot, Result as DomainResult, SnapshotMeta};
use rusqlite::{params, Connection, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{datetime_value, json_value, uuid_value};
use crate::errors::{map_join_error, map_json_error, map_sql_error};

/// SQLite-backed implementation of `SnapshotStore`
pub struct SqliteSnapshotStore {
    db: Arc<DbManager>,
}

impl SqliteSnapshotStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn save(&self, org_id: Uuid, snapshot: ReportSnapshot) -> DomainResult<ReportSnapshot> {
        let db = Arc::clone(&self.db);
        let payload = serde_json::to_string(&snapshot.payload).map_err(map_json_error)?;

        task::spawn_blocking(move || -> DomainResult<ReportSnapshot> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO report_snapshots (
                    id, org_id, report_type, start_iso, end_iso, statuses_csv,
                    payload_json, title, generated_at, version
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    snapshot.id.to_string(),
                    org_id.to_string(),
                    snapshot.report_type,
                    snapshot.start_iso,
                    snapshot.end_iso,
                    snapshot.statuses_csv,
                    payload,
                    snapshot.title,
                    snapshot.meta.generated_at.to_rfc3339(),
                    snapshot.meta.version,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(snapshot)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(
        &self,
        org_id: Uuid,
        snapshot_id: Uuid,
    ) -> DomainResult<Option<ReportSnapshot>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<ReportSnapshot>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT id, report_type, start_iso, end_iso, statuses_csv,
                        payload_json, title, generated_at, version
                 FROM report_snapshots
                 WHERE org_id = ?1 AND id = ?2",
                params![org_id.to_string(), snapshot_id.to_string()],
                map_snapshot_row,
            );
            match result {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, org_id: Uuid) -> DomainResult<Vec<ReportSnapshot>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<ReportSnapshot>> {
            let conn = db.get_connection()?;
            query_snapshots(&conn, org_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_snapshot_row(row: &Row) -> rusqlite::Result<ReportSnapshot> {
    Ok(ReportSnapshot {
        id: uuid_value(row, 0)?,
        report_type: row.get(1)?,
        start_iso: row.get(2)?,
        end_iso: row.get(3)?,
        statuses_csv: row.get(4)?,
        payload: json_value(row, 5)?,
        title: row.get(6)?,
        meta: SnapshotMeta { generated_at: datetime_value(row, 7)?, version: row.get(8)? },
    })
}

fn query_snapshots(conn: &Connection, org_id: Uuid) -> rusqlite::Result<Vec<ReportSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, report_type, start_iso, end_iso, statuses_csv,
                payload_json, title, generated_at, version
         FROM report_snapshots
         WHERE org_id = ?1
         ORDER BY generated_at DESC",
    )?;
    let rows = stmt.query_map(params![org_id.to_string()], map_snapshot_row)?;
    rows.collect()
}
