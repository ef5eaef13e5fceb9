//! Target storage backed by SQLite
//!
//! Role expectations and person overrides keep their structured fields in
//! JSON columns; the cascade itself lives in the core services.

use std::sync::Arc;

use async_trait::async_trait;
use paceledger_core::{PersonOverrideStore, RoleExpectationStore};
use paceledger_domain::{
    PersonOverride, PremiumMode, Result as DomainResult, RoleExpectation,
};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::{json_value, opt_json_value, uuid_value};
use crate::errors::{map_join_error, map_json_error, map_sql_error};

/// SQLite-backed implementation of `RoleExpectationStore`
pub struct SqliteRoleExpectationStore {
    db: Arc<DbManager>,
}

impl SqliteRoleExpectationStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleExpectationStore for SqliteRoleExpectationStore {
    async fn expectation_for_role(
        &self,
        org_id: Uuid,
        role_id: Uuid,
    ) -> DomainResult<Option<RoleExpectation>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<RoleExpectation>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT org_id, role_id, apps_goals_json, premium_by_bucket_json,
                        activity_targets_json
                 FROM role_expectations
                 WHERE org_id = ?1 AND role_id = ?2",
                params![org_id.to_string(), role_id.to_string()],
                map_expectation_row,
            );
            match result {
                Ok(expectation) => Ok(Some(expectation)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_expectation(
        &self,
        expectation: RoleExpectation,
    ) -> DomainResult<RoleExpectation> {
        let db = Arc::clone(&self.db);
        let apps_goals = serde_json::to_string(&expectation.apps_goals_by_lob)
            .map_err(map_json_error)?;
        let premium_by_bucket =
            serde_json::to_string(&expectation.premium_by_bucket).map_err(map_json_error)?;
        let activity_targets =
            serde_json::to_string(&expectation.activity_targets).map_err(map_json_error)?;

        task::spawn_blocking(move || -> DomainResult<RoleExpectation> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO role_expectations (
                    org_id, role_id, apps_goals_json, premium_by_bucket_json,
                    activity_targets_json
                 ) VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(org_id, role_id) DO UPDATE SET
                    apps_goals_json = excluded.apps_goals_json,
                    premium_by_bucket_json = excluded.premium_by_bucket_json,
                    activity_targets_json = excluded.activity_targets_json",
                params![
                    expectation.org_id.to_string(),
                    expectation.role_id.to_string(),
                    apps_goals,
                    premium_by_bucket,
                    activity_targets,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(expectation)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// SQLite-backed implementation of `PersonOverrideStore`
pub struct SqlitePersonOverrideStore {
    db: Arc<DbManager>,
}

impl SqlitePersonOverrideStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonOverrideStore for SqlitePersonOverrideStore {
    async fn override_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
    ) -> DomainResult<Option<PersonOverride>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<PersonOverride>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT org_id, person_id, monthly_apps_override, monthly_premium_override,
                        premium_mode_override, premium_by_lob_json, premium_by_bucket_json
                 FROM person_overrides
                 WHERE org_id = ?1 AND person_id = ?2",
                params![org_id.to_string(), person_id.to_string()],
                map_override_row,
            );
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert_override(&self, record: PersonOverride) -> DomainResult<PersonOverride> {
        let db = Arc::clone(&self.db);
        let by_lob = record
            .premium_by_lob_override
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(map_json_error)?;
        let by_bucket = record
            .premium_by_bucket_override
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(map_json_error)?;

        task::spawn_blocking(move || -> DomainResult<PersonOverride> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO person_overrides (
                    org_id, person_id, monthly_apps_override, monthly_premium_override,
                    premium_mode_override, premium_by_lob_json, premium_by_bucket_json
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(org_id, person_id) DO UPDATE SET
                    monthly_apps_override = excluded.monthly_apps_override,
                    monthly_premium_override = excluded.monthly_premium_override,
                    premium_mode_override = excluded.premium_mode_override,
                    premium_by_lob_json = excluded.premium_by_lob_json,
                    premium_by_bucket_json = excluded.premium_by_bucket_json",
                params![
                    record.org_id.to_string(),
                    record.person_id.to_string(),
                    record.monthly_apps_override,
                    record.monthly_premium_override,
                    record.premium_mode_override.map(|m| m.as_str()),
                    by_lob,
                    by_bucket,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(record)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_expectation_row(row: &Row) -> rusqlite::Result<RoleExpectation> {
    Ok(RoleExpectation {
        org_id: uuid_value(row, 0)?,
        role_id: uuid_value(row, 1)?,
        apps_goals_by_lob: json_value(row, 2)?,
        premium_by_bucket: json_value(row, 3)?,
        activity_targets: json_value(row, 4)?,
    })
}

fn map_override_row(row: &Row) -> rusqlite::Result<PersonOverride> {
    let mode: Option<String> = row.get(4)?;
    let premium_mode_override = mode
        .map(|raw| match raw.as_str() {
            "LOB" => Ok(PremiumMode::Lob),
            "BUCKET" => Ok(PremiumMode::Bucket),
            other => Err(rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("unknown premium mode '{other}'").into(),
            )),
        })
        .transpose()?;
    Ok(PersonOverride {
        org_id: uuid_value(row, 0)?,
        person_id: uuid_value(row, 1)?,
        monthly_apps_override: row.get(2)?,
        monthly_premium_override: row.get(3)?,
        premium_mode_override,
        premium_by_lob_override: opt_json_value(row, 5)?,
        premium_by_bucket_override: opt_json_value(row, 6)?,
    })
}
