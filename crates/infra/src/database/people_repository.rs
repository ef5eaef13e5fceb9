//! People and role directory backed by SQLite

use std::sync::Arc;

use async_trait::async_trait;
use paceledger_core::PersonDirectory;
use paceledger_domain::{Person, Result as DomainResult, Role};
use rusqlite::{params, Connection, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::sql::uuid_value;
use crate::errors::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `PersonDirectory`
pub struct SqlitePersonDirectory {
    db: Arc<DbManager>,
}

impl SqlitePersonDirectory {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace a person record
    pub async fn upsert_person(&self, person: Person) -> DomainResult<Person> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Person> {
            let conn = db.get_connection()?;
            insert_person(&conn, &person).map_err(map_sql_error)?;
            Ok(person)
        })
        .await
        .map_err(map_join_error)?
    }

    /// Insert or replace a role record
    pub async fn upsert_role(&self, role: Role) -> DomainResult<Role> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Role> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO roles (id, org_id, name) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![role.id.to_string(), role.org_id.to_string(), role.name],
            )
            .map_err(map_sql_error)?;
            Ok(role)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl PersonDirectory for SqlitePersonDirectory {
    async fn person(&self, org_id: Uuid, person_id: Uuid) -> DomainResult<Option<Person>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Person>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT id, org_id, name, role_id, active
                 FROM people WHERE org_id = ?1 AND id = ?2",
                params![org_id.to_string(), person_id.to_string()],
                map_person_row,
            );
            match result {
                Ok(person) => Ok(Some(person)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn active_people(&self, org_id: Uuid) -> DomainResult<Vec<Person>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Person>> {
            let conn = db.get_connection()?;
            query_active_people(&conn, org_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn role(&self, org_id: Uuid, role_id: Uuid) -> DomainResult<Option<Role>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Role>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT id, org_id, name FROM roles WHERE org_id = ?1 AND id = ?2",
                params![org_id.to_string(), role_id.to_string()],
                |row| {
                    Ok(Role {
                        id: uuid_value(row, 0)?,
                        org_id: uuid_value(row, 1)?,
                        name: row.get(2)?,
                    })
                },
            );
            match result {
                Ok(role) => Ok(Some(role)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_person_row(row: &Row) -> rusqlite::Result<Person> {
    let role_id: Option<String> = row.get(3)?;
    let role_id = role_id
        .map(|s| {
            Uuid::parse_str(&s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })
        })
        .transpose()?;
    Ok(Person {
        id: uuid_value(row, 0)?,
        org_id: uuid_value(row, 1)?,
        name: row.get(2)?,
        role_id,
        active: row.get(4)?,
    })
}

fn insert_person(conn: &Connection, person: &Person) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO people (id, org_id, name, role_id, active)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            role_id = excluded.role_id,
            active = excluded.active",
        params![
            person.id.to_string(),
            person.org_id.to_string(),
            person.name,
            person.role_id.map(|id| id.to_string()),
            person.active,
        ],
    )?;
    Ok(())
}

fn query_active_people(conn: &Connection, org_id: Uuid) -> rusqlite::Result<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT id, org_id, name, role_id, active
         FROM people
         WHERE org_id = ?1 AND active = 1
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map(params![org_id.to_string()], map_person_row)?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(&db_path, 4).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        (Arc::new(manager), temp_dir)
    }

    fn test_person(org_id: Uuid, name: &str, role_id: Option<Uuid>) -> Person {
        Person { id: Uuid::new_v4(), org_id, name: name.into(), role_id, active: true }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_and_fetch_person() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqlitePersonDirectory::new(db);
        let org = Uuid::new_v4();
        let person = test_person(org, "Alice Brook", None);

        repo.upsert_person(person.clone()).await.expect("save person");

        let fetched = repo.person(org, person.id).await.expect("fetch person");
        let fetched = fetched.expect("person present");
        assert_eq!(fetched.name, "Alice Brook");
        assert!(fetched.active);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn active_people_excludes_inactive_and_other_orgs() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqlitePersonDirectory::new(db);
        let org = Uuid::new_v4();

        let mut inactive = test_person(org, "Gone Person", None);
        inactive.active = false;
        repo.upsert_person(inactive).await.expect("save inactive");
        repo.upsert_person(test_person(org, "Alice Brook", None)).await.expect("save active");
        repo.upsert_person(test_person(Uuid::new_v4(), "Other Org", None))
            .await
            .expect("save other org");

        let people = repo.active_people(org).await.expect("list people");
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Alice Brook");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn role_lookup_round_trips() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqlitePersonDirectory::new(db);
        let org = Uuid::new_v4();
        let role = Role { id: Uuid::new_v4(), org_id: org, name: "Account Rep".into() };

        repo.upsert_role(role.clone()).await.expect("save role");

        let fetched = repo.role(org, role.id).await.expect("fetch role").expect("role present");
        assert_eq!(fetched.name, "Account Rep");

        let missing = repo.role(org, Uuid::new_v4()).await.expect("fetch missing");
        assert!(missing.is_none());
    }
}
