//! Error mapping from infrastructure failures onto the application taxonomy

use paceledger_domain::PaceLedgerError;
use tokio::task::JoinError;

pub(crate) fn map_sql_error(err: rusqlite::Error) -> PaceLedgerError {
    PaceLedgerError::Database(format!("SQLite error: {err}"))
}

pub(crate) fn map_pool_error(err: r2d2::Error) -> PaceLedgerError {
    PaceLedgerError::Database(format!("Connection pool error: {err}"))
}

pub(crate) fn map_join_error(err: JoinError) -> PaceLedgerError {
    PaceLedgerError::Internal(format!("Task join error: {err}"))
}

pub(crate) fn map_json_error(err: serde_json::Error) -> PaceLedgerError {
    PaceLedgerError::Internal(format!("Stored JSON column invalid: {err}"))
}
