//! Internal helpers shared by core services

use paceledger_common::CommonError;
use paceledger_domain::PaceLedgerError;

/// Map foundation-level errors into the application taxonomy
pub(crate) fn from_common(err: CommonError) -> PaceLedgerError {
    match err {
        CommonError::Validation { field, message } => {
            PaceLedgerError::Validation { field, message }
        }
        CommonError::NotFound { resource_type, identifier } => match identifier {
            Some(id) => PaceLedgerError::NotFound(format!("{resource_type} '{id}'")),
            None => PaceLedgerError::NotFound(resource_type),
        },
        CommonError::Storage { message, .. } => PaceLedgerError::Database(message),
        CommonError::Serialization { message, .. } | CommonError::Internal { message, .. } => {
            PaceLedgerError::Internal(message)
        }
    }
}
