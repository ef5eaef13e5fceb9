//! Viewer permission gates
//!
//! Authentication happens upstream; these checks only translate the
//! viewer's permission flags into `Forbidden` errors with a consistent
//! message shape.

use paceledger_domain::{PaceLedgerError, Result, Viewer};

/// Reports and rollups require admin, owner, or manager
pub fn require_view_reports(viewer: &Viewer) -> Result<()> {
    if viewer.can_view_reports() {
        Ok(())
    } else {
        Err(PaceLedgerError::Forbidden(
            "viewing reports requires admin, owner, or manager access".into(),
        ))
    }
}

/// Rate, plan, and target writes require admin or owner
pub fn require_manage_comp(viewer: &Viewer) -> Result<()> {
    if viewer.can_manage_comp() {
        Ok(())
    } else {
        Err(PaceLedgerError::Forbidden(
            "managing compensation requires admin or owner access".into(),
        ))
    }
}
