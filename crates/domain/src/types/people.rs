//! People, roles, and the request viewer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A salesperson (or manager) belonging to an org
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub role_id: Option<Uuid>,
    /// Whether the person appears in office-level benchmark reports
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A role within the org (e.g. "Team Lead", "Account Rep")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
}

/// Identity and permission flags for the requesting user.
///
/// Supplied by the upstream permission resolver; the core trusts this input
/// and performs no authentication itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewer {
    pub org_id: Uuid,
    pub person_id: Uuid,
    pub is_admin: bool,
    pub is_owner: bool,
    pub is_manager: bool,
}

impl Viewer {
    /// Read access to reports: admin, owner, or manager
    pub fn can_view_reports(&self) -> bool {
        self.is_admin || self.is_owner || self.is_manager
    }

    /// Write access to rates, plans, and target overrides
    pub fn can_manage_comp(&self) -> bool {
        self.is_admin || self.is_owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(is_admin: bool, is_owner: bool, is_manager: bool) -> Viewer {
        Viewer {
            org_id: Uuid::new_v4(),
            person_id: Uuid::new_v4(),
            is_admin,
            is_owner,
            is_manager,
        }
    }

    #[test]
    fn manager_can_view_but_not_manage() {
        let v = viewer(false, false, true);
        assert!(v.can_view_reports());
        assert!(!v.can_manage_comp());
    }

    #[test]
    fn plain_member_can_do_neither() {
        let v = viewer(false, false, false);
        assert!(!v.can_view_reports());
        assert!(!v.can_manage_comp());
    }
}
