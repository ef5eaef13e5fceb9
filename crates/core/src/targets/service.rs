//! Target cascade service - core business logic

use std::sync::Arc;

use paceledger_domain::{
    PersonOverride, PremiumBreakdown, PremiumMode, ResolvedTargets, Result, RoleExpectation,
    TargetSource, Viewer,
};
use tracing::info;
use uuid::Uuid;

use super::ports::{PersonOverrideStore, RoleExpectationStore};
use super::validate::{validate_person_override, validate_role_expectation};
use super::validate::{PersonOverrideInput, RoleExpectationInput};
use crate::access::require_manage_comp;

/// Resolves effective monthly targets and owns target writes
pub struct TargetService {
    expectations: Arc<dyn RoleExpectationStore>,
    overrides: Arc<dyn PersonOverrideStore>,
}

impl TargetService {
    pub fn new(
        expectations: Arc<dyn RoleExpectationStore>,
        overrides: Arc<dyn PersonOverrideStore>,
    ) -> Self {
        Self { expectations, overrides }
    }

    /// Resolve the effective monthly targets for one person
    pub async fn resolve_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<ResolvedTargets> {
        let role = match role_id {
            Some(role_id) => self.expectations.expectation_for_role(org_id, role_id).await?,
            None => None,
        };
        let record = self.overrides.override_for_person(org_id, person_id).await?;
        Ok(resolve_cascade(role.as_ref(), record.as_ref()))
    }

    /// Validate and persist a role expectation (admin/owner only)
    pub async fn set_role_expectation(
        &self,
        viewer: &Viewer,
        input: RoleExpectationInput,
    ) -> Result<RoleExpectation> {
        require_manage_comp(viewer)?;
        let expectation = validate_role_expectation(viewer.org_id, input)?;
        let saved = self.expectations.upsert_expectation(expectation).await?;
        info!(role_id = %saved.role_id, "role expectation saved");
        Ok(saved)
    }

    /// Validate and persist a person override (admin/owner only)
    pub async fn set_person_override(
        &self,
        viewer: &Viewer,
        input: PersonOverrideInput,
    ) -> Result<PersonOverride> {
        require_manage_comp(viewer)?;
        let record = validate_person_override(viewer.org_id, input)?;
        let saved = self.overrides.upsert_override(record).await?;
        info!(person_id = %saved.person_id, "person override saved");
        Ok(saved)
    }
}

/// Pure cascade resolution: override field, else role value, else zero.
///
/// Each headline field falls back independently; the breakdown follows the
/// override mode when one is set, the role's bucket goals otherwise.
/// `source` records the highest level that contributed anything.
pub fn resolve_cascade(
    role: Option<&RoleExpectation>,
    record: Option<&PersonOverride>,
) -> ResolvedTargets {
    let apps_target = record
        .and_then(|o| o.monthly_apps_override)
        .map(f64::from)
        .or_else(|| role.map(|r| f64::from(r.monthly_apps_target())))
        .unwrap_or(0.0);

    let premium_target = record
        .and_then(|o| o.monthly_premium_override)
        .or_else(|| role.map(RoleExpectation::monthly_premium_target))
        .unwrap_or(0.0);

    let premium_breakdown = match record.and_then(|o| o.premium_mode_override) {
        Some(PremiumMode::Bucket) => record
            .and_then(|o| o.premium_by_bucket_override)
            .map(PremiumBreakdown::Bucket),
        Some(PremiumMode::Lob) => record
            .and_then(|o| o.premium_by_lob_override.clone())
            .map(PremiumBreakdown::Lob),
        None => role.map(|r| PremiumBreakdown::Bucket(r.premium_by_bucket)),
    };

    let source = if record.is_some_and(PersonOverride::any_set) {
        TargetSource::Override
    } else if role.is_some() {
        TargetSource::Role
    } else {
        TargetSource::None
    };

    ResolvedTargets { apps_target, premium_target, premium_breakdown, source }
}
