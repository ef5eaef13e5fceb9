//! Port interfaces for target storage

use async_trait::async_trait;
use paceledger_domain::{PersonOverride, Result, RoleExpectation};
use uuid::Uuid;

/// Role-level monthly expectations, one record per `(org, role)`
#[async_trait]
pub trait RoleExpectationStore: Send + Sync {
    async fn expectation_for_role(
        &self,
        org_id: Uuid,
        role_id: Uuid,
    ) -> Result<Option<RoleExpectation>>;

    /// Idempotent upsert keyed by `(org, role)`
    async fn upsert_expectation(&self, expectation: RoleExpectation) -> Result<RoleExpectation>;
}

/// Person-level target overrides, one record per `(org, person)`
#[async_trait]
pub trait PersonOverrideStore: Send + Sync {
    async fn override_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
    ) -> Result<Option<PersonOverride>>;

    /// Idempotent upsert keyed by `(org, person)`
    async fn upsert_override(&self, record: PersonOverride) -> Result<PersonOverride>;
}
