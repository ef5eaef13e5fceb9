//! Port interfaces for the rollup aggregator
//!
//! These traits define the boundaries between core business logic and
//! infrastructure implementations. Read paths are org-scoped; write paths
//! exist only where an administrative operation owns the record type.

use async_trait::async_trait;
use chrono::NaiveDate;
use paceledger_domain::{
    CommissionRate, CompensationPlan, ExternalMonthlyResult, MonthlyManualInput, Person, Result,
    Role, SaleEvent, SaleStatus,
};
use uuid::Uuid;

/// Read-only access to the externally produced sale-event feed
#[async_trait]
pub trait SaleEventStore: Send + Sync {
    /// Sale events for one person within `[start, end]` whose status is in
    /// the allow-list
    async fn events_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[SaleStatus],
    ) -> Result<Vec<SaleEvent>>;
}

/// Commission-rate records, effective-dated per `(org, line_of_business)`
#[async_trait]
pub trait CommissionRateStore: Send + Sync {
    /// Every rate record for the org, across all lines of business
    async fn rates_for_org(&self, org_id: Uuid) -> Result<Vec<CommissionRate>>;

    /// Insert or replace a rate record atomically with the overlap check
    /// for its `(org, line_of_business)` scope
    async fn upsert_rate(&self, rate: CommissionRate) -> Result<CommissionRate>;
}

/// Salary-plan records, effective-dated per `(org, person)`
#[async_trait]
pub trait CompensationPlanStore: Send + Sync {
    async fn plans_for_person(&self, org_id: Uuid, person_id: Uuid)
        -> Result<Vec<CompensationPlan>>;

    /// Insert or replace a plan record atomically with the overlap check
    /// for its `(org, person)` scope
    async fn upsert_plan(&self, plan: CompensationPlan) -> Result<CompensationPlan>;
}

/// Hand-entered monthly cost figures
#[async_trait]
pub trait ManualInputStore: Send + Sync {
    async fn input_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> Result<Option<MonthlyManualInput>>;

    /// Idempotent upsert keyed by `(org, person, month)`
    async fn upsert_input(&self, input: MonthlyManualInput) -> Result<MonthlyManualInput>;
}

/// Externally computed commission earnings, read-only
#[async_trait]
pub trait ExternalResultStore: Send + Sync {
    async fn result_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> Result<Option<ExternalMonthlyResult>>;
}

/// People and roles within an org
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn person(&self, org_id: Uuid, person_id: Uuid) -> Result<Option<Person>>;

    /// Active people, the population of office-level reports
    async fn active_people(&self, org_id: Uuid) -> Result<Vec<Person>>;

    async fn role(&self, org_id: Uuid, role_id: Uuid) -> Result<Option<Role>>;
}
