//! In-memory mock implementations of the core ports
//!
//! Deterministic stand-ins for the persistence layer. The rate store runs
//! the same overlap validation as the real repository so admin-write tests
//! exercise the full check-then-write path; the plan store accepts
//! overlapping intervals just as the real one does.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use paceledger_core::temporal::validate_no_overlap;
use paceledger_core::{
    CommissionRateStore, CompensationPlanStore, ExternalResultStore, ManualInputStore,
    PersonDirectory, PersonOverrideStore, RoleExpectationStore, SaleEventStore, SnapshotStore,
};
use paceledger_domain::{
    CommissionRate, CompensationPlan, ExternalMonthlyResult, MonthlyManualInput, Person,
    PersonOverride, ReportSnapshot, Result, Role, RoleExpectation, SaleEvent, SaleStatus, Viewer,
};
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn admin_viewer(org_id: Uuid) -> Viewer {
    Viewer {
        org_id,
        person_id: Uuid::new_v4(),
        is_admin: true,
        is_owner: false,
        is_manager: false,
    }
}

pub fn manager_viewer(org_id: Uuid) -> Viewer {
    Viewer {
        org_id,
        person_id: Uuid::new_v4(),
        is_admin: false,
        is_owner: false,
        is_manager: true,
    }
}

pub fn person(org_id: Uuid, name: &str, role_id: Option<Uuid>) -> Person {
    Person { id: Uuid::new_v4(), org_id, name: name.into(), role_id, active: true }
}

pub fn sale(
    org_id: Uuid,
    person_id: Uuid,
    lob: &str,
    premium: f64,
    sold: NaiveDate,
) -> SaleEvent {
    SaleEvent {
        id: Uuid::new_v4(),
        org_id,
        person_id,
        line_of_business: lob.into(),
        premium,
        date_sold: sold,
        status: SaleStatus::Issued,
    }
}

#[derive(Default, Clone)]
pub struct MockSaleEventStore {
    events: Arc<RwLock<Vec<SaleEvent>>>,
}

impl MockSaleEventStore {
    pub fn new(events: Vec<SaleEvent>) -> Self {
        Self { events: Arc::new(RwLock::new(events)) }
    }
}

#[async_trait]
impl SaleEventStore for MockSaleEventStore {
    async fn events_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[SaleStatus],
    ) -> Result<Vec<SaleEvent>> {
        Ok(self
            .events
            .read()
            .iter()
            .filter(|e| {
                e.org_id == org_id
                    && e.person_id == person_id
                    && e.date_sold >= start
                    && e.date_sold <= end
                    && statuses.contains(&e.status)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct MockCommissionRateStore {
    rates: Arc<RwLock<Vec<CommissionRate>>>,
}

impl MockCommissionRateStore {
    pub fn new(rates: Vec<CommissionRate>) -> Self {
        Self { rates: Arc::new(RwLock::new(rates)) }
    }
}

#[async_trait]
impl CommissionRateStore for MockCommissionRateStore {
    async fn rates_for_org(&self, org_id: Uuid) -> Result<Vec<CommissionRate>> {
        Ok(self.rates.read().iter().filter(|r| r.org_id == org_id).cloned().collect())
    }

    async fn upsert_rate(&self, rate: CommissionRate) -> Result<CommissionRate> {
        let mut rates = self.rates.write();
        let scoped: Vec<CommissionRate> = rates
            .iter()
            .filter(|r| r.org_id == rate.org_id && r.line_of_business == rate.line_of_business)
            .cloned()
            .collect();
        validate_no_overlap(&scoped, rate.effective_start, rate.effective_end)?;
        rates.retain(|r| {
            !(r.org_id == rate.org_id
                && r.line_of_business == rate.line_of_business
                && r.effective_start == rate.effective_start)
        });
        rates.push(rate.clone());
        Ok(rate)
    }
}

#[derive(Default, Clone)]
pub struct MockCompensationPlanStore {
    plans: Arc<RwLock<Vec<CompensationPlan>>>,
}

impl MockCompensationPlanStore {
    pub fn new(plans: Vec<CompensationPlan>) -> Self {
        Self { plans: Arc::new(RwLock::new(plans)) }
    }
}

#[async_trait]
impl CompensationPlanStore for MockCompensationPlanStore {
    async fn plans_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
    ) -> Result<Vec<CompensationPlan>> {
        Ok(self
            .plans
            .read()
            .iter()
            .filter(|p| p.org_id == org_id && p.person_id == person_id)
            .cloned()
            .collect())
    }

    async fn upsert_plan(&self, plan: CompensationPlan) -> Result<CompensationPlan> {
        if plan.effective_end.is_some_and(|end| end < plan.effective_start) {
            return Err(paceledger_domain::PaceLedgerError::validation(
                "effectiveEnd",
                "must be on or after effectiveStart",
            ));
        }
        let mut plans = self.plans.write();
        plans.retain(|p| {
            !(p.org_id == plan.org_id
                && p.person_id == plan.person_id
                && p.effective_start == plan.effective_start)
        });
        plans.push(plan.clone());
        Ok(plan)
    }
}

#[derive(Default, Clone)]
pub struct MockManualInputStore {
    inputs: Arc<RwLock<Vec<MonthlyManualInput>>>,
}

impl MockManualInputStore {
    pub fn new(inputs: Vec<MonthlyManualInput>) -> Self {
        Self { inputs: Arc::new(RwLock::new(inputs)) }
    }
}

#[async_trait]
impl ManualInputStore for MockManualInputStore {
    async fn input_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> Result<Option<MonthlyManualInput>> {
        Ok(self
            .inputs
            .read()
            .iter()
            .find(|i| i.org_id == org_id && i.person_id == person_id && i.month == month)
            .cloned())
    }

    async fn upsert_input(&self, input: MonthlyManualInput) -> Result<MonthlyManualInput> {
        let mut inputs = self.inputs.write();
        inputs.retain(|i| {
            !(i.org_id == input.org_id
                && i.person_id == input.person_id
                && i.month == input.month)
        });
        inputs.push(input.clone());
        Ok(input)
    }
}

#[derive(Default, Clone)]
pub struct MockExternalResultStore {
    results: Arc<RwLock<Vec<ExternalMonthlyResult>>>,
}

impl MockExternalResultStore {
    pub fn new(results: Vec<ExternalMonthlyResult>) -> Self {
        Self { results: Arc::new(RwLock::new(results)) }
    }
}

#[async_trait]
impl ExternalResultStore for MockExternalResultStore {
    async fn result_for_month(
        &self,
        org_id: Uuid,
        person_id: Uuid,
        month: NaiveDate,
    ) -> Result<Option<ExternalMonthlyResult>> {
        Ok(self
            .results
            .read()
            .iter()
            .find(|r| r.org_id == org_id && r.person_id == person_id && r.month == month)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct MockPersonDirectory {
    people: Arc<RwLock<Vec<Person>>>,
    roles: Arc<RwLock<Vec<Role>>>,
}

impl MockPersonDirectory {
    pub fn new(people: Vec<Person>, roles: Vec<Role>) -> Self {
        Self { people: Arc::new(RwLock::new(people)), roles: Arc::new(RwLock::new(roles)) }
    }
}

#[async_trait]
impl PersonDirectory for MockPersonDirectory {
    async fn person(&self, org_id: Uuid, person_id: Uuid) -> Result<Option<Person>> {
        Ok(self
            .people
            .read()
            .iter()
            .find(|p| p.org_id == org_id && p.id == person_id)
            .cloned())
    }

    async fn active_people(&self, org_id: Uuid) -> Result<Vec<Person>> {
        Ok(self
            .people
            .read()
            .iter()
            .filter(|p| p.org_id == org_id && p.active)
            .cloned()
            .collect())
    }

    async fn role(&self, org_id: Uuid, role_id: Uuid) -> Result<Option<Role>> {
        Ok(self.roles.read().iter().find(|r| r.org_id == org_id && r.id == role_id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct MockRoleExpectationStore {
    expectations: Arc<RwLock<Vec<RoleExpectation>>>,
}

impl MockRoleExpectationStore {
    pub fn new(expectations: Vec<RoleExpectation>) -> Self {
        Self { expectations: Arc::new(RwLock::new(expectations)) }
    }
}

#[async_trait]
impl RoleExpectationStore for MockRoleExpectationStore {
    async fn expectation_for_role(
        &self,
        org_id: Uuid,
        role_id: Uuid,
    ) -> Result<Option<RoleExpectation>> {
        Ok(self
            .expectations
            .read()
            .iter()
            .find(|e| e.org_id == org_id && e.role_id == role_id)
            .cloned())
    }

    async fn upsert_expectation(&self, expectation: RoleExpectation) -> Result<RoleExpectation> {
        let mut expectations = self.expectations.write();
        expectations
            .retain(|e| !(e.org_id == expectation.org_id && e.role_id == expectation.role_id));
        expectations.push(expectation.clone());
        Ok(expectation)
    }
}

#[derive(Default, Clone)]
pub struct MockPersonOverrideStore {
    overrides: Arc<RwLock<Vec<PersonOverride>>>,
}

impl MockPersonOverrideStore {
    pub fn new(overrides: Vec<PersonOverride>) -> Self {
        Self { overrides: Arc::new(RwLock::new(overrides)) }
    }
}

#[async_trait]
impl PersonOverrideStore for MockPersonOverrideStore {
    async fn override_for_person(
        &self,
        org_id: Uuid,
        person_id: Uuid,
    ) -> Result<Option<PersonOverride>> {
        Ok(self
            .overrides
            .read()
            .iter()
            .find(|o| o.org_id == org_id && o.person_id == person_id)
            .cloned())
    }

    async fn upsert_override(&self, record: PersonOverride) -> Result<PersonOverride> {
        let mut overrides = self.overrides.write();
        overrides.retain(|o| !(o.org_id == record.org_id && o.person_id == record.person_id));
        overrides.push(record.clone());
        Ok(record)
    }
}

#[derive(Default, Clone)]
pub struct MockSnapshotStore {
    snapshots: Arc<RwLock<Vec<(Uuid, ReportSnapshot)>>>,
}

#[async_trait]
impl SnapshotStore for MockSnapshotStore {
    async fn save(&self, org_id: Uuid, snapshot: ReportSnapshot) -> Result<ReportSnapshot> {
        self.snapshots.write().insert(0, (org_id, snapshot.clone()));
        Ok(snapshot)
    }

    async fn get(&self, org_id: Uuid, snapshot_id: Uuid) -> Result<Option<ReportSnapshot>> {
        Ok(self
            .snapshots
            .read()
            .iter()
            .find(|(org, s)| *org == org_id && s.id == snapshot_id)
            .map(|(_, s)| s.clone()))
    }

    async fn list(&self, org_id: Uuid) -> Result<Vec<ReportSnapshot>> {
        Ok(self
            .snapshots
            .read()
            .iter()
            .filter(|(org, _)| *org == org_id)
            .map(|(_, s)| s.clone())
            .collect())
    }
}
