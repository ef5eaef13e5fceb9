//! Application context - dependency injection container

use std::sync::Arc;

use paceledger_core::{
    CommissionRateStore, CompAdminService, CompensationPlanStore, ExternalResultStore,
    ManualInputStore, PersonDirectory, PersonOverrideStore, ReportService, RoleExpectationStore,
    RollupService, SaleEventStore, SnapshotStore, TargetService,
};
use paceledger_domain::{Config, Result};
use paceledger_infra::{
    DbManager, SqliteCommissionRateStore, SqliteCompensationPlanStore, SqliteExternalResultStore,
    SqliteManualInputStore, SqlitePersonDirectory, SqlitePersonOverrideStore,
    SqliteRoleExpectationStore, SqliteSaleEventStore, SqliteSnapshotStore,
};
use tracing::info;

/// Application context - holds the configured services and the database
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub people: Arc<dyn PersonDirectory>,
    pub rollup: Arc<RollupService>,
    pub targets: Arc<TargetService>,
    pub comp_admin: Arc<CompAdminService>,
    pub reports: Arc<ReportService>,
}

impl AppContext {
    /// Build the full service graph over one SQLite pool.
    ///
    /// Runs migrations before any repository is handed out.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let sales: Arc<dyn SaleEventStore> =
            Arc::new(SqliteSaleEventStore::new(Arc::clone(&db)));
        let rates: Arc<dyn CommissionRateStore> =
            Arc::new(SqliteCommissionRateStore::new(Arc::clone(&db)));
        let plans: Arc<dyn CompensationPlanStore> =
            Arc::new(SqliteCompensationPlanStore::new(Arc::clone(&db)));
        let manual: Arc<dyn ManualInputStore> =
            Arc::new(SqliteManualInputStore::new(Arc::clone(&db)));
        let external: Arc<dyn ExternalResultStore> =
            Arc::new(SqliteExternalResultStore::new(Arc::clone(&db)));
        let people: Arc<dyn PersonDirectory> =
            Arc::new(SqlitePersonDirectory::new(Arc::clone(&db)));
        let expectations: Arc<dyn RoleExpectationStore> =
            Arc::new(SqliteRoleExpectationStore::new(Arc::clone(&db)));
        let overrides: Arc<dyn PersonOverrideStore> =
            Arc::new(SqlitePersonOverrideStore::new(Arc::clone(&db)));
        let snapshots: Arc<dyn SnapshotStore> =
            Arc::new(SqliteSnapshotStore::new(Arc::clone(&db)));

        let rollup = Arc::new(RollupService::new(
            Arc::clone(&sales),
            Arc::clone(&rates),
            Arc::clone(&plans),
            Arc::clone(&manual),
            Arc::clone(&external),
            Arc::clone(&people),
        ));
        let targets =
            Arc::new(TargetService::new(Arc::clone(&expectations), Arc::clone(&overrides)));
        let comp_admin = Arc::new(CompAdminService::new(rates, plans, manual));
        let reports = Arc::new(ReportService::new(
            sales,
            Arc::clone(&people),
            expectations,
            Arc::clone(&targets),
            Arc::clone(&rollup),
            snapshots,
        ));

        info!(db_path = %db.path().display(), "application context initialised");

        Ok(Self { config, db, people, rollup, targets, comp_admin, reports })
    }
}
