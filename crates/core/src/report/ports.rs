//! Port interfaces for report snapshots

use async_trait::async_trait;
use paceledger_domain::{ReportSnapshot, Result};
use uuid::Uuid;

/// Verbatim storage for rendered report payloads.
///
/// Snapshots are write-once: stored payloads are returned exactly as
/// saved, never recomputed.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, org_id: Uuid, snapshot: ReportSnapshot) -> Result<ReportSnapshot>;

    async fn get(&self, org_id: Uuid, snapshot_id: Uuid) -> Result<Option<ReportSnapshot>>;

    /// Snapshots for the org, most recent first
    async fn list(&self, org_id: Uuid) -> Result<Vec<ReportSnapshot>>;
}
