//! Performance targets: role expectations, person overrides, and the
//! resolved cascade outcome

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a premium target is broken down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiumMode {
    #[serde(rename = "LOB")]
    Lob,
    #[serde(rename = "BUCKET")]
    Bucket,
}

impl PremiumMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lob => "LOB",
            Self::Bucket => "BUCKET",
        }
    }
}

/// Monthly premium targets by coarse bucket.
///
/// `PC` (property/casualty) and `FS` (financial services) are required;
/// `IPS` (investment) is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BucketBreakdown {
    pub pc: f64,
    pub fs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<f64>,
}

impl BucketBreakdown {
    /// Total premium target across buckets
    pub fn total(&self) -> f64 {
        self.pc + self.fs + self.ips.unwrap_or(0.0)
    }
}

/// A premium target for one line of business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobPremium {
    pub lob_id: String,
    pub premium: f64,
}

/// A monthly application-count goal for one line of business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobAppsGoal {
    pub lob_id: String,
    pub apps: u32,
}

/// Per-field premium breakdown, tagged by mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum PremiumBreakdown {
    #[serde(rename = "BUCKET")]
    Bucket(BucketBreakdown),
    #[serde(rename = "LOB")]
    Lob(Vec<LobPremium>),
}

/// Role-level monthly expectations.
///
/// The headline apps and premium targets are derived, never stored: apps is
/// the sum of the per-LOB app goals and premium is the sum of the bucket
/// goals. Role expectations are always bucket-mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleExpectation {
    pub role_id: Uuid,
    pub org_id: Uuid,
    pub apps_goals_by_lob: Vec<LobAppsGoal>,
    pub premium_by_bucket: BucketBreakdown,
    /// Optional per-activity-type goals (calls, appointments, ...)
    #[serde(default)]
    pub activity_targets: Vec<ActivityTarget>,
}

impl RoleExpectation {
    /// Derived monthly application target (sum of per-LOB goals)
    pub fn monthly_apps_target(&self) -> u32 {
        self.apps_goals_by_lob.iter().map(|g| g.apps).sum()
    }

    /// Derived monthly premium target (sum of bucket goals)
    pub fn monthly_premium_target(&self) -> f64 {
        self.premium_by_bucket.total()
    }
}

/// A monthly goal for a non-sale activity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTarget {
    pub activity_type: String,
    pub monthly_target: u32,
}

/// Person-level target overrides. Every field is independent: a set field
/// overrides the role value for that field only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonOverride {
    pub person_id: Uuid,
    pub org_id: Uuid,
    pub monthly_apps_override: Option<u32>,
    pub monthly_premium_override: Option<f64>,
    pub premium_mode_override: Option<PremiumMode>,
    pub premium_by_lob_override: Option<Vec<LobPremium>>,
    pub premium_by_bucket_override: Option<BucketBreakdown>,
}

impl PersonOverride {
    /// True when any override field is set
    pub fn any_set(&self) -> bool {
        self.monthly_apps_override.is_some()
            || self.monthly_premium_override.is_some()
            || self.premium_mode_override.is_some()
            || self.premium_by_lob_override.is_some()
            || self.premium_by_bucket_override.is_some()
    }
}

/// Which level of the cascade supplied the resolved targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetSource {
    Override,
    Role,
    None,
}

/// The effective monthly targets for a person after cascade resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTargets {
    pub apps_target: f64,
    pub premium_target: f64,
    pub premium_breakdown: Option<PremiumBreakdown>,
    pub source: TargetSource,
}
