//! Write-side validation for target records
//!
//! Request shapes keep every bucket field optional so that a missing
//! required field surfaces as a field-tagged validation failure rather
//! than a deserialization error. Validation converts the inputs into
//! domain records; any violation aborts the write with no partial
//! persistence.

use paceledger_common::validation::{
    require_non_empty, require_non_empty_list, require_non_negative,
};
use paceledger_domain::{
    ActivityTarget, BucketBreakdown, LobAppsGoal, LobPremium, PersonOverride, PremiumMode, Result,
    RoleExpectation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::from_common;

/// Bucket premium goals as submitted: all fields optional until validated
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BucketBreakdownInput {
    pub pc: Option<f64>,
    pub fs: Option<f64>,
    pub ips: Option<f64>,
}

/// A role-expectation write request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleExpectationInput {
    pub role_id: Uuid,
    #[serde(default)]
    pub apps_goals_by_lob: Vec<LobAppsGoal>,
    pub premium_by_bucket: BucketBreakdownInput,
    #[serde(default)]
    pub activity_targets: Vec<ActivityTarget>,
}

/// A person-override write request; unset fields clear the override
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonOverrideInput {
    pub person_id: Uuid,
    pub monthly_apps_override: Option<u32>,
    pub monthly_premium_override: Option<f64>,
    pub premium_mode_override: Option<PremiumMode>,
    pub premium_by_lob_override: Option<Vec<LobPremium>>,
    pub premium_by_bucket_override: Option<BucketBreakdownInput>,
}

/// Validate a bucket breakdown: `PC` and `FS` required and non-negative,
/// `IPS` optional
pub fn validate_bucket(field: &str, input: BucketBreakdownInput) -> Result<BucketBreakdown> {
    let pc = require_present(&format!("{field}.PC"), input.pc)?;
    let fs = require_present(&format!("{field}.FS"), input.fs)?;
    if let Some(ips) = input.ips {
        require_non_negative(&format!("{field}.IPS"), ips).map_err(from_common)?;
    }
    Ok(BucketBreakdown { pc, fs, ips: input.ips })
}

fn require_present(field: &str, value: Option<f64>) -> Result<f64> {
    let value = value.ok_or_else(|| {
        paceledger_domain::PaceLedgerError::validation(field, "is required")
    })?;
    require_non_negative(field, value).map_err(from_common)?;
    Ok(value)
}

/// Validate a per-LOB premium breakdown: non-empty, every entry named and
/// non-negative
pub fn validate_lob_premiums(field: &str, entries: &[LobPremium]) -> Result<()> {
    require_non_empty_list(field, entries).map_err(from_common)?;
    for (idx, entry) in entries.iter().enumerate() {
        require_non_empty(&format!("{field}[{idx}].lobId"), &entry.lob_id)
            .map_err(from_common)?;
        require_non_negative(&format!("{field}[{idx}].premium"), entry.premium)
            .map_err(from_common)?;
    }
    Ok(())
}

/// Validate and convert a role-expectation write
pub fn validate_role_expectation(
    org_id: Uuid,
    input: RoleExpectationInput,
) -> Result<RoleExpectation> {
    for (idx, goal) in input.apps_goals_by_lob.iter().enumerate() {
        require_non_empty(&format!("appsGoalsByLob[{idx}].lobId"), &goal.lob_id)
            .map_err(from_common)?;
    }
    for (idx, target) in input.activity_targets.iter().enumerate() {
        require_non_empty(&format!("activityTargets[{idx}].activityType"), &target.activity_type)
            .map_err(from_common)?;
    }
    let premium_by_bucket = validate_bucket("premiumByBucket", input.premium_by_bucket)?;

    Ok(RoleExpectation {
        role_id: input.role_id,
        org_id,
        apps_goals_by_lob: input.apps_goals_by_lob,
        premium_by_bucket,
        activity_targets: input.activity_targets,
    })
}

/// Validate and convert a person-override write.
///
/// The breakdown override matching `premium_mode_override` must be present
/// and valid; the other breakdown field is ignored.
pub fn validate_person_override(org_id: Uuid, input: PersonOverrideInput) -> Result<PersonOverride> {
    if let Some(premium) = input.monthly_premium_override {
        require_non_negative("monthlyPremiumOverride", premium).map_err(from_common)?;
    }

    let mut premium_by_bucket_override = None;
    let mut premium_by_lob_override = None;
    match input.premium_mode_override {
        Some(PremiumMode::Bucket) => {
            let bucket = input.premium_by_bucket_override.ok_or_else(|| {
                paceledger_domain::PaceLedgerError::validation(
                    "premiumByBucketOverride",
                    "is required when premiumModeOverride is BUCKET",
                )
            })?;
            premium_by_bucket_override = Some(validate_bucket("premiumByBucketOverride", bucket)?);
        }
        Some(PremiumMode::Lob) => {
            let lobs = input.premium_by_lob_override.ok_or_else(|| {
                paceledger_domain::PaceLedgerError::validation(
                    "premiumByLobOverride",
                    "is required when premiumModeOverride is LOB",
                )
            })?;
            validate_lob_premiums("premiumByLobOverride", &lobs)?;
            premium_by_lob_override = Some(lobs);
        }
        None => {}
    }

    Ok(PersonOverride {
        person_id: input.person_id,
        org_id,
        monthly_apps_override: input.monthly_apps_override,
        monthly_premium_override: input.monthly_premium_override,
        premium_mode_override: input.premium_mode_override,
        premium_by_lob_override,
        premium_by_bucket_override,
    })
}
