//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use crate::types::sales::SaleStatus;

/// Canonical line-of-business names
pub const LOB_AUTO: &str = "Auto";
pub const LOB_FIRE: &str = "Fire";
pub const LOB_LIFE: &str = "Life";
pub const LOB_HEALTH: &str = "Health";
pub const LOB_IPS: &str = "IPS";

/// The canonical five-member line-of-business set
pub const CANONICAL_LOBS: &[&str] = &[LOB_AUTO, LOB_FIRE, LOB_LIFE, LOB_HEALTH, LOB_IPS];

/// Alias table mapping free-text LOB names onto the canonical set.
///
/// Matching is case-insensitive substring: the event name is lowercased and
/// the first alias it contains wins, in table order. Unmatched names pass
/// through verbatim.
pub const LOB_ALIASES: &[(&str, &[&str])] = &[
    (LOB_AUTO, &["auto", "vehicle", "motorcycle"]),
    (LOB_FIRE, &["fire", "home", "renter", "property", "umbrella"]),
    (LOB_LIFE, &["life"]),
    (LOB_HEALTH, &["health", "medicare", "disability"]),
    (LOB_IPS, &["ips", "invest", "mutual fund", "annuity"]),
];

/// Reporting bucket keys
pub const BUCKET_PC: &str = "PC";
pub const BUCKET_FS: &str = "FS";
pub const BUCKET_IPS: &str = "IPS";

/// Bucket keys in display order with their report labels
pub const BUCKET_LABELS: &[(&str, &str)] = &[
    (BUCKET_PC, "Property & Casualty"),
    (BUCKET_FS, "Financial Services"),
    (BUCKET_IPS, "Investments"),
];

/// Canonical line of business to reporting bucket
pub const LOB_BUCKETS: &[(&str, &str)] = &[
    (LOB_AUTO, BUCKET_PC),
    (LOB_FIRE, BUCKET_PC),
    (LOB_LIFE, BUCKET_FS),
    (LOB_HEALTH, BUCKET_FS),
    (LOB_IPS, BUCKET_IPS),
];

/// The reporting bucket for a canonical line of business, if any
pub fn bucket_for_lob(lob: &str) -> Option<&'static str> {
    LOB_BUCKETS
        .iter()
        .find(|(canonical, _)| *canonical == lob)
        .map(|(_, bucket)| *bucket)
}

/// Sale statuses counted toward production when the caller supplies no
/// allow-list
pub const DEFAULT_COUNTED_STATUSES: &[SaleStatus] =
    &[SaleStatus::Submitted, SaleStatus::Issued, SaleStatus::Paid];

/// Months of history for a person-ROI request when unspecified
pub const DEFAULT_ROI_MONTHS_BACK: u32 = 12;

/// Upper bound on the person-ROI history window; each month costs one pass
/// over the stores, so the request size is capped
pub const MAX_ROI_MONTHS_BACK: u32 = 120;

/// Version stamp recorded in snapshot metadata
pub const SNAPSHOT_VERSION: u32 = 1;
