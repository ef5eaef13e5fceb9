//! Sale events and line-of-business normalization

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::LOB_ALIASES;

/// Lifecycle status of a sale event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Submitted,
    Issued,
    Paid,
    Pending,
    Cancelled,
    Declined,
}

impl SaleStatus {
    /// Stable string form used in query parameters and CSV status lists
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
        }
    }

    /// Parse the stable string form (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => Some(Self::Submitted),
            "issued" => Some(Self::Issued),
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// An immutable sale fact produced by the external book-of-business feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleEvent {
    pub id: Uuid,
    pub org_id: Uuid,
    pub person_id: Uuid,
    /// Free-text line-of-business name as recorded at point of sale
    pub line_of_business: String,
    pub premium: f64,
    pub date_sold: NaiveDate,
    pub status: SaleStatus,
}

/// Normalize a free-text line-of-business name onto the canonical set.
///
/// Case-insensitive substring match against the alias table; the first
/// matching alias wins in table order. Unmatched names pass through
/// verbatim so that uncategorized products still roll up.
pub fn canonical_lob(name: &str) -> String {
    let lowered = name.to_lowercase();
    for (canonical, aliases) in LOB_ALIASES {
        if aliases.iter().any(|alias| lowered.contains(alias)) {
            return (*canonical).to_string();
        }
    }
    name.to_string()
}
