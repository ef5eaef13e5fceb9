//! Effective-dated interval resolution and overlap validation
//!
//! Commission rates and compensation plans share the same temporal shape: a
//! record valid over `[effective_start, effective_end]` with a `None` end
//! meaning open-ended. One generic resolver and one overlap validator serve
//! both, parameterized over [`EffectiveDated`]; callers supply records that
//! already share a scope key (e.g. org + line of business).

use chrono::NaiveDate;
use paceledger_domain::{
    CommissionRate, CompensationPlan, PaceLedgerError, Result,
};

/// A record valid over an effective date interval
pub trait EffectiveDated {
    fn effective_start(&self) -> NaiveDate;
    /// `None` means open-ended / current
    fn effective_end(&self) -> Option<NaiveDate>;
}

impl EffectiveDated for CommissionRate {
    fn effective_start(&self) -> NaiveDate {
        self.effective_start
    }

    fn effective_end(&self) -> Option<NaiveDate> {
        self.effective_end
    }
}

impl EffectiveDated for CompensationPlan {
    fn effective_start(&self) -> NaiveDate {
        self.effective_start
    }

    fn effective_end(&self) -> Option<NaiveDate> {
        self.effective_end
    }
}

/// Resolve the single record active at `as_of`.
///
/// A record is active when `effective_start <= as_of` and the end is open
/// or `>= as_of`. If several qualify (which the overlap invariant rules out
/// for stored data), the latest `effective_start` wins. Returns `None` when
/// nothing is active; callers treat a missing rate as 0.
pub fn resolve_active<'a, T, I>(records: I, as_of: NaiveDate) -> Option<&'a T>
where
    T: EffectiveDated,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| {
            r.effective_start() <= as_of && r.effective_end().is_none_or(|end| end >= as_of)
        })
        .max_by_key(|r| r.effective_start())
}

/// All records whose interval overlaps the inclusive window `[start, end]`.
///
/// Used for compensation plans, where simultaneously active records sum
/// rather than resolving to one.
pub fn active_in_window<'a, T, I>(records: I, start: NaiveDate, end: NaiveDate) -> Vec<&'a T>
where
    T: EffectiveDated,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| {
            r.effective_start() <= end && r.effective_end().is_none_or(|e| e >= start)
        })
        .collect()
}

/// Validate that a candidate interval can be written alongside `existing`
/// records of the same scope.
///
/// An existing record with the identical `effective_start` is the update
/// target and never conflicts with the candidate. Any other intersection of
/// `[start, end ?? +inf]` ranges fails with `Overlap`. An end date before
/// the start fails with `Validation`.
pub fn validate_no_overlap<T: EffectiveDated>(
    existing: &[T],
    candidate_start: NaiveDate,
    candidate_end: Option<NaiveDate>,
) -> Result<()> {
    if let Some(end) = candidate_end {
        if end < candidate_start {
            return Err(PaceLedgerError::validation(
                "effectiveEnd",
                "must be on or after effectiveStart",
            ));
        }
    }

    for record in existing {
        if record.effective_start() == candidate_start {
            // Same start date is a replace of that record, not a conflict
            continue;
        }
        let disjoint = match (record.effective_end(), candidate_end) {
            (Some(e1), _) if e1 < candidate_start => true,
            (_, Some(e2)) if e2 < record.effective_start() => true,
            _ => false,
        };
        if !disjoint {
            return Err(PaceLedgerError::Overlap(format!(
                "candidate starting {candidate_start} intersects record starting {}",
                record.effective_start()
            )));
        }
    }

    Ok(())
}
