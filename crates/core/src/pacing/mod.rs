//! Time-prorated pacing math
//!
//! One pure function applied identically at person, breakdown, and office
//! level. Callers convert inclusive calendar-date windows into half-open
//! instant windows (see `paceledger_common::time::day_end_exclusive`) before
//! calling in, so that `as_of` landing mid-window yields the fraction of
//! whole days elapsed.

use chrono::{DateTime, Utc};
use paceledger_domain::Pace;

/// Compute the pacing outcome for one `(actual, target)` pair over the
/// half-open instant window `[window_start, window_end)`.
///
/// `elapsed_fraction` is the clamped share of the window behind `as_of`; a
/// degenerate window (`window_end <= window_start`) counts as fully
/// elapsed. `pace_target` prorates the target by that fraction.
/// `pace_ratio` is `None` only when there is production but no pace target
/// to measure it against. `delta` compares against the full-period target
/// regardless of elapsed time.
pub fn pace(
    actual: f64,
    target: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    as_of: DateTime<Utc>,
) -> Pace {
    let span = (window_end - window_start).num_seconds();
    let elapsed_fraction = if span <= 0 {
        1.0
    } else {
        let elapsed = (as_of - window_start).num_seconds();
        (elapsed as f64 / span as f64).clamp(0.0, 1.0)
    };

    let pace_target = target * elapsed_fraction;
    let pace_ratio = if pace_target > 0.0 {
        Some(actual / pace_target)
    } else if actual > 0.0 {
        // Production with nothing to pace against: sentinel, not an error
        None
    } else {
        Some(0.0)
    };

    Pace { elapsed_fraction, pace_target, pace_ratio, delta: actual - target }
}
