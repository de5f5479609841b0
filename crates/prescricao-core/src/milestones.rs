//! Interrupting milestones: every qualifying milestone restarts the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of folding milestones into a running term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reduction {
    /// Start of the term after the last restart.
    pub start: NaiveDate,
    /// Whether at least one milestone qualified.
    pub applied: bool,
}

/// Milestones on or after `start`, ascending. Duplicates are kept.
pub fn qualifying(start: NaiveDate, candidates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = candidates.iter().copied().filter(|d| *d >= start).collect();
    dates.sort_unstable();
    dates
}

/// Fold milestones into a new effective start.
///
/// Only milestones at or after `start` count. Each one restarts the clock,
/// so the latest qualifying milestone becomes the new start.
pub fn reduce(start: NaiveDate, candidates: &[NaiveDate]) -> Reduction {
    let dates = qualifying(start, candidates);
    let mut current = start;
    for &d in &dates {
        if d >= current {
            current = d;
        }
    }
    debug!(%start, restarted = %current, considered = dates.len(), "milestones reduced");
    Reduction {
        start: current,
        applied: !dates.is_empty(),
    }
}

/// Merge general and party milestones into one candidate list.
pub fn merge(general: &[NaiveDate], subjective: &[NaiveDate]) -> Vec<NaiveDate> {
    general.iter().chain(subjective).copied().collect()
}
