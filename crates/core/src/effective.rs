//! Effective-dated profile assignment ranking.
//!
//! A device may carry several profile assignments over time: a long-running
//! default plus temporary overrides (e.g. during a defrost cycle). Given a
//! snapshot of all assignments for one device, [`select_active_assignment`]
//! picks the one in force at a given instant.

use crate::types::{DbId, Timestamp};

/// The scheduling-relevant slice of a profile assignment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentWindow {
    pub id: DbId,
    pub profile_id: DbId,
    pub effective_start: Option<Timestamp>,
    pub effective_end: Option<Timestamp>,
    pub is_default: bool,
}

impl AssignmentWindow {
    /// Whether this assignment's validity window covers `at`.
    ///
    /// A missing start means "since forever", a missing end "open-ended".
    fn covers(&self, at: Timestamp) -> bool {
        let started = self.effective_start.map_or(true, |start| start <= at);
        let not_ended = self.effective_end.map_or(true, |end| end >= at);
        started && not_ended
    }
}

/// Select the assignment in force at `at`, if any.
///
/// Precedence among assignments whose window covers `at`:
/// 1. a non-default (override) assignment wins over an overlapping default;
/// 2. remaining ties break on the latest `effective_start`, then the
///    highest id — the ordering is a pure function of the snapshot, never
///    of row order.
///
/// If no window covers `at`, an `is_default` assignment with no date
/// constraints acts as the fallback. Otherwise there is no active profile.
pub fn select_active_assignment(
    assignments: &[AssignmentWindow],
    at: Timestamp,
) -> Option<&AssignmentWindow> {
    let candidates: Vec<&AssignmentWindow> =
        assignments.iter().filter(|a| a.covers(at)).collect();

    let pool: Vec<&AssignmentWindow> = if candidates.iter().any(|a| !a.is_default) {
        candidates.into_iter().filter(|a| !a.is_default).collect()
    } else {
        candidates
    };

    if let Some(best) = pool.into_iter().max_by_key(|a| (a.effective_start, a.id)) {
        return Some(best);
    }

    assignments
        .iter()
        .filter(|a| a.is_default && a.effective_start.is_none() && a.effective_end.is_none())
        .max_by_key(|a| a.id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
