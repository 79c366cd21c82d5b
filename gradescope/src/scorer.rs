//! # Scorer Module
//!
//! Totals over a run's score records. These figures are diagnostic: they are logged
//! at teardown and returned in the suite summary, never written to the aggregate file.

use crate::types::ScoreRecord;

/// Sum of `max_score` over all records: the points achievable in this run.
pub fn total_max_score(records: &[ScoreRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.max_score)).sum()
}

/// Sum of `score` over all records.
pub fn total_awarded(records: &[ScoreRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.score)).sum()
}

/// Awarded over achievable as a whole percentage (0-100).
///
/// Returns 0 when nothing was achievable.
///
/// # Example
///
/// ```
/// use gradescope::scorer::overall_percentage;
/// use gradescope::types::{ScoreRecord, Visibility};
///
/// let results = vec![
///     ScoreRecord::passed("Task 1", 10, Visibility::Visible, "S.t1"),
///     ScoreRecord::failed("Task 2", 10, Visibility::Visible, "boom", "S.t2"),
/// ];
/// assert_eq!(overall_percentage(&results), 50);
/// ```
pub fn overall_percentage(records: &[ScoreRecord]) -> u32 {
    let possible = total_max_score(records);
    if possible == 0 {
        return 0;
    }
    ((total_awarded(records) as f64 / possible as f64) * 100.0).round() as u32
}
