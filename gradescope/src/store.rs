//! Accumulator for the score records of one suite run.

use crate::types::ScoreRecord;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered, append-only list of [`ScoreRecord`]s.
///
/// Cloning yields another handle to the same list, so the suite and its watcher
/// share one store. Appends are serialized, which keeps the store correct when the
/// host runs tests on several threads; order is completion order.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: ScoreRecord) {
        self.lock().push(record);
    }

    /// Copy of every record in completion order.
    pub fn snapshot(&self) -> Vec<ScoreRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A test panicking elsewhere must not cost us the records already collected.
    fn lock(&self) -> MutexGuard<'_, Vec<ScoreRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
