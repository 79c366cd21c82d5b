//! # Scoring Registry
//!
//! Maps a qualified test identifier to the [`GradescopeAnnotation`]s declared for it.
//! Tests register their scoring metadata next to their body; the watcher looks it up
//! by identifier when the test completes. Identifiers with no entry are ungraded.

use crate::annotation::GradescopeAnnotation;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ScoringRegistry {
    entries: HashMap<String, Vec<GradescopeAnnotation>>,
}

impl ScoringRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `annotation` to `test_identifier`.
    ///
    /// Registering the same identifier again appends; annotations keep their
    /// registration order.
    pub fn register(&mut self, test_identifier: impl Into<String>, annotation: GradescopeAnnotation) {
        self.entries
            .entry(test_identifier.into())
            .or_default()
            .push(annotation);
    }

    /// Annotations declared for `test_identifier`, empty if none.
    pub fn annotations(&self, test_identifier: &str) -> &[GradescopeAnnotation] {
        self.entries
            .get(test_identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_graded(&self, test_identifier: &str) -> bool {
        !self.annotations(test_identifier).is_empty()
    }

    /// Number of graded tests (not annotations).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
