//! Scoring metadata attached to a graded test.

use crate::types::{ScoreRecord, Visibility};

/// Declares how a test is graded: its display name, the points it is worth and
/// when the student may see the result.
///
/// A test may carry several annotations; each one yields its own [`ScoreRecord`].
///
/// ```
/// use gradescope::annotation::GradescopeAnnotation;
/// use gradescope::types::Visibility;
///
/// let a = GradescopeAnnotation::new("Addition", 10).with_visibility(Visibility::AfterDueDate);
/// assert_eq!(a.max_score, 10);
/// assert_eq!(a.visibility, Visibility::AfterDueDate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradescopeAnnotation {
    pub name: String,
    pub max_score: u32,
    pub visibility: Visibility,
    /// Declared score. Not used for grading: the outcome decides the awarded points.
    pub score: u32,
}

impl GradescopeAnnotation {
    pub fn new(name: impl Into<String>, max_score: u32) -> Self {
        Self {
            name: name.into(),
            max_score,
            visibility: Visibility::default(),
            score: 0,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Record for a passing test: full credit.
    pub fn success_record(&self, test_identifier: &str) -> ScoreRecord {
        ScoreRecord::passed(&self.name, self.max_score, self.visibility, test_identifier)
    }

    /// Record for a failing test: zero credit, `output` describes the cause.
    pub fn failure_record(&self, test_identifier: &str, output: &str) -> ScoreRecord {
        ScoreRecord::failed(
            &self.name,
            self.max_score,
            self.visibility,
            output,
            test_identifier,
        )
    }
}
