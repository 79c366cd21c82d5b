//! # Types Module
//!
//! This module defines the data written to disk for the Gradescope autograder:
//! the [`Visibility`] levels and the per-test [`ScoreRecord`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// When a student gets to see the result of a test.
///
/// Serialized as the exact strings Gradescope expects: `hidden`, `after_due_date`,
/// `after_published` and `visible`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Hidden,
    AfterDueDate,
    AfterPublished,
    #[default]
    Visible,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Hidden => "hidden",
            Visibility::AfterDueDate => "after_due_date",
            Visibility::AfterPublished => "after_published",
            Visibility::Visible => "visible",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one graded test, as consumed by Gradescope.
///
/// The crate only builds records through [`ScoreRecord::passed`] and
/// [`ScoreRecord::failed`] and never changes one afterwards; the fields are public so
/// hosts can read and construct them freely. The qualified test identifier is
/// serialized under `javaName`, the key the autograder's result format uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Display label shown to the student.
    pub name: String,
    /// Points awarded.
    pub score: u32,
    /// Points available for this test.
    pub max_score: u32,
    pub visibility: Visibility,
    /// Empty on success, failure description otherwise.
    pub output: String,
    /// Fully qualified test locator, e.g. `Calculator.adds_correctly`.
    #[serde(rename = "javaName")]
    pub test_identifier: String,
}

impl ScoreRecord {
    /// Full credit, no output.
    pub fn passed(
        name: impl Into<String>,
        max_score: u32,
        visibility: Visibility,
        test_identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score: max_score,
            max_score,
            visibility,
            output: String::new(),
            test_identifier: test_identifier.into(),
        }
    }

    /// Zero credit, with the failure description as output.
    pub fn failed(
        name: impl Into<String>,
        max_score: u32,
        visibility: Visibility,
        output: impl Into<String>,
        test_identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score: 0,
            max_score,
            visibility,
            output: output.into(),
            test_identifier: test_identifier.into(),
        }
    }
}
