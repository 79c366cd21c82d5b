//! # Gradescope Reporting
//!
//! Collects per-test scores from a test run and writes them in the JSON format the
//! Gradescope autograder reads.
//!
//! ## Key Concepts
//! - **GradescopeAnnotation**: scoring metadata (name, max score, visibility) for a test.
//! - **ScoringRegistry**: annotations keyed by qualified test identifier.
//! - **GradescopeWatcher**: turns pass/fail events into [`ScoreRecord`]s.
//! - **GradescopeSuite**: creates the report directory before the run and writes the
//!   aggregate `testresults.json` after it.
//!
//! ## Example
//!
//! ```no_run
//! use gradescope::{GradescopeAnnotation, GradescopeSuite, Visibility};
//!
//! let mut suite = GradescopeSuite::from_env("Calculator");
//! suite
//!     .add_test("addsCorrectly", [GradescopeAnnotation::new("Addition", 10)], || {
//!         assert_eq!(1 + 2, 3);
//!     })?
//!     .add_test(
//!         "subtracts",
//!         [GradescopeAnnotation::new("Subtraction", 5).with_visibility(Visibility::AfterDueDate)],
//!         || assert_eq!(4 - 1, 3),
//!     )?;
//! // Setup installs logging, so every outcome and the maximum score land on stdout.
//! let summary = suite.run()?;
//! println!("{} / {}", summary.awarded, summary.max_score);
//! # Ok::<(), gradescope::GradescopeError>(())
//! ```

pub mod annotation;
pub mod error;
pub mod registry;
pub mod report;
pub mod scorer;
pub mod store;
pub mod suite;
pub mod types;
pub mod watcher;

pub use annotation::GradescopeAnnotation;
pub use error::GradescopeError;
pub use registry::ScoringRegistry;
pub use report::{ReportWriter, read_aggregate};
pub use store::ResultStore;
pub use suite::{GradescopeSuite, SuiteSummary, TestOutcome};
pub use types::{ScoreRecord, Visibility};
pub use watcher::{GradescopeWatcher, TestContext, TestWatcher};

/// Installs the tracing subscriber using the configured log level.
pub fn init_logging() {
    let level = common::config::ReportConfig::global().log_level.clone();
    common::logger::init_logger(&level);
}
