//! # Test Watcher
//!
//! Turns test outcomes into score records.
//!
//! [`TestWatcher`] is the extension point a test harness calls once a test has
//! finished. [`GradescopeWatcher`] implements it by looking the test up in the
//! [`ScoringRegistry`], building one [`ScoreRecord`](crate::types::ScoreRecord) per
//! annotation, appending it to the shared [`ResultStore`] and writing it to its
//! per-test report file. Tests without annotations are ignored.

use crate::error::GradescopeError;
use crate::registry::ScoringRegistry;
use crate::report::ReportWriter;
use crate::store::ResultStore;
use crate::types::ScoreRecord;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Identifies the test a lifecycle event is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestContext {
    /// Owning suite, e.g. the module or type grouping the tests.
    pub suite: String,
    /// The test function itself.
    pub test: String,
}

impl TestContext {
    pub fn new(suite: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            test: test.into(),
        }
    }

    /// `<suite>.<test>`, the key used by the registry and for report file names.
    ///
    /// Suite names may contain `.` (`pkg.Calculator`); test names added through
    /// [`GradescopeSuite::add_test`](crate::suite::GradescopeSuite::add_test) may not,
    /// so the last `.` always separates the two.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.suite, self.test)
    }
}

impl fmt::Display for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.suite, self.test)
    }
}

/// Callbacks a harness invokes after each test.
///
/// Only success and failure are graded; disabled and aborted tests are reported so
/// implementations can log them, and do nothing by default.
pub trait TestWatcher {
    fn test_successful(&self, context: &TestContext) -> Result<(), GradescopeError>;

    fn test_failed(
        &self,
        context: &TestContext,
        cause: &dyn fmt::Display,
    ) -> Result<(), GradescopeError>;

    fn test_disabled(
        &self,
        _context: &TestContext,
        _reason: Option<&str>,
    ) -> Result<(), GradescopeError> {
        Ok(())
    }

    fn test_aborted(
        &self,
        _context: &TestContext,
        _cause: &dyn fmt::Display,
    ) -> Result<(), GradescopeError> {
        Ok(())
    }
}

/// Records Gradescope scores for every annotated test.
#[derive(Debug, Clone)]
pub struct GradescopeWatcher {
    registry: Arc<ScoringRegistry>,
    store: ResultStore,
    writer: Option<ReportWriter>,
}

impl GradescopeWatcher {
    /// `writer` receives one file per record; pass `None` to only fill the store.
    pub fn new(
        registry: Arc<ScoringRegistry>,
        store: ResultStore,
        writer: Option<ReportWriter>,
    ) -> Self {
        Self {
            registry,
            store,
            writer,
        }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    fn record(&self, record: ScoreRecord) -> Result<(), GradescopeError> {
        self.store.push(record.clone());
        if let Some(writer) = &self.writer {
            let path = writer.write_record(&record)?;
            debug!("Wrote {} to {:?}", record.test_identifier, path);
        }
        Ok(())
    }
}

/// Text stored in a failed record's `output`.
pub fn failure_output(cause: &dyn fmt::Display) -> String {
    format!("Exception registered: {cause}")
}

impl TestWatcher for GradescopeWatcher {
    fn test_successful(&self, context: &TestContext) -> Result<(), GradescopeError> {
        let test_identifier = context.qualified_name();
        info!("Successful test: {test_identifier}");

        for annotation in self.registry.annotations(&test_identifier) {
            self.record(annotation.success_record(&test_identifier))?;
        }
        Ok(())
    }

    fn test_failed(
        &self,
        context: &TestContext,
        cause: &dyn fmt::Display,
    ) -> Result<(), GradescopeError> {
        let test_identifier = context.qualified_name();
        info!("Failed test: {test_identifier}");

        let output = failure_output(cause);
        for annotation in self.registry.annotations(&test_identifier) {
            self.record(annotation.failure_record(&test_identifier, &output))?;
        }
        Ok(())
    }

    fn test_disabled(
        &self,
        context: &TestContext,
        reason: Option<&str>,
    ) -> Result<(), GradescopeError> {
        info!("Disabled test: {context} ({})", reason.unwrap_or("no reason given"));
        Ok(())
    }

    fn test_aborted(
        &self,
        context: &TestContext,
        cause: &dyn fmt::Display,
    ) -> Result<(), GradescopeError> {
        info!("Aborted test: {context}: {cause}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::GradescopeAnnotation;
    use crate::types::Visibility;
    use std::fs;
    use tempfile::TempDir;

    fn watcher_with(registry: ScoringRegistry, dir: Option<&TempDir>) -> GradescopeWatcher {
        GradescopeWatcher::new(
            Arc::new(registry),
            ResultStore::new(),
            dir.map(|d| ReportWriter::new(d.path(), "testresults.json")),
        )
    }

    #[test]
    fn test_qualified_name() {
        let ctx = TestContext::new("Calculator", "addsCorrectly");
        assert_eq!(ctx.qualified_name(), "Calculator.addsCorrectly");
        assert_eq!(ctx.to_string(), "Calculator.addsCorrectly");
    }

    #[test]
    fn test_success_awards_full_credit_and_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut registry = ScoringRegistry::new();
        registry.register("Calculator.addsCorrectly", GradescopeAnnotation::new("Addition", 10));
        let watcher = watcher_with(registry, Some(&dir));

        watcher
            .test_successful(&TestContext::new("Calculator", "addsCorrectly"))
            .unwrap();

        let records = watcher.store().snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 10);
        assert_eq!(records[0].max_score, 10);
        assert_eq!(records[0].output, "");
        assert!(dir.path().join("Calculator.addsCorrectly.json").exists());
    }

    #[test]
    fn test_failure_awards_nothing_and_keeps_cause() {
        let dir = TempDir::new().unwrap();
        let mut registry = ScoringRegistry::new();
        registry.register("Calculator.subtracts", GradescopeAnnotation::new("Subtraction", 5));
        let watcher = watcher_with(registry, Some(&dir));

        watcher
            .test_failed(&TestContext::new("Calculator", "subtracts"), &"expected 3 got 4")
            .unwrap();

        let records = watcher.store().snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 0);
        assert_eq!(records[0].max_score, 5);
        assert_eq!(records[0].output, "Exception registered: expected 3 got 4");

        let written = fs::read_to_string(dir.path().join("Calculator.subtracts.json")).unwrap();
        let decoded: ScoreRecord = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded, records[0]);
    }

    #[test]
    fn test_unannotated_tests_are_not_graded() {
        let dir = TempDir::new().unwrap();
        let watcher = watcher_with(ScoringRegistry::new(), Some(&dir));
        let ctx = TestContext::new("Calculator", "helper");

        watcher.test_successful(&ctx).unwrap();
        watcher.test_failed(&ctx, &"boom").unwrap();

        assert!(watcher.store().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_each_annotation_yields_a_record() {
        let mut registry = ScoringRegistry::new();
        registry.register("S.both", GradescopeAnnotation::new("Part A", 2));
        registry.register(
            "S.both",
            GradescopeAnnotation::new("Part B", 3).with_visibility(Visibility::Hidden),
        );
        let watcher = watcher_with(registry, None);

        watcher.test_successful(&TestContext::new("S", "both")).unwrap();

        let records = watcher.store().snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Part A");
        assert_eq!(records[1].name, "Part B");
        assert_eq!(records[1].visibility, Visibility::Hidden);
    }

    #[test]
    fn test_write_failure_propagates_after_recording() {
        let dir = TempDir::new().unwrap();
        let mut registry = ScoringRegistry::new();
        registry.register("S.t", GradescopeAnnotation::new("T", 1));
        let watcher = GradescopeWatcher::new(
            Arc::new(registry),
            ResultStore::new(),
            Some(ReportWriter::new(dir.path().join("missing"), "testresults.json")),
        );

        let err = watcher.test_successful(&TestContext::new("S", "t")).unwrap_err();
        assert!(matches!(err, GradescopeError::Write { .. }));
        assert_eq!(watcher.store().len(), 1);
    }

    #[test]
    fn test_disabled_and_aborted_are_not_graded() {
        let mut registry = ScoringRegistry::new();
        registry.register("S.t", GradescopeAnnotation::new("T", 1));
        let watcher = watcher_with(registry, None);
        let ctx = TestContext::new("S", "t");

        watcher.test_disabled(&ctx, Some("not ready")).unwrap();
        watcher.test_aborted(&ctx, &"assumption failed").unwrap();

        assert!(watcher.store().is_empty());
    }
}
