//! # Graded Suite
//!
//! Brackets a run of graded tests.
//!
//! [`GradescopeSuite::setup`] runs before any test and creates the report directory;
//! [`GradescopeSuite::teardown`] runs after the last test and writes the aggregate
//! report the autograder consumes. In between, every completed test is handed to a
//! [`GradescopeWatcher`] obtained from [`GradescopeSuite::watcher`].
//!
//! Hosts that cannot call a watcher themselves can let the suite own the test bodies
//! ([`GradescopeSuite::add_test`]) and drive them with [`GradescopeSuite::run`]: each
//! body runs under `catch_unwind`, a panic counts as a failure and its message becomes
//! the failure cause.
//!
//! The store is owned by the suite and never cleared, so a suite is meant to be run once.

use crate::annotation::GradescopeAnnotation;
use crate::error::GradescopeError;
use crate::registry::ScoringRegistry;
use crate::report::{ReportWriter, encode_aggregate};
use crate::scorer::{overall_percentage, total_awarded, total_max_score};
use crate::store::ResultStore;
use crate::watcher::{GradescopeWatcher, TestContext, TestWatcher};
use common::config::ReportConfig;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

type TestBody = Box<dyn Fn() + Send + Sync>;

struct GradedTest {
    context: TestContext,
    body: TestBody,
}

/// How a single test body ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    /// Carries the panic message.
    Failed(String),
}

/// What teardown wrote, plus the diagnostic totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSummary {
    /// Records in the aggregate report.
    pub entries: usize,
    /// Sum of `max_score` over all records.
    pub max_score: u64,
    /// Sum of `score` over all records.
    pub awarded: u64,
    /// `awarded / max_score` as a whole percentage.
    pub percentage: u32,
    /// Listener invocations that returned an error during [`GradescopeSuite::run`].
    pub listener_errors: usize,
    pub aggregate_path: PathBuf,
}

pub struct GradescopeSuite {
    name: String,
    registry: Arc<ScoringRegistry>,
    store: ResultStore,
    writer: ReportWriter,
    per_test_reports: bool,
    tests: Vec<GradedTest>,
}

impl GradescopeSuite {
    pub fn new(name: impl Into<String>, config: &ReportConfig) -> Self {
        Self {
            name: name.into(),
            registry: Arc::new(ScoringRegistry::new()),
            store: ResultStore::new(),
            writer: ReportWriter::from_config(config),
            per_test_reports: config.per_test_reports,
            tests: Vec::new(),
        }
    }

    /// Suite configured from [`ReportConfig::global`].
    pub fn from_env(name: impl Into<String>) -> Self {
        let config = ReportConfig::global().clone();
        Self::new(name, &config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn registry(&self) -> &ScoringRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }

    /// Attaches scoring metadata to a test the host runs itself.
    pub fn annotate(&mut self, test_identifier: impl Into<String>, annotation: GradescopeAnnotation) {
        Arc::make_mut(&mut self.registry).register(test_identifier, annotation);
    }

    /// Adds a test body owned by this suite, graded by `annotations`.
    ///
    /// The test is identified as `<suite name>.<test>`. An empty `annotations` list
    /// makes the test run without being graded. Test names must be unique within the
    /// suite and may not contain `.`, which separates suite from test.
    pub fn add_test<I, F>(
        &mut self,
        test: impl Into<String>,
        annotations: I,
        body: F,
    ) -> Result<&mut Self, GradescopeError>
    where
        I: IntoIterator<Item = GradescopeAnnotation>,
        F: Fn() + Send + Sync + 'static,
    {
        let context = TestContext::new(self.name.clone(), test);
        let test_identifier = context.qualified_name();
        if context.test.is_empty() || context.test.contains('.') {
            return Err(GradescopeError::InvalidTestName(test_identifier));
        }
        if self.tests.iter().any(|t| t.context == context) {
            return Err(GradescopeError::DuplicateTest(test_identifier));
        }

        for annotation in annotations {
            self.annotate(test_identifier.clone(), annotation);
        }
        self.tests.push(GradedTest {
            context,
            body: Box::new(body),
        });
        Ok(self)
    }

    /// A watcher sharing this suite's registry and store.
    ///
    /// Annotations added after this call are not seen by the returned watcher.
    pub fn watcher(&self) -> GradescopeWatcher {
        let writer = self.per_test_reports.then(|| self.writer.clone());
        GradescopeWatcher::new(Arc::clone(&self.registry), self.store.clone(), writer)
    }

    /// Installs logging and creates the report directory. Fails if the directory
    /// cannot be created.
    pub fn setup(&self) -> Result<(), GradescopeError> {
        crate::init_logging();
        info!("Setup Run {} {:?}", self.name, self.store.snapshot());
        self.writer.ensure_dir()
    }

    /// Writes every collected record to the aggregate report and logs the
    /// achievable total.
    pub fn teardown(&self) -> Result<SuiteSummary, GradescopeError> {
        let records = self.store.snapshot();
        let max_score = total_max_score(&records);

        debug!("Teardown Run {}", encode_aggregate(&records)?);
        info!("Maximum score {max_score}");

        let aggregate_path = self.writer.write_aggregate(&records)?;
        Ok(SuiteSummary {
            entries: records.len(),
            max_score,
            awarded: total_awarded(&records),
            percentage: overall_percentage(&records),
            listener_errors: 0,
            aggregate_path,
        })
    }

    /// Runs one owned test by name and reports it to the suite's watcher.
    pub fn run_test(&self, test: &str) -> Result<TestOutcome, GradescopeError> {
        let graded = self
            .tests
            .iter()
            .find(|t| t.context.test == test)
            .ok_or_else(|| GradescopeError::UnknownTest(format!("{}.{}", self.name, test)))?;
        let outcome = execute(graded);
        report_outcome(&self.watcher(), &graded.context, &outcome)?;
        Ok(outcome)
    }

    /// Setup, every owned test in insertion order, teardown.
    ///
    /// A listener error is logged and counted; the remaining tests still run.
    pub fn run(&self) -> Result<SuiteSummary, GradescopeError> {
        self.setup()?;

        let watcher = self.watcher();
        let mut listener_errors = 0;
        for graded in &self.tests {
            let outcome = execute(graded);
            if let Err(e) = report_outcome(&watcher, &graded.context, &outcome) {
                error!("Recording {} failed: {e}", graded.context);
                listener_errors += 1;
            }
        }

        let mut summary = self.teardown()?;
        summary.listener_errors = listener_errors;
        Ok(summary)
    }
}

fn execute(graded: &GradedTest) -> TestOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| (graded.body)())) {
        Ok(()) => TestOutcome::Passed,
        Err(payload) => TestOutcome::Failed(panic_message(payload.as_ref())),
    }
}

fn report_outcome(
    watcher: &dyn TestWatcher,
    context: &TestContext,
    outcome: &TestOutcome,
) -> Result<(), GradescopeError> {
    match outcome {
        TestOutcome::Passed => watcher.test_successful(context),
        TestOutcome::Failed(cause) => watcher.test_failed(context, cause),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked with a non-string payload".to_string()
    }
}
