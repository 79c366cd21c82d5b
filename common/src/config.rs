//! Global report configuration.
//!
//! `ReportConfig` is a lazily initialized, globally accessible singleton holding
//! where and how Gradescope reports are written. Values come from `.env` and
//! environment variables; every field has a default so a bare test process works
//! without any configuration.

use std::env;
use std::path::PathBuf;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};

pub const DEFAULT_REPORT_DIR: &str = "./build/reports/gradescope";
pub const DEFAULT_AGGREGATE_FILE: &str = "testresults.json";
pub const DEFAULT_LOG_LEVEL: &str = "gradescope=info";

/// Where reports go and how chatty the adapter is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory receiving the per-test files and the aggregate report.
    pub report_dir: PathBuf,
    /// File name of the aggregate report inside `report_dir`.
    pub aggregate_file: String,
    /// Whether the listener writes one file per graded test.
    pub per_test_reports: bool,
    /// `EnvFilter` directive used by [`crate::logger::init_logger`].
    pub log_level: String,
}

static CONFIG_INSTANCE: OnceLock<RwLock<ReportConfig>> = OnceLock::new();

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            aggregate_file: DEFAULT_AGGREGATE_FILE.into(),
            per_test_reports: true,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl ReportConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unset variables fall back to the defaults. `GRADESCOPE_PER_TEST_REPORTS`
    /// is only disabled by an explicit `false` or `0`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            report_dir: env::var("GRADESCOPE_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
            aggregate_file: env::var("GRADESCOPE_AGGREGATE_FILE")
                .unwrap_or(defaults.aggregate_file),
            per_test_reports: env::var("GRADESCOPE_PER_TEST_REPORTS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0"))
                .unwrap_or(defaults.per_test_reports),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Full path of the aggregate report.
    pub fn aggregate_path(&self) -> PathBuf {
        self.report_dir.join(&self.aggregate_file)
    }

    /// Returns a shared reference to the global configuration.
    pub fn global() -> RwLockReadGuard<'static, ReportConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(ReportConfig::from_env()))
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Reloads the global configuration from the environment, dropping overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
            *guard = ReportConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut ReportConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(ReportConfig::from_env()));
        let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_report_dir(value: impl Into<PathBuf>) {
        ReportConfig::set_field(|cfg| cfg.report_dir = value.into());
    }

    pub fn set_aggregate_file(value: impl Into<String>) {
        ReportConfig::set_field(|cfg| cfg.aggregate_file = value.into());
    }

    pub fn set_per_test_reports(value: bool) {
        ReportConfig::set_field(|cfg| cfg.per_test_reports = value);
    }

    pub fn set_log_level(value: impl Into<String>) {
        ReportConfig::set_field(|cfg| cfg.log_level = value.into());
    }
}
