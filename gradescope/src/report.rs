//! # Report Module
//!
//! Writes score records where the Gradescope autograder picks them up.
//!
//! Two kinds of file land in the report directory:
//! - `<qualified test identifier>.json`: one pretty-printed [`ScoreRecord`] per graded
//!   test, written as soon as the test completes. Useful for debugging a single test.
//! - the aggregate report (`testresults.json` by default): a pretty-printed JSON array
//!   of every record in completion order. This is the file the autograder consumes.
//!
//! ## JSON Output Example
//!
//! ```json
//! [
//!   {
//!     "name": "Addition",
//!     "score": 10,
//!     "max_score": 10,
//!     "visibility": "visible",
//!     "output": "",
//!     "javaName": "Calculator.addsCorrectly"
//!   }
//! ]
//! ```

use crate::error::GradescopeError;
use crate::types::ScoreRecord;
use common::config::ReportConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes per-test and aggregate reports into one directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    report_dir: PathBuf,
    aggregate_file: String,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>, aggregate_file: impl Into<String>) -> Self {
        Self {
            report_dir: report_dir.into(),
            aggregate_file: aggregate_file.into(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(&config.report_dir, &config.aggregate_file)
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.report_dir.join(&self.aggregate_file)
    }

    /// Path of the per-test file for `test_identifier`.
    ///
    /// Path separators in the identifier are replaced with `_` so the file always
    /// lands directly inside the report directory. The mapping is lossy: `a/b.c` and
    /// `a_b.c` share a file, and the later write wins. The aggregate report keeps
    /// both records.
    pub fn record_path(&self, test_identifier: &str) -> PathBuf {
        let stem: String = test_identifier
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.report_dir.join(format!("{stem}.json"))
    }

    /// Creates the report directory. An existing directory is not an error.
    pub fn ensure_dir(&self) -> Result<(), GradescopeError> {
        fs::create_dir_all(&self.report_dir).map_err(|source| GradescopeError::CreateDir {
            path: self.report_dir.clone(),
            source,
        })
    }

    /// Writes a single record to its per-test file, replacing any previous content.
    pub fn write_record(&self, record: &ScoreRecord) -> Result<PathBuf, GradescopeError> {
        let path = self.record_path(&record.test_identifier);
        let encoded = serde_json::to_string_pretty(record)?;
        write_file(&path, &encoded)?;
        Ok(path)
    }

    /// Writes every record, in order, to the aggregate report.
    pub fn write_aggregate(&self, records: &[ScoreRecord]) -> Result<PathBuf, GradescopeError> {
        let path = self.aggregate_path();
        let encoded = encode_aggregate(records)?;
        write_file(&path, &encoded)?;
        Ok(path)
    }
}

/// Pretty-printed JSON array of `records`, exactly as written to the aggregate file.
pub fn encode_aggregate(records: &[ScoreRecord]) -> Result<String, GradescopeError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Reads an aggregate report back into score records.
pub fn read_aggregate(path: impl AsRef<Path>) -> Result<Vec<ScoreRecord>, GradescopeError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| GradescopeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn write_file(path: &Path, content: &str) -> Result<(), GradescopeError> {
    fs::write(path, content).map_err(|source| GradescopeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
