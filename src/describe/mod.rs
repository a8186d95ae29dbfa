//! Test metadata from the test runner's `--describe` output.

pub mod parse;
pub mod reframe;

pub use parse::{filter_diagnostic_lines, parse_describe_lines, DIAGNOSTIC_MARKERS, UNKNOWN_TEST};
pub use reframe::ReframeDescriber;

use std::path::Path;

use crate::error::DescribeError;

/// Source of raw describe output for a test-runner configuration.
pub trait DescribeSource {
    fn describe(&self, config_file: &Path) -> Result<String, DescribeError>;
}

/// One test as declared by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub name: String,
    pub modules: Vec<String>,
    pub valid_environments: Vec<String>,
}

/// Runs `source` and parses its output into test records.
///
/// Never fails: tool failures and unparseable output are logged and yield
/// an empty list so the report is still produced.
pub fn collect_test_records<S: DescribeSource + ?Sized>(
    source: &S,
    config_file: &Path,
) -> Vec<TestRecord> {
    tracing::info!("Retrieving test information from the test runner");

    let output = match source.describe(config_file) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Describe command failed, continuing without test data: {e}");
            return Vec::new();
        }
    };

    let lines = filter_diagnostic_lines(&output);
    tracing::debug!("Valid output from describe command:\n{}", lines.join("\n"));

    match parse_describe_lines(&lines) {
        Ok(records) => {
            tracing::debug!("Extracted {} test descriptions", records.len());
            records
        }
        Err(e) => {
            tracing::warn!("{e}");
            tracing::warn!("Raw describe output:\n{}", lines.join("\n"));
            Vec::new()
        }
    }
}
