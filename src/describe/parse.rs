use serde::Deserialize;

use super::TestRecord;
use crate::error::DescribeError;

/// Substrings marking diagnostic lines interleaved with the JSON payload.
pub const DIAGNOSTIC_MARKERS: &[&str] = &["FAILED", "ERROR", "Traceback"];

pub const UNKNOWN_TEST: &str = "UnknownTest";

#[derive(Debug, Deserialize)]
struct RawTest {
    #[serde(default)]
    unique_name: Option<String>,
    #[serde(rename = "@class", default)]
    class: Option<String>,
    #[serde(default)]
    modules: Option<Vec<String>>,
    #[serde(default)]
    valid_prog_environs: Option<Vec<String>>,
}

impl From<RawTest> for TestRecord {
    fn from(raw: RawTest) -> Self {
        TestRecord {
            name: raw
                .unique_name
                .or(raw.class)
                .unwrap_or_else(|| UNKNOWN_TEST.to_string()),
            modules: raw.modules.unwrap_or_default(),
            valid_environments: raw.valid_prog_environs.unwrap_or_default(),
        }
    }
}

/// Lines of `output` that carry none of the [`DIAGNOSTIC_MARKERS`].
pub fn filter_diagnostic_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| !DIAGNOSTIC_MARKERS.iter().any(|marker| line.contains(marker)))
        .collect()
}

/// Parses the filtered lines, joined without separators, as a JSON array
/// of test descriptions.
pub fn parse_describe_lines(lines: &[&str]) -> Result<Vec<TestRecord>, DescribeError> {
    let payload = lines.concat();
    let tests: Vec<RawTest> =
        serde_json::from_str(&payload).map_err(|source| DescribeError::Malformed { source })?;
    Ok(tests.into_iter().map(TestRecord::from).collect())
}
