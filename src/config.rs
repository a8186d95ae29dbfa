use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MANUAL_ROOT: &str = "/usr/local/pace-apps/manual/modules";
pub const DEFAULT_SPACK_ROOT: &str = "/usr/local/pace-apps/spack/modules";

pub const DEFAULT_SYSTEM_TAG: &str = "lmod/linux-rhel9-x86_64";
pub const DEFAULT_MODULE_EXTENSION: &str = "lua";

pub const DEFAULT_CONFIG_FILE: &str = "pace/config/settings.py";
pub const DEFAULT_RUNNER: &str = "reframe";
pub const DEFAULT_SUITE_PATH: &str = "pace";
pub const DEFAULT_DESCRIBE_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_OUTPUT_FILE: &str = "test_coverage_matrix.csv";

/// A module tree to scan, labelled for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRoot {
    pub label: String,
    pub path: PathBuf,
}

impl ModuleRoot {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub roots: Vec<ModuleRoot>,
    pub system_tag: PathBuf,
    pub module_extension: String,
    pub config_file: PathBuf,
    pub runner: String,
    pub suite_path: PathBuf,
    pub describe_timeout: Duration,
    pub environments: Option<PathBuf>,
    pub output_file: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roots: vec![
                ModuleRoot::new("manual", DEFAULT_MANUAL_ROOT),
                ModuleRoot::new("spack", DEFAULT_SPACK_ROOT),
            ],
            system_tag: PathBuf::from(DEFAULT_SYSTEM_TAG),
            module_extension: DEFAULT_MODULE_EXTENSION.to_string(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            runner: DEFAULT_RUNNER.to_string(),
            suite_path: PathBuf::from(DEFAULT_SUITE_PATH),
            describe_timeout: Duration::from_secs(DEFAULT_DESCRIBE_TIMEOUT_SECS),
            environments: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config_scans_manual_then_spack() {
        let config = RunConfig::default();
        let labels: Vec<_> = config.roots.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["manual", "spack"]);
        assert_eq!(config.output_file, PathBuf::from("test_coverage_matrix.csv"));
        assert_eq!(config.describe_timeout, Duration::from_secs(300));
    }
}
