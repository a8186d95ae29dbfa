#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use coverage_matrix::config::{ModuleRoot, RunConfig};
use coverage_matrix::error::DescribeError;
use coverage_matrix::DescribeSource;
use tempfile::TempDir;

pub const SYSTEM_TAG: &str = "lmod/linux-rhel9-x86_64";

/// A pair of scratch module roots laid out like a site install.
pub struct ModuleTree {
    pub manual: TempDir,
    pub spack: TempDir,
    pub out: TempDir,
}

impl ModuleTree {
    pub fn new() -> Self {
        Self {
            manual: TempDir::new().unwrap(),
            spack: TempDir::new().unwrap(),
            out: TempDir::new().unwrap(),
        }
    }

    pub fn add_manual(&self, relative: &str) -> &Self {
        add_module_file(self.manual.path(), relative);
        self
    }

    pub fn add_spack(&self, relative: &str) -> &Self {
        add_module_file(self.spack.path(), relative);
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.out.path().join("test_coverage_matrix.csv")
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            roots: vec![
                ModuleRoot::new("manual", self.manual.path()),
                ModuleRoot::new("spack", self.spack.path()),
            ],
            system_tag: PathBuf::from(SYSTEM_TAG),
            module_extension: "lua".to_string(),
            config_file: PathBuf::from("pace/config/settings.py"),
            runner: "reframe".to_string(),
            suite_path: PathBuf::from("pace"),
            describe_timeout: Duration::from_secs(5),
            environments: None,
            output_file: self.output_path(),
        }
    }
}

/// Writes an empty module file at `<root>/<system tag>/<relative>`.
pub fn add_module_file(root: &Path, relative: &str) {
    let path = root.join(SYSTEM_TAG).join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "-- -*- lua -*-\n").unwrap();
}

/// Describe source returning fixed text instead of running a process.
pub struct CannedDescribe {
    output: Result<String, String>,
}

impl CannedDescribe {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            output: Ok(text.into()),
        }
    }

    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            output: Err(stderr.into()),
        }
    }
}

impl DescribeSource for CannedDescribe {
    fn describe(&self, _config_file: &Path) -> Result<String, DescribeError> {
        match &self.output {
            Ok(text) => Ok(text.clone()),
            Err(stderr) => Err(DescribeError::non_zero_exit("reframe", Some(1), stderr.clone())),
        }
    }
}

/// One test object as the runner's `--describe` prints it.
pub fn described_test(name: &str, modules: &[&str], environs: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "unique_name": name,
        "modules": modules,
        "valid_prog_environs": environs,
    })
}

pub fn describe_json(tests: &[serde_json::Value]) -> String {
    serde_json::to_string_pretty(tests).unwrap()
}
