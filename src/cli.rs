use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{
    ModuleRoot, RunConfig, DEFAULT_CONFIG_FILE, DEFAULT_DESCRIBE_TIMEOUT_SECS, DEFAULT_MANUAL_ROOT,
    DEFAULT_MODULE_EXTENSION, DEFAULT_OUTPUT_FILE, DEFAULT_RUNNER, DEFAULT_SPACK_ROOT,
    DEFAULT_SUITE_PATH, DEFAULT_SYSTEM_TAG,
};
use crate::logging::Verbosity;

const AFTER_HELP: &str = "\
How it works:
  1. Discovers installed modules under the manual and spack module roots.
  2. Marks FALSE for every compiler/MPI combination a module is built for.
  3. Extracts tested modules and environments from the test runner's --describe output.
  4. Marks TRUE where a test exists.
  5. Saves the matrix as CSV.

Examples:
  coverage-matrix
  coverage-matrix -C path/to/your/config-file.py
  coverage-matrix --config-file path/to/your/config-file.py --debug";

#[derive(Parser, Debug)]
#[command(name = "coverage-matrix")]
#[command(
    about = "Test coverage matrix generator - which installed modules have tests for which compiler/MPI environments",
    long_about = None,
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Test runner configuration file, passed through to the describe command
    #[arg(short = 'C', long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Enable debug messages for detailed output
    #[arg(long)]
    pub debug: bool,

    /// Root of the manually installed module tree
    #[arg(
        long,
        value_name = "DIR",
        env = "COVERAGE_MANUAL_ROOT",
        default_value = DEFAULT_MANUAL_ROOT
    )]
    pub manual_root: PathBuf,

    /// Root of the spack-managed module tree
    #[arg(
        long,
        value_name = "DIR",
        env = "COVERAGE_SPACK_ROOT",
        default_value = DEFAULT_SPACK_ROOT
    )]
    pub spack_root: PathBuf,

    /// Directory below each root that holds the module hierarchy
    #[arg(
        long,
        value_name = "PATH",
        env = "COVERAGE_SYSTEM_TAG",
        default_value = DEFAULT_SYSTEM_TAG
    )]
    pub system_tag: PathBuf,

    /// Extension of module files
    #[arg(long, value_name = "EXT", default_value = DEFAULT_MODULE_EXTENSION)]
    pub module_extension: String,

    /// Test runner executable
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "COVERAGE_RUNNER",
        default_value = DEFAULT_RUNNER
    )]
    pub runner: String,

    /// Test suite path, passed to the runner with -c
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SUITE_PATH)]
    pub suite_path: PathBuf,

    /// Seconds to wait for the describe command before giving up on it
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_DESCRIBE_TIMEOUT_SECS)]
    pub describe_timeout: u64,

    /// Extra environment name mappings (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub environments: Option<PathBuf>,

    /// Output CSV path
    #[arg(short = 'O', long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref table_path) = self.environments {
            validate_file(table_path).context("Invalid --environments")?;
        }
        if self.module_extension.is_empty() || self.module_extension.starts_with('.') {
            anyhow::bail!(
                "Module extension must be given without a leading dot: '{}'",
                self.module_extension
            );
        }
        if self.system_tag.is_absolute() {
            anyhow::bail!(
                "System tag must be relative to the module roots: {}",
                self.system_tag.display()
            );
        }
        if self.describe_timeout == 0 {
            anyhow::bail!("Describe timeout must be at least one second");
        }
        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet, self.debug)
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            roots: vec![
                ModuleRoot::new("manual", &self.manual_root),
                ModuleRoot::new("spack", &self.spack_root),
            ],
            system_tag: self.system_tag.clone(),
            module_extension: self.module_extension.clone(),
            config_file: self.config_file.clone(),
            runner: self.runner.clone(),
            suite_path: self.suite_path.clone(),
            describe_timeout: Duration::from_secs(self.describe_timeout),
            environments: self.environments.clone(),
            output_file: self.output_file.clone(),
        }
    }
}

pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }
    std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    Ok(())
}
