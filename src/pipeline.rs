//! One batch run: discover, seed, describe, overlay.

use crate::config::RunConfig;
use crate::describe::{collect_test_records, DescribeSource, ReframeDescriber};
use crate::discovery::discover_modules;
use crate::environment::EnvironmentTable;
use crate::error::Result;
use crate::matrix::{apply_overlay, build_module_classifications, seed_matrix, CoverageMatrix};
use crate::output::write_matrix;

/// Describer configured from the run's runner settings.
pub fn describer_for(config: &RunConfig) -> ReframeDescriber {
    ReframeDescriber::new(&config.runner, &config.suite_path, config.describe_timeout)
}

/// Environment table for the run: built-ins plus the optional site file.
pub fn environment_table(config: &RunConfig) -> Result<EnvironmentTable> {
    let mut table = EnvironmentTable::builtin();
    if let Some(path) = &config.environments {
        table.load_file(path)?;
    }
    Ok(table)
}

/// Builds the final matrix. Discovery and describe problems degrade to
/// fewer rows or no `TRUE` cells; they never fail the run.
pub fn build_matrix<S: DescribeSource + ?Sized>(
    config: &RunConfig,
    table: &EnvironmentTable,
    source: &S,
) -> CoverageMatrix {
    let records = collect_test_records(source, &config.config_file);

    let inventory = discover_modules(&config.roots, &config.system_tag, &config.module_extension);
    let mut matrix = seed_matrix(&inventory);

    tracing::info!("Classifying modules and their valid programming environments");
    let classifications = build_module_classifications(&records, table);
    let flipped = apply_overlay(&mut matrix, &classifications);
    tracing::debug!("Marked {flipped} cells as tested");

    matrix
}

/// Full run, ending with the CSV write. Only table loading and the write
/// can fail.
pub fn run<S: DescribeSource + ?Sized>(config: &RunConfig, source: &S) -> Result<CoverageMatrix> {
    let table = environment_table(config)?;
    let matrix = build_matrix(config, &table, source);
    write_matrix(&config.output_file, &matrix)?;
    Ok(matrix)
}
