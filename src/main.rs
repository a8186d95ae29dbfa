use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use coverage_matrix::{cli, logging, pipeline};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    args.validate().context("Invalid arguments")?;
    logging::init(args.verbosity());

    let config = args.run_config();
    let describer = pipeline::describer_for(&config);

    println!("Starting test coverage matrix generation");
    let matrix = pipeline::run(&config, &describer).with_context(|| {
        format!(
            "Failed to produce coverage matrix '{}'",
            config.output_file.display()
        )
    })?;

    let summary = matrix.summary();
    println!(
        "Test coverage matrix saved to '{}' ({} modules, {} tested, {} untested)",
        config.output_file.display(),
        summary.modules,
        summary.tested,
        summary.untested
    );

    Ok(())
}
