mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use pcitab::{load_config, run};
use pcitab_logger::{Logger, verbosity_level};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .console(true)
        .level(verbosity_level(cli.verbose));
    if let Some(dir) = &cli.log_dir {
        logger = logger.path(dir);
    }
    if let Some(filter) = &cli.log_filter {
        logger = logger.env_filter(filter);
    }
    let _logger = logger.init()?;

    let mut cfg =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    cli.apply(&mut cfg);

    let report = run(&cfg)?;
    tracing::info!(tables = report.tables.len(), "Done");

    Ok(())
}
