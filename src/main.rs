mod cli;
mod configs;
mod deps;
mod document;
mod errors;
mod format;
mod manager;
mod mapper;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::io::{self, IsTerminal};

use cli::Cli;
use configs::ManagerConfig;
use format::{write_styled, Tone};
use manager::PipelineManager;

fn main() {
    let cli = Cli::parse();

    let logger = SimpleLogger::new()
        .with_level(LevelFilter::from(cli.general.level))
        .init()
        .context("could not start the logger");

    if let Err(err) = logger.and_then(|_| run(&cli)) {
        let stderr = io::stderr();
        let color = stderr.is_terminal();
        let _ = write_styled(&mut stderr.lock(), color, Tone::Error, &format!("ERROR: {:#}", err));
        std::process::exit(1);
    }
}

/// Everything after parsing and logger setup: validate, scaffold the working directory, launch
fn run(cli: &Cli) -> Result<()> {

    if cli.general.deps {
        let stdout = io::stdout();
        let color = stdout.is_terminal();
        let missing = deps::report(&mut stdout.lock(), color)?;
        info!("{} of {} tools not found on PATH", missing, deps::TOOLS.len());
        return Ok(());
    }

    // validate everything before the working directory is touched
    let options = cli.option_set()?;
    if let Some(options) = &options {
        options.check()?;
    }

    let mut manager = PipelineManager::new(ManagerConfig::from(cli))
        .context("could not load the configuration")?;
    manager
        .setup()
        .context("could not create the working directory")?;

    // fill the configuration with the pipeline options, unless reused from a project
    match &options {
        Some(options) => mapper::apply_options(manager.config_mut(), options),
        None => info!("Pipeline options ignored, configuration taken from the project as is"),
    }
    debug!("Configuration: {:?}", manager.config());

    manager
        .teardown()
        .context("could not write the working directory")?;

    if cli.general.run {
        manager.launch()?;
    }

    Ok(())
}
