//! Command line tool for converting voxel phantoms into PENELOPE inputs
#![doc = include_str!("../readme.md")]

mod cli;
mod progress;

// standard library
use std::error::Error;
use std::process::ExitCode;

// crate modules
use crate::cli::Cli;
use crate::progress::SliceProgress;

// penvox modules
use penvox_format::{f, Thousands};
use penvox_penelope::{convert, count_lines, Config, NoProgress, VOX_HEADER_LINES};

// external crates
use clap::Parser;
use log::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging_init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let base = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let config = cli.apply(base)?;
    config.validate()?;

    let report = if cli.no_progress || cli.quiet {
        convert(&config, &NoProgress)?
    } else {
        let progress = SliceProgress::new(&config.dimensions, &config.projections);
        convert(&config, &progress)?
    };

    info!("{report}");

    if cli.verify {
        let expected = VOX_HEADER_LINES + report.phantom.number_of_voxels();
        let found = count_lines(&config.vox)?;
        if found != expected {
            return Err(f!(
                "{:?} has {} lines, expected {}",
                config.vox,
                found.thousands(),
                expected.thousands()
            )
            .into());
        }
        info!("Verified {} lines in {:?}", found.thousands(), config.vox);
    }

    Ok(())
}

/// Sets up logging at runtime to allow for multiple verbosity levels
fn logging_init(verbosity: u8, quiet: bool) {
    let result = stderrlog::new()
        .modules([
            module_path!(),
            "penvox_organlist",
            "penvox_phantom",
            "penvox_penelope",
        ])
        .quiet(quiet)
        .verbosity(verbosity as usize + 2)
        .show_level(true)
        .init();

    if let Err(e) = result {
        eprintln!("Failed to initialise logging: {e}");
    }
}
