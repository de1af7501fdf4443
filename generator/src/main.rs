mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use adt_generator::{generate_file, GenerateError, GeneratorConfig};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: cli::Cli) -> Result<(), GenerateError> {
    let config = GeneratorConfig::new(cli.includes.clone(), cli.excludes.clone());
    let files = generate_file(&cli.input, cli.kind(), &config)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&files)?
    } else {
        serde_json::to_string(&files)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
