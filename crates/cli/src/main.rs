//! layerconf - load a layered configuration file and print the result.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build a loader from flags and `LAYERCONF_*` variables.
//! - Render the loaded document as JSON or YAML on stdout.
//!
//! Does NOT handle:
//! - Merging, imports, or references (see `crates/loader`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr so stdout carries only the document.

mod args;
mod error;
mod output;

use anyhow::bail;
use args::Cli;
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use layerconf_loader::{LoadOptions, LoadOutput, LoaderBuilder, path};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = LoaderBuilder::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::from(&e).as_i32());
    }

    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut builder = LoaderBuilder::new()
        .with_yaml()
        .with_process_env(!cli.no_process_env)
        .with_data(cli.forced_data()?);
    if let Some(environment) = &cli.environment {
        builder = builder.with_environment(environment);
    }
    if let Some(key) = &cli.imports_key {
        builder = builder.with_imports_key(key);
    }
    if cli.flatten {
        builder = builder.with_flatten_output(true);
    }
    let loader = builder.from_env()?.build();

    tracing::debug!(file = %cli.file.display(), extensions = ?loader.extensions(), "Loading");

    let output = if cli.raw {
        LoadOutput::Document(loader.load_raw(&cli.file, LoadOptions::default()).await?)
    } else {
        loader.load(&cli.file).await?
    };

    let rendered = match &cli.get {
        Some(key) => {
            let segments = path::parse_path(key)?;
            let Some(value) = path::get_in(output.as_document(), &segments) else {
                bail!("No value at '{}'", key);
            };
            output::render_value(value, cli.format)?
        }
        None => output::render_output(&output, cli.format)?,
    };

    print!("{rendered}");
    Ok(())
}

