//! `yaml-patch`: apply YAML patches to a document.
//!
//! Usage:
//!   yaml-patch -o ops.yml [-o more-ops.yml] [--output json] [--strict] < doc.yml

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use yaml_patch::cli::{run, Cli};

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let out = run(&cli).context("failed to apply patch")?;

    io::stdout()
        .write_all(out.as_bytes())
        .context("failed to write document")?;
    Ok(())
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
