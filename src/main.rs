//! vmdocker - drive the Docker daemon inside a VM over SSH

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vm_docker::cli::{self, Cli};

fn main() -> Result<()> {
    if std::env::var("VMDOCKER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("vm_docker=debug")
            .with_writer(std::io::stderr)
            .init();
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    if !cli::run(cli)? {
        std::process::exit(1);
    }
    Ok(())
}
