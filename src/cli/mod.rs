//! CLI command implementations

pub mod definition;

pub use definition::{Cli, Commands};

use anyhow::{Context, Result};
use std::io::Write;

use crate::config::{Config, RestartConfig, TransportKind};
use crate::docker::{ContainerState, DockerCommander, VmDockerCommander};
use crate::transport::Transport;

/// Run a parsed command line. Returns `false` when the command completed but
/// should exit with a failure status (a missing image for `image-exists`).
pub fn run(cli: Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if cli.local {
        config.transport.kind = TransportKind::Local;
    }

    let mut stdout = std::io::stdout().lock();

    if let Commands::Config = cli.command {
        write!(stdout, "{}", config.to_toml()?)?;
        return Ok(true);
    }

    if let Commands::Restart(args) = &cli.command {
        apply_restart_overrides(&mut config.restart, args);
    }

    let transport = Transport::from_config(&config);
    tracing::debug!("Relaying docker commands via {}", transport.describe());
    let docker = VmDockerCommander::with_policy(transport, config.restart.policy());

    execute(&docker, cli.command, &mut stdout)
}

fn apply_restart_overrides(restart: &mut RestartConfig, args: &definition::RestartArgs) {
    if let Some(ms) = args.settle_ms {
        restart.settle_delay_ms = ms;
    }
    if let Some(attempts) = args.attempts {
        restart.max_attempts = attempts;
    }
    if let Some(ms) = args.interval_ms {
        restart.interval_ms = ms;
    }
}

/// Dispatch one subcommand against `docker`, writing its output to `out`.
pub fn execute<D: DockerCommander>(
    docker: &D,
    command: Commands,
    out: &mut dyn Write,
) -> Result<bool> {
    match command {
        Commands::Ps => write!(out, "{}", docker.ps()?)?,
        Commands::Status(args) => {
            let state = ContainerState::parse(&docker.status(&args.container)?);
            writeln!(out, "{}", state)?
        }
        Commands::Pull(args) => writeln!(out, "{}", docker.pull(&args.image)?)?,
        Commands::Run(args) => docker
            .run(&args.options, &args.container)
            .with_context(|| format!("Failed to run {}", args.container))?,
        Commands::Start(args) => docker
            .start(&args.container)
            .with_context(|| format!("Failed to start {}", args.container))?,
        Commands::Stop(args) => docker
            .stop(&args.container)
            .with_context(|| format!("Failed to stop {}", args.container))?,
        Commands::Restart(args) => {
            docker
                .restart(&args.container)
                .with_context(|| format!("Failed to restart {}", args.container))?;
            writeln!(out, "{} is running", args.container)?;
        }
        Commands::Create(args) => write!(out, "{}", docker.create(&args.options, &args.image)?)?,
        Commands::CopyTo(args) => docker
            .cp_to_container(&args.source, &args.container, &args.target)
            .context("Copy into container failed")?,
        Commands::CopyFrom(args) => docker
            .cp(&args.source, &args.container, &args.target)
            .context("Copy out of container failed")?,
        Commands::Rm(args) => docker
            .rm(&args.container)
            .with_context(|| format!("Failed to remove {}", args.container))?,
        Commands::Id(args) => writeln!(out, "{}", docker.get_id(&args.label)?)?,
        Commands::Exec(args) => {
            let output = docker.exec(
                &args.options,
                &args.container,
                &args.command,
                &args.args.join(" "),
            )?;
            write!(out, "{}", output)?;
        }
        Commands::ImageExists(args) => {
            let exists = docker.is_image_exist(&args.image)?;
            writeln!(out, "{}", exists)?;
            return Ok(exists);
        }
        Commands::LocalExec(args) => {
            write!(out, "{}", docker.local_exec(&args.command.join(" "))?)?
        }
        Commands::Config => {}
    }

    Ok(true)
}
