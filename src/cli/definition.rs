//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vmdocker")]
#[command(about = "Drive the Docker daemon inside a VM over SSH")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "VMDOCKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run docker on this machine instead of over ssh
    #[arg(long, global = true)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List running containers
    Ps,

    /// Show a container's state (created, running, exited, ...)
    Status(ContainerArgs),

    /// Pull an image
    Pull(ImageArgs),

    /// Run a container
    Run(RunArgs),

    /// Start a container
    Start(ContainerArgs),

    /// Stop a container
    Stop(ContainerArgs),

    /// Stop and start a container, then wait for it to stay running
    Restart(RestartArgs),

    /// Create a container from an image
    Create(CreateArgs),

    /// Copy a file from the Docker host into a container
    CopyTo(CopyToArgs),

    /// Copy a file out of a container onto the Docker host
    CopyFrom(CopyFromArgs),

    /// Remove a container
    Rm(ContainerArgs),

    /// Print the id of the latest container carrying a label
    Id(LabelArgs),

    /// Run a command inside a container
    Exec(ExecArgs),

    /// Check whether an image is present (exit status 1 when it is not)
    ImageExists(ImageArgs),

    /// Run an arbitrary command on the Docker host
    LocalExec(LocalExecArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct ContainerArgs {
    /// Container name or id
    pub container: String,
}

#[derive(Args)]
pub struct ImageArgs {
    /// Image reference, e.g. busybox:latest
    pub image: String,
}

#[derive(Args)]
pub struct LabelArgs {
    /// Label filter, e.g. io.openshift.tags=addon
    pub label: String,
}

#[derive(Args)]
pub struct RunArgs {
    /// Options passed to `docker run` as-is
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub options: String,

    /// Image (and optional command) to run
    pub container: String,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Options passed to `docker create` as-is
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub options: String,

    pub image: String,
}

#[derive(Args)]
pub struct RestartArgs {
    /// Container name or id
    pub container: String,

    /// Delay after start before polling, in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Number of status polls before giving up
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Delay between status polls, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(Args)]
pub struct CopyToArgs {
    /// Path on the Docker host
    pub source: String,
    pub container: String,
    /// Path inside the container
    pub target: String,
}

#[derive(Args)]
pub struct CopyFromArgs {
    pub container: String,
    /// Path inside the container
    pub source: String,
    /// Path on the Docker host
    pub target: String,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Options passed to `docker exec` as-is
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub options: String,

    pub container: String,

    pub command: String,

    /// Arguments for the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct LocalExecArgs {
    /// Command line to run on the Docker host
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
