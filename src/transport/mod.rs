//! Remote command execution channels
//!
//! The Docker relay only needs one capability from its transport: run a shell
//! command on the Docker host and hand back stdout. [`SshClient`] reaches a VM
//! through the system `ssh` binary; [`LocalShell`] runs commands on this machine.

pub mod error;
pub mod local;
pub mod ssh;

pub use error::{Result, TransportError};
pub use local::LocalShell;
pub use ssh::SshClient;

use std::process::Output;
use std::sync::Arc;

use crate::config::{Config, TransportKind};

pub trait SshCommander {
    /// Run `command` through the host's shell and return its stdout.
    fn ssh_command(&self, command: &str) -> Result<String>;
}

impl<T: SshCommander + ?Sized> SshCommander for &T {
    fn ssh_command(&self, command: &str) -> Result<String> {
        (**self).ssh_command(command)
    }
}

impl<T: SshCommander + ?Sized> SshCommander for Box<T> {
    fn ssh_command(&self, command: &str) -> Result<String> {
        (**self).ssh_command(command)
    }
}

impl<T: SshCommander + ?Sized> SshCommander for Arc<T> {
    fn ssh_command(&self, command: &str) -> Result<String> {
        (**self).ssh_command(command)
    }
}

/// Transport selected from the user configuration.
#[derive(Debug, Clone)]
pub enum Transport {
    Ssh(SshClient),
    Local(LocalShell),
}

impl Transport {
    pub fn from_config(config: &Config) -> Self {
        match config.transport.kind {
            TransportKind::Ssh => Transport::Ssh(SshClient::from_config(&config.ssh)),
            TransportKind::Local => Transport::Local(match &config.transport.shell {
                Some(shell) => LocalShell::with_shell(shell.clone()),
                None => LocalShell::default(),
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Transport::Ssh(client) => format!("ssh {}", client.target()),
            Transport::Local(_) => "local shell".to_string(),
        }
    }
}

impl SshCommander for Transport {
    fn ssh_command(&self, command: &str) -> Result<String> {
        match self {
            Transport::Ssh(client) => client.ssh_command(command),
            Transport::Local(shell) => shell.ssh_command(command),
        }
    }
}

/// Turn a finished process into stdout or a [`TransportError::CommandFailed`].
pub(crate) fn collect_output(command: &str, output: Output) -> Result<String> {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!("stderr: {}", stderr);
        return Err(TransportError::CommandFailed {
            command: command.to_string(),
            code: output.status.code(),
            stdout,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(stdout)
}
