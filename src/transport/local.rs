//! Transport that runs commands on this machine with `sh -c`

use std::process::Command;

use super::error::{Result, TransportError};
use super::{collect_output, SshCommander};

#[derive(Debug, Clone)]
pub struct LocalShell {
    shell: String,
}

impl Default for LocalShell {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }
}

impl LocalShell {
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl SshCommander for LocalShell {
    fn ssh_command(&self, command: &str) -> Result<String> {
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|source| TransportError::Spawn {
                program: self.shell.clone(),
                source,
            })?;

        collect_output(command, output)
    }
}
