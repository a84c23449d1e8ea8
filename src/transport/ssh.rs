//! Transport backed by the system `ssh` client
//!
//! Every command opens a fresh `ssh` process in batch mode, so no password
//! prompt can block the relay. Key-based authentication is expected, either
//! through `identity_file` or the user's ssh agent and `~/.ssh/config`.

use std::ffi::OsString;
use std::process::Command;

use super::error::{Result, TransportError};
use super::{collect_output, SshCommander};
use crate::config::SshConfig;

/// Exit status `ssh` itself uses for connection and authentication failures.
const SSH_CONNECTION_FAILURE: i32 = 255;

#[derive(Debug, Clone)]
pub struct SshClient {
    program: OsString,
    host: String,
    user: Option<String>,
    port: Option<u16>,
    identity_file: Option<String>,
    batch_mode: bool,
    options: Vec<String>,
}

impl SshClient {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            program: OsString::from("ssh"),
            host: host.into(),
            user: None,
            port: None,
            identity_file: None,
            batch_mode: true,
            options: Vec::new(),
        }
    }

    pub fn from_config(config: &SshConfig) -> Self {
        let mut client = Self::new(config.host.clone());
        if let Some(user) = &config.user {
            client.set_user(user.clone());
        }
        if let Some(port) = config.port {
            client.set_port(port);
        }
        if let Some(identity) = &config.identity_file {
            client.set_identity_file(identity.clone());
        }
        for option in &config.options {
            client.push_option(option.clone());
        }
        client.set_batch_mode(config.batch_mode);
        client
    }

    /// Overrides the program used in place of `ssh`.
    pub fn set_program<S: Into<OsString>>(&mut self, program: S) -> &mut Self {
        self.program = program.into();
        self
    }

    pub fn set_user<S: Into<String>>(&mut self, user: S) -> &mut Self {
        self.user = Some(user.into());
        self
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    pub fn set_identity_file<S: Into<String>>(&mut self, path: S) -> &mut Self {
        self.identity_file = Some(path.into());
        self
    }

    pub fn set_batch_mode(&mut self, enabled: bool) -> &mut Self {
        self.batch_mode = enabled;
        self
    }

    /// Adds an `-o` option such as `StrictHostKeyChecking=no`.
    pub fn push_option<S: Into<String>>(&mut self, option: S) -> &mut Self {
        self.options.push(option.into());
        self
    }

    /// `user@host`, with IPv6 literals bracketed.
    pub fn target(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        match &self.user {
            Some(user) => format!("{}@{}", user, host),
            None => host,
        }
    }

    fn args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(6 + 2 * self.options.len());

        if self.batch_mode {
            args.push("-oBatchMode=yes".to_string());
        }

        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }

        if let Some(identity) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity.clone());
        }

        for option in &self.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }

        // A host such as `-oProxyCommand=...` must never be read as an option.
        args.push("--".to_string());
        args.push(self.target());
        args.push(command.to_string());
        args
    }
}

impl SshCommander for SshClient {
    fn ssh_command(&self, command: &str) -> Result<String> {
        let args = self.args(command);
        tracing::trace!("ssh {:?}", args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| TransportError::Spawn {
                program: self.program.to_string_lossy().to_string(),
                source,
            })?;

        if output.status.code() == Some(SSH_CONNECTION_FAILURE) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransportError::Unreachable {
                target: self.target(),
                stderr: stderr.trim().to_string(),
            });
        }

        collect_output(command, output)
    }
}
