//! Docker control for a daemon that lives inside a VM
//!
//! [`DockerCommander`] maps container lifecycle operations onto docker CLI
//! invocations. [`VmDockerCommander`] formats those invocations and relays
//! them through any [`SshCommander`] transport.
//!
//! Arguments are interpolated into the command line verbatim and are NOT
//! shell-escaped. Option strings such as `"-d --name web"` rely on this, but
//! it also means container names, labels and paths taken from untrusted input
//! can inject arbitrary shell syntax on the Docker host.

pub mod commander;
pub mod error;
pub mod retry;

pub use commander::VmDockerCommander;
pub use error::{DockerError, Result};
pub use retry::{retry_after, RetryError, RetryPolicy};

use std::fmt;

use crate::transport::SshCommander;

pub trait DockerCommander {
    /// Running containers as printed by `docker ps`.
    fn ps(&self) -> Result<String>;

    /// Container status as reported by `docker inspect`, trimmed but otherwise
    /// verbatim. An unknown container surfaces as a transport error.
    fn status(&self, container: &str) -> Result<String>;

    /// Pull an image, returning the trimmed pull output.
    fn pull(&self, image: &str) -> Result<String>;

    fn run(&self, options: &str, container: &str) -> Result<()>;

    fn start(&self, container: &str) -> Result<()>;

    fn stop(&self, container: &str) -> Result<()>;

    /// Stop then start a container and wait until it stays `running`.
    fn restart(&self, container: &str) -> Result<()>;

    /// Create a container from `image`, returning the raw output (the new id).
    fn create(&self, options: &str, image: &str) -> Result<String>;

    /// Copy `source` on the Docker host to `target` inside the container.
    fn cp_to_container(&self, source: &str, container: &str, target: &str) -> Result<()>;

    /// Copy `source` inside the container to `target` on the Docker host.
    fn cp(&self, source: &str, container: &str, target: &str) -> Result<()>;

    fn rm(&self, container: &str) -> Result<()>;

    /// Id of the latest container carrying `label`, or an empty string when
    /// none matches.
    fn get_id(&self, label: &str) -> Result<String>;

    fn exec(&self, options: &str, container: &str, command: &str, args: &str) -> Result<String>;

    /// `true` iff `docker images -q` printed something. On a transport failure
    /// the captured output is still available through [`DockerError::stdout`].
    fn is_image_exist(&self, image: &str) -> Result<bool>;

    /// Run an arbitrary command on the Docker host.
    fn local_exec(&self, cmd: &str) -> Result<String>;
}

/// A Docker commander that also exposes its raw command channel.
pub trait SshDockerCommander: DockerCommander + SshCommander {}

impl<T: DockerCommander + SshCommander> SshDockerCommander for T {}

/// Values `docker inspect --format='{{.State.Status}}'` can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Restarting,
    Running,
    Paused,
    Exited,
    Removing,
    Dead,
    Other(String),
}

impl ContainerState {
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "created" => ContainerState::Created,
            "restarting" => ContainerState::Restarting,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "exited" => ContainerState::Exited,
            "removing" => ContainerState::Removing,
            "dead" => ContainerState::Dead,
            other => ContainerState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Restarting => "restarting",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Exited => "exited",
            ContainerState::Removing => "removing",
            ContainerState::Dead => "dead",
            ContainerState::Other(s) => s,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ContainerState::Running)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_state_parse_known_values() {
        for value in [
            "created",
            "restarting",
            "running",
            "paused",
            "exited",
            "removing",
            "dead",
        ] {
            let state = ContainerState::parse(value);
            assert!(!matches!(state, ContainerState::Other(_)), "{}", value);
            assert_eq!(state.as_str(), value);
        }
    }

    #[test]
    fn test_container_state_other_is_preserved() {
        let state = ContainerState::parse("Running");
        assert_eq!(state, ContainerState::Other("Running".to_string()));
        assert!(!state.is_running());
        assert_eq!(state.to_string(), "Running");
    }

    #[test]
    fn test_container_state_is_running() {
        assert!(ContainerState::parse("running").is_running());
        assert!(!ContainerState::parse("exited").is_running());
    }
}
