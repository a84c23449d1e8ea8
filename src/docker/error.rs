use thiserror::Error;

use super::retry::RetryError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum DockerError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unexpected container state '{status}' for {container}")]
    UnexpectedState { container: String, status: String },

    #[error("Container {container} did not reach 'running': {source}")]
    NotRunning {
        container: String,
        #[source]
        source: RetryError<DockerError>,
    },
}

impl DockerError {
    /// Stdout captured from a failed command, empty when none was produced.
    ///
    /// `docker images -q` can print an id and still exit non-zero; the
    /// existence answer for such a failure is `!err.stdout().trim().is_empty()`.
    pub fn stdout(&self) -> &str {
        match self {
            DockerError::Transport(err) => err.stdout(),
            _ => "",
        }
    }
}

pub type Result<T> = std::result::Result<T, DockerError>;
