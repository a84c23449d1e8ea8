use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Host {target} is unreachable over ssh: {stderr}")]
    Unreachable { target: String, stderr: String },

    #[error("Command '{command}' failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl TransportError {
    /// Whatever the remote command wrote to stdout before failing.
    pub fn stdout(&self) -> &str {
        match self {
            TransportError::CommandFailed { stdout, .. } => stdout,
            _ => "",
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
