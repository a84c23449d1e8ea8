use std::thread;

use super::error::{DockerError, Result};
use super::retry::{retry_after, RetryPolicy};
use super::{ContainerState, DockerCommander};
use crate::transport::{self, SshCommander};

/// Talks to the Docker daemon inside a VM through an injected transport.
///
/// The transport is borrowed or shared, never closed, by the commander; pass
/// `&client` to keep using the client elsewhere.
#[derive(Debug, Clone)]
pub struct VmDockerCommander<C: SshCommander> {
    commander: C,
    restart_policy: RetryPolicy,
}

impl<C: SshCommander> VmDockerCommander<C> {
    pub fn new(commander: C) -> Self {
        Self::with_policy(commander, RetryPolicy::default())
    }

    pub fn with_policy(commander: C, restart_policy: RetryPolicy) -> Self {
        Self {
            commander,
            restart_policy,
        }
    }

    pub fn restart_policy(&self) -> &RetryPolicy {
        &self.restart_policy
    }

    fn log_command(&self, cmd: &str) {
        tracing::debug!("Executing docker command: '{}'", cmd);
    }

    fn send(&self, cmd: &str) -> Result<String> {
        self.log_command(cmd);
        Ok(self.commander.ssh_command(cmd)?)
    }

    fn send_trimmed(&self, cmd: &str) -> Result<String> {
        Ok(self.send(cmd)?.trim().to_string())
    }

    fn check_running(&self, container: &str) -> Result<()> {
        let status = self.status(container)?;
        if !ContainerState::parse(&status).is_running() {
            return Err(DockerError::UnexpectedState {
                container: container.to_string(),
                status,
            });
        }
        Ok(())
    }
}

impl<C: SshCommander> DockerCommander for VmDockerCommander<C> {
    fn ps(&self) -> Result<String> {
        self.send("docker ps")
    }

    fn status(&self, container: &str) -> Result<String> {
        self.send_trimmed(&format!(
            "docker inspect --format='{{{{.State.Status}}}}' {}",
            container
        ))
    }

    fn pull(&self, image: &str) -> Result<String> {
        self.send_trimmed(&format!("docker pull {}", image))
    }

    fn run(&self, options: &str, container: &str) -> Result<()> {
        self.send(&format!("docker run {} {}", options, container))?;
        Ok(())
    }

    fn start(&self, container: &str) -> Result<()> {
        self.send(&format!("docker start {}", container))?;
        Ok(())
    }

    fn stop(&self, container: &str) -> Result<()> {
        self.send(&format!("docker stop {}", container))?;
        Ok(())
    }

    fn restart(&self, container: &str) -> Result<()> {
        self.stop(container)?;
        self.start(container)?;

        // A container can report 'running' right after start and then exit.
        let policy = self.restart_policy;
        if !policy.settle_delay.is_zero() {
            thread::sleep(policy.settle_delay);
        }

        retry_after(policy.max_attempts, policy.interval, || {
            self.check_running(container).inspect_err(|err| {
                tracing::warn!("Container {} not running yet: {}", container, err);
            })
        })
        .map_err(|source| DockerError::NotRunning {
            container: container.to_string(),
            source,
        })?;

        tracing::info!("Container {} restarted", container);
        Ok(())
    }

    fn create(&self, options: &str, image: &str) -> Result<String> {
        self.send(&format!("docker create {} {}", options, image))
    }

    fn cp_to_container(&self, source: &str, container: &str, target: &str) -> Result<()> {
        self.send(&format!("docker cp {} {}:{}", source, container, target))?;
        Ok(())
    }

    fn cp(&self, source: &str, container: &str, target: &str) -> Result<()> {
        self.send(&format!("docker cp {}:{} {}", container, source, target))?;
        Ok(())
    }

    fn rm(&self, container: &str) -> Result<()> {
        self.send(&format!("docker rm {}", container))?;
        Ok(())
    }

    fn get_id(&self, label: &str) -> Result<String> {
        self.send_trimmed(&format!("docker ps -l -qf \"label={}\"", label))
    }

    fn exec(&self, options: &str, container: &str, command: &str, args: &str) -> Result<String> {
        self.send(&format!(
            "docker exec {} {} {} {}",
            options, container, command, args
        ))
    }

    fn is_image_exist(&self, image: &str) -> Result<bool> {
        let out = self.send_trimmed(&format!("docker images -q {}", image))?;
        Ok(!out.is_empty())
    }

    fn local_exec(&self, cmd: &str) -> Result<String> {
        self.send(cmd)
    }
}

impl<C: SshCommander> SshCommander for VmDockerCommander<C> {
    fn ssh_command(&self, command: &str) -> transport::Result<String> {
        self.commander.ssh_command(command)
    }
}
