//! Integration tests for the docker relay over a real shell transport
//!
//! A shell function named `docker` stands in for the CLI on the Docker host.
//! It keeps one container's state in a file so lifecycle commands can be
//! observed through `docker inspect`.

#![cfg(unix)]

use std::path::Path;

use vm_docker::docker::{DockerCommander, DockerError, RetryPolicy, VmDockerCommander};
use vm_docker::transport::{self, LocalShell, SshCommander, TransportError};

struct FakeDockerHost {
    shell: LocalShell,
    prelude: String,
}

impl FakeDockerHost {
    fn new(state_file: &Path) -> Self {
        let state = state_file.display();
        let prelude = format!(
            r#"docker() {{
  case "$1" in
    inspect)
      if [ "$3" != web ]; then echo "Error: No such object: $3" >&2; return 1; fi
      cat "{state}" ;;
    start) echo running > "{state}"; echo "$2" ;;
    stop) echo exited > "{state}"; echo "$2" ;;
    images) if [ "$3" = busybox ]; then echo d1165f221234; fi ;;
    pull) echo " $2:latest" ;;
    ps) if [ "$2" = -l ]; then echo ""; else printf 'CONTAINER ID   IMAGE\n'; fi ;;
    *) echo "$@" ;;
  esac
}}
"#
        );
        std::fs::write(state_file, "created\n").unwrap();
        Self {
            shell: LocalShell::default(),
            prelude,
        }
    }
}

impl SshCommander for FakeDockerHost {
    fn ssh_command(&self, command: &str) -> transport::Result<String> {
        self.shell
            .ssh_command(&format!("{}{}", self.prelude, command))
    }
}

fn setup() -> (tempfile::TempDir, FakeDockerHost) {
    let dir = tempfile::TempDir::new().unwrap();
    let host = FakeDockerHost::new(&dir.path().join("state"));
    (dir, host)
}

#[test]
fn test_status_follows_stop_and_start() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::new(&host);

    assert_eq!(docker.status("web").unwrap(), "created");
    docker.start("web").unwrap();
    assert_eq!(docker.status("web").unwrap(), "running");
    docker.stop("web").unwrap();
    assert_eq!(docker.status("web").unwrap(), "exited");
}

#[test]
fn test_status_of_missing_container_is_transport_error() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::new(&host);

    match docker.status("ghost").unwrap_err() {
        DockerError::Transport(TransportError::CommandFailed { stderr, .. }) => {
            assert_eq!(stderr, "Error: No such object: ghost");
        }
        other => panic!("expected a transport failure, got {:?}", other),
    }
}

#[test]
fn test_restart_reaches_running() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::with_policy(&host, RetryPolicy::immediate(5));

    docker.restart("web").unwrap();
    assert_eq!(docker.status("web").unwrap(), "running");
}

#[test]
fn test_restart_stops_at_failed_stop() {
    let (dir, host) = setup();
    let failing = FailOn {
        inner: &host,
        needle: "docker stop",
    };
    let docker = VmDockerCommander::with_policy(&failing, RetryPolicy::immediate(5));

    assert!(matches!(
        docker.restart("web"),
        Err(DockerError::Transport(_))
    ));
    // start never ran, so the container keeps its original state
    assert_eq!(
        std::fs::read_to_string(dir.path().join("state")).unwrap(),
        "created\n"
    );
}

#[test]
fn test_pull_and_image_checks() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::new(&host);

    assert_eq!(docker.pull("busybox").unwrap(), "busybox:latest");
    assert!(docker.is_image_exist("busybox").unwrap());
    assert!(!docker.is_image_exist("alpine").unwrap());
}

#[test]
fn test_ps_and_get_id() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::new(&host);

    assert_eq!(docker.ps().unwrap(), "CONTAINER ID   IMAGE\n");
    assert_eq!(docker.get_id("role=db").unwrap(), "");
}

#[test]
fn test_exec_and_local_exec_return_raw_output() {
    let (_dir, host) = setup();
    let docker = VmDockerCommander::new(&host);

    assert_eq!(
        docker.exec("-i", "web", "cat", "/etc/hostname").unwrap(),
        "exec -i web cat /etc/hostname\n"
    );
    assert_eq!(docker.local_exec("echo hi").unwrap(), "hi\n");
}

struct FailOn<'a, T: SshCommander> {
    inner: &'a T,
    needle: &'static str,
}

impl<T: SshCommander> SshCommander for FailOn<'_, T> {
    fn ssh_command(&self, command: &str) -> transport::Result<String> {
        if command.starts_with(self.needle) {
            return Err(TransportError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
                stdout: String::new(),
                stderr: "Error response from daemon".to_string(),
            });
        }
        self.inner.ssh_command(command)
    }
}
