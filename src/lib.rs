//! vm-docker library - relay docker CLI commands to a daemon inside a VM

pub mod cli;
pub mod config;
pub mod docker;
pub mod transport;
