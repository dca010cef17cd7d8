//! Cluster registry and shared types for the skiff CLI.
//!
//! This crate provides the pieces the rest of the workspace builds on:
//! - [`Cluster`] records describing where apps are deployed
//! - [`Config`], the YAML-backed ordered cluster registry
//! - config and CA-certificate directory resolution

pub mod cluster;
pub mod config;
pub mod errors;
#[cfg(test)]
pub mod test_utils;

pub use cluster::Cluster;
pub use config::{Config, ca_cert_dir, config_dir};
pub use errors::ConfigError;
