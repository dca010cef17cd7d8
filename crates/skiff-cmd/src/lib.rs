//! Command implementations for the skiff CLI.
//!
//! Each module corresponds to a `skiff` top-level command; the
//! [`factory::Factory`] carries the lazily-initialized dependencies
//! they share.

pub mod app;
pub mod cluster;
pub mod factory;
pub mod git_credentials;
