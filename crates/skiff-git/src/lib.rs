//! Git command wrapper, remote resolution, and credential bridging for skiff.

pub mod client;
pub mod credential;
pub mod errors;
pub mod remote;
pub mod resolver;
pub mod setup;
pub mod urls;
