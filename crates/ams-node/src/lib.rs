//! # AMS Node Library
//!
//! Exposes the node's configuration and runtime for testing. The entry point
//! is the `main.rs` binary.

pub mod config;
pub mod runtime;

pub use config::NodeConfig;
pub use runtime::{LocalService, NodeRuntime};
