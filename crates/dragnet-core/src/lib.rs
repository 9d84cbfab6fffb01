//! # Dragnet Core
//!
//! Shared plumbing for the Dragnet provisioning tool.
//!
//! This crate provides:
//!
//! - **Process Execution**: the single chokepoint through which every other
//!   component invokes external commands
//! - **Logging**: tracing initialization for the CLI
//! - **Path Layout**: the fixed on-disk layout managed by the tool
//! - **File Operations**: small filesystem helpers with path-carrying errors
//! - **Remote Fetch**: the seam production HTTP downloads plug into

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fetch;
pub mod fs;
pub mod log;
pub mod paths;
pub mod process;

// Re-export commonly used items
pub use dragnet_types::{DragnetError, Result};
pub use fetch::ContentFetcher;
pub use process::{CommandRunner, Invocation, OutputSink, RunOutput, SystemRunner};

/// Dragnet application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dragnet application name
pub const APP_NAME: &str = "dragnet";
