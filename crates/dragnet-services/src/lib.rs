//! # Dragnet Services
//!
//! Typed wrappers around the external collaborator tools Dragnet drives.
//!
//! Each wrapper builds argument lists (never shell strings) and executes
//! them through the single process-invocation chokepoint in `dragnet-core`.
//! This crate also provides:
//! - **preflight**: the prerequisite checker run by the Check phase
//! - **http**: the production HTTP fetcher for remote assets

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ansible;
pub mod azure;
pub mod compose;
pub mod git;
pub mod http;
pub mod preflight;

pub use ansible::{Ansible, PlaybookRun};
pub use azure::AzureCli;
pub use compose::{Compose, UpOptions};
pub use git::Git;
pub use http::HttpFetcher;
pub use preflight::CheckReport;
