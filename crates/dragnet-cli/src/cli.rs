//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dragnet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Security Scanning Platform Lifecycle Manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the single-host container stack
    Stack(StackArgs),

    /// Manage the cloud-provisioned cluster
    Cloud(CloudArgs),
}

#[derive(Args)]
pub struct StackArgs {
    /// Check stack prerequisites
    #[arg(long)]
    pub check: bool,

    /// Initialize the environment, wordlists, backup directory, and variables
    #[arg(long)]
    pub init: bool,

    /// Profile to initialize from
    #[arg(long, default_value = "default")]
    pub profile: String,

    /// Configuration file to use instead of a profile
    #[arg(long, value_name = "FILE")]
    pub conf_file: Option<PathBuf>,

    /// Bring the stack up
    #[arg(long, value_name = "MODE", value_parser = ["normal", "light", "debug"])]
    pub run: Option<String>,

    /// Stop the stack
    #[arg(long)]
    pub stop: bool,

    /// Stop and remove all stack containers
    #[arg(long)]
    pub down: bool,

    /// Delete the materialized environment files
    #[arg(long)]
    pub reset: bool,

    /// Skip confirmation for destructive phases
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct CloudArgs {
    /// Check cloud prerequisites
    #[arg(long)]
    pub check: bool,

    /// Prepare the key pair, toolchain, and inventory
    #[arg(long)]
    pub prepare: bool,

    /// Provision cloud resources
    #[arg(long)]
    pub provision: bool,

    /// Install services onto provisioned hosts
    #[arg(long)]
    pub install: bool,

    /// Destroy cloud resources
    #[arg(long)]
    pub destroy: bool,

    /// Skip confirmation for destructive phases
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    /// Execute the selected subcommand; returns the overall outcome.
    pub fn execute(&self) -> Result<bool> {
        match &self.command {
            Commands::Stack(args) => crate::commands::stack::execute(args),
            Commands::Cloud(args) => crate::commands::cloud::execute(args),
        }
    }
}
