//! # Dragnet Environment
//!
//! Environment materialization and lifecycle orchestration:
//!
//! - Variable sets loaded from a single configuration source
//! - Token substitution across the managed file tree
//! - Scaffold materialization (templates, fixed defaults, wordlists)
//! - Dynamic inventory generation for the cloud target
//! - Profile resolution
//! - The lifecycle orchestrator that sequences all of the above together
//!   with the collaborator tools

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod inventory;
pub mod lifecycle;
pub mod profile;
pub mod scaffold;
pub mod tokens;
pub mod variables;
pub mod wordlists;

// Re-export main types
pub use lifecycle::{CloudRequest, InitOptions, InvocationReport, Orchestrator, PhaseReport, StackRequest};
pub use profile::ResolvedProfile;
pub use scaffold::Scaffold;
pub use tokens::{substitute, ExclusionRules, SubstitutionReport};
pub use variables::VariableSet;
