//! Handles for the external collaborator tools Dragnet shells out to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one external collaborator tool.
///
/// A handle is queried, never mutated: the prerequisite checker asks whether
/// the tool is present (and, where it applies, authenticated) at every
/// invocation, and nothing is cached across invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalTool {
    /// Cloud provider CLI (`az`)
    CloudCli,
    /// Configuration-management tool (`ansible`, `ansible-playbook`)
    ConfigManager,
    /// Cloud provider collection for the configuration-management tool
    ProviderCollection,
    /// Container runtime compose interface (`docker compose`)
    ContainerRuntime,
    /// Version-control tool (`git`)
    VersionControl,
    /// Local key-pair generator (`ssh-keygen`)
    KeyGenerator,
}

impl ExternalTool {
    /// Binary invoked for this tool.
    pub fn binary(&self) -> &'static str {
        match self {
            ExternalTool::CloudCli => "az",
            ExternalTool::ConfigManager => "ansible",
            ExternalTool::ProviderCollection => "ansible-galaxy",
            ExternalTool::ContainerRuntime => "docker",
            ExternalTool::VersionControl => "git",
            ExternalTool::KeyGenerator => "ssh-keygen",
        }
    }

    /// Human-readable name used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            ExternalTool::CloudCli => "Azure CLI",
            ExternalTool::ConfigManager => "Ansible",
            ExternalTool::ProviderCollection => "Azure Ansible collection",
            ExternalTool::ContainerRuntime => "Docker Compose",
            ExternalTool::VersionControl => "Git",
            ExternalTool::KeyGenerator => "ssh-keygen",
        }
    }
}

impl fmt::Display for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
