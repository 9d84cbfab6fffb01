//! Prerequisite checker.
//!
//! Verifies that required external tools are installed and authenticated
//! before any stateful phase runs. Each probe is a lightweight,
//! side-effect-free query; a missing binary and a nonzero exit both read as
//! "not available" and that coarse report is passed on verbatim. Checks run
//! in a fixed order so diagnostics are reproducible.

use crate::ansible::{Ansible, AZURE_COLLECTION};
use crate::azure::AzureCli;
use crate::compose::Compose;
use crate::git::Git;
use dragnet_core::process::CommandRunner;
use dragnet_types::{DragnetError, ExternalTool};

/// Aggregated prerequisite report: one diagnostic line per failed tool.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// AND of every individual check
    pub ok: bool,
    /// One human-readable line per failed check, in check order
    pub diagnostics: Vec<String>,
}

impl CheckReport {
    fn from_failures(diagnostics: Vec<String>) -> Self {
        Self {
            ok: diagnostics.is_empty(),
            diagnostics,
        }
    }
}

fn unavailable(tool: ExternalTool, hint: &str) -> String {
    DragnetError::ToolUnavailable(format!("{} ({})", tool, hint)).to_string()
}

fn unauthenticated(tool: ExternalTool, hint: &str) -> String {
    DragnetError::ToolUnauthenticated(format!("{} ({})", tool, hint)).to_string()
}

/// Check prerequisites for the cloud target.
///
/// Order: Azure CLI installed, Azure CLI logged in, Ansible installed,
/// Azure collection installed. Never returns an error; failures accumulate.
pub fn check_cloud(runner: &dyn CommandRunner) -> CheckReport {
    let az = AzureCli::new(runner);
    let ansible = Ansible::new(runner);
    let mut diagnostics = Vec::new();

    if !az.installed() {
        diagnostics.push(unavailable(
            ExternalTool::CloudCli,
            "install it before provisioning",
        ));
    }
    if !az.logged_in() {
        diagnostics.push(unauthenticated(
            ExternalTool::CloudCli,
            "run 'az login' before provisioning",
        ));
    }
    if !ansible.installed() {
        diagnostics.push(unavailable(
            ExternalTool::ConfigManager,
            "install it before provisioning",
        ));
    }
    if !ansible.collection_installed(AZURE_COLLECTION) {
        diagnostics.push(unavailable(
            ExternalTool::ProviderCollection,
            &format!("{} missing, run the prepare phase first", AZURE_COLLECTION),
        ));
    }

    CheckReport::from_failures(diagnostics)
}

/// Check prerequisites for the single-host stack target.
///
/// Order: docker compose available, git available.
pub fn check_stack(runner: &dyn CommandRunner) -> CheckReport {
    let compose = Compose::new(runner);
    let git = Git::new(runner);
    let mut diagnostics = Vec::new();

    if !compose.available() {
        diagnostics.push(unavailable(
            ExternalTool::ContainerRuntime,
            "install Docker with the compose plugin",
        ));
    }
    if !git.installed() {
        diagnostics.push(unavailable(
            ExternalTool::VersionControl,
            "needed for the monitoring add-on",
        ));
    }

    CheckReport::from_failures(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::process::{Invocation, OutputSink, RunOutput};
    use dragnet_types::Result;

    struct AbsentToolsRunner;

    impl CommandRunner for AbsentToolsRunner {
        fn run(
            &self,
            _invocation: &Invocation,
            _stdout: &OutputSink,
            _stderr: &OutputSink,
        ) -> Result<RunOutput> {
            Ok(RunOutput {
                success: false,
                code: None,
                ..Default::default()
            })
        }
    }

    struct PresentToolsRunner;

    impl CommandRunner for PresentToolsRunner {
        fn run(
            &self,
            _invocation: &Invocation,
            _stdout: &OutputSink,
            _stderr: &OutputSink,
        ) -> Result<RunOutput> {
            Ok(RunOutput {
                success: true,
                code: Some(0),
                stdout: "azure.azcollection 1.19.0".to_string(),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_all_cloud_tools_absent_yields_four_diagnostics() {
        let report = check_cloud(&AbsentToolsRunner);
        assert!(!report.ok);
        assert_eq!(report.diagnostics.len(), 4);
        assert!(report.diagnostics[0].contains("Azure CLI"));
        assert!(report.diagnostics[0].contains("Tool not available"));
        assert!(report.diagnostics[1].contains("Tool not authenticated"));
        assert!(report.diagnostics[2].contains("Ansible"));
        assert!(report.diagnostics[3].contains("azure.azcollection"));
    }

    #[test]
    fn test_all_cloud_tools_present() {
        let report = check_cloud(&PresentToolsRunner);
        assert!(report.ok);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_stack_check_order() {
        let report = check_stack(&AbsentToolsRunner);
        assert!(!report.ok);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report.diagnostics[0].contains("Docker Compose"));
        assert!(report.diagnostics[1].contains("Git"));
    }
}
