//! Azure CLI wrapper.

use dragnet_core::process::{CommandRunner, Invocation, OutputSink};
use dragnet_types::ExternalTool;

/// Thin client for the `az` binary.
///
/// Only side-effect-free queries live here; resource provisioning and
/// teardown go through Ansible playbooks using the CLI's pre-established
/// local session.
pub struct AzureCli<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> AzureCli<'a> {
    /// Create a new wrapper over the given runner.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Whether the CLI binary is installed and answers a version query.
    pub fn installed(&self) -> bool {
        let inv = Invocation::new(ExternalTool::CloudCli.binary()).arg("--version");
        self.runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .map(|out| out.success)
            .unwrap_or(false)
    }

    /// Whether a local session is established (`az account show`).
    pub fn logged_in(&self) -> bool {
        let inv = Invocation::new(ExternalTool::CloudCli.binary()).args(["account", "show"]);
        self.runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .map(|out| out.success)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::process::RunOutput;
    use dragnet_types::Result;
    use std::cell::RefCell;

    struct ScriptedRunner {
        calls: RefCell<Vec<String>>,
        succeed: bool,
    }

    impl CommandRunner for ScriptedRunner {
        fn run(
            &self,
            invocation: &Invocation,
            _stdout: &OutputSink,
            _stderr: &OutputSink,
        ) -> Result<RunOutput> {
            self.calls.borrow_mut().push(invocation.to_string());
            Ok(RunOutput {
                success: self.succeed,
                code: Some(if self.succeed { 0 } else { 1 }),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_queries_are_side_effect_free_invocations() {
        let runner = ScriptedRunner {
            calls: RefCell::new(Vec::new()),
            succeed: true,
        };
        let az = AzureCli::new(&runner);
        assert!(az.installed());
        assert!(az.logged_in());
        assert_eq!(
            *runner.calls.borrow(),
            vec!["az --version", "az account show"]
        );
    }

    #[test]
    fn test_nonzero_exit_reads_as_absent() {
        let runner = ScriptedRunner {
            calls: RefCell::new(Vec::new()),
            succeed: false,
        };
        let az = AzureCli::new(&runner);
        assert!(!az.installed());
        assert!(!az.logged_in());
    }
}
