//! Version-control wrapper for the monitoring add-on repository.

use dragnet_core::process::{CommandRunner, Invocation, OutputSink};
use dragnet_types::{ExternalTool, Result};
use std::path::Path;

/// Upstream repository of the monitoring add-on stack.
pub const MONITORING_REPO_URL: &str = "https://github.com/stefanprodan/dockprom.git";

/// Thin client for the `git` binary.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Git<'a> {
    /// Create a new wrapper over the given runner.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Whether the tool is installed and answers a version query.
    pub fn installed(&self) -> bool {
        let inv = Invocation::new(ExternalTool::VersionControl.binary()).arg("--version");
        self.runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .map(|out| out.success)
            .unwrap_or(false)
    }

    /// Shallow-clone `url` into `dest`.
    pub fn clone_shallow(&self, url: &str, dest: &Path) -> Result<bool> {
        let inv = Invocation::new(ExternalTool::VersionControl.binary())
            .args(["clone", "--depth", "1", url])
            .arg(dest.to_string_lossy());
        let out = self
            .runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)?;
        Ok(out.success)
    }

    /// Pull the checkout at `dir`.
    pub fn pull(&self, dir: &Path) -> Result<bool> {
        let inv = Invocation::new(ExternalTool::VersionControl.binary())
            .arg("-C")
            .arg(dir.to_string_lossy())
            .arg("pull");
        let out = self
            .runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)?;
        Ok(out.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::process::RunOutput;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct RecordingRunner {
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(
            &self,
            invocation: &Invocation,
            _stdout: &OutputSink,
            _stderr: &OutputSink,
        ) -> Result<RunOutput> {
            self.calls.borrow_mut().push(invocation.to_string());
            Ok(RunOutput {
                success: true,
                code: Some(0),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_clone_and_pull_arguments() {
        let runner = RecordingRunner {
            calls: RefCell::new(Vec::new()),
        };
        let git = Git::new(&runner);
        let dest = PathBuf::from("dockprom");

        git.clone_shallow(MONITORING_REPO_URL, &dest).unwrap();
        git.pull(&dest).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(
            calls[0],
            format!("git clone --depth 1 {} dockprom", MONITORING_REPO_URL)
        );
        assert_eq!(calls[1], "git -C dockprom pull");
    }
}
