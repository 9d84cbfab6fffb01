//! Ansible wrapper: queries, playbook runs, and toolchain installation.

use dragnet_core::fetch::ContentFetcher;
use dragnet_core::process::{CommandRunner, Invocation, OutputSink};
use dragnet_types::{DragnetError, ExternalTool, Result};
use std::path::Path;

/// Provider collection required for cloud provisioning.
pub const AZURE_COLLECTION: &str = "azure.azcollection";

/// Python requirements of the provider collection.
pub const AZURE_REQUIREMENTS_URL: &str =
    "https://raw.githubusercontent.com/ansible-collections/azure/dev/requirements.txt";

/// One playbook execution: the playbook plus its connection parameters.
///
/// Output is appended to `log` on both streams so a failed run can be
/// inspected after the fact.
pub struct PlaybookRun<'p> {
    /// Playbook to execute
    pub playbook: &'p Path,
    /// Dynamic inventory file, if the playbook targets remote hosts
    pub inventory: Option<&'p Path>,
    /// Remote user to connect as
    pub remote_user: Option<&'p str>,
    /// Private key for remote authentication
    pub private_key: Option<&'p Path>,
    /// Phase log file output is appended to
    pub log: &'p Path,
}

/// Thin client for `ansible`, `ansible-playbook`, and `ansible-galaxy`.
pub struct Ansible<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Ansible<'a> {
    /// Create a new wrapper over the given runner.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Whether the tool is installed and answers a version query.
    pub fn installed(&self) -> bool {
        let inv = Invocation::new(ExternalTool::ConfigManager.binary()).arg("--version");
        self.runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .map(|out| out.success)
            .unwrap_or(false)
    }

    /// Whether a galaxy collection is installed.
    ///
    /// `ansible-galaxy collection list <name>` exits zero even for an
    /// unknown collection, so presence is a non-empty listing.
    pub fn collection_installed(&self, collection: &str) -> bool {
        let inv =
            Invocation::new(ExternalTool::ProviderCollection.binary()).args(["collection", "list", collection]);
        self.runner
            .run(&inv, &OutputSink::Capture, &OutputSink::Discard)
            .map(|out| out.success && !out.stdout.trim().is_empty())
            .unwrap_or(false)
    }

    /// Run one playbook, appending both output streams to its log file.
    ///
    /// Returns whether the playbook exited cleanly.
    pub fn playbook(&self, run: &PlaybookRun<'_>) -> Result<bool> {
        let mut inv = Invocation::new("ansible-playbook").arg(run.playbook.to_string_lossy());
        if let Some(inventory) = run.inventory {
            inv = inv.arg("-i").arg(inventory.to_string_lossy());
        }
        if let Some(user) = run.remote_user {
            inv = inv.arg("-u").arg(user);
        }
        if let Some(key) = run.private_key {
            inv = inv.arg("--private-key").arg(key.to_string_lossy());
        }

        let sink = OutputSink::Append(run.log.to_path_buf());
        let out = self.runner.run(&inv, &sink, &sink)?;
        Ok(out.success)
    }

    /// Install the configuration-management toolchain.
    ///
    /// Installs Ansible itself, downloads the provider collection's Python
    /// requirements to `requirements_dest`, installs them, then installs the
    /// provider collection. Steps are sequential; each depends on the one
    /// before it, so the first failure aborts the remainder.
    pub fn install_toolchain(
        &self,
        fetcher: &dyn ContentFetcher,
        requirements_dest: &Path,
    ) -> Result<()> {
        let pip = Invocation::new("pip").args(["install", "ansible"]);
        let out = self
            .runner
            .run(&pip, &OutputSink::Discard, &OutputSink::Discard)?;
        if !out.success {
            return Err(DragnetError::CommandFailed {
                program: "pip".to_string(),
                code: out.code,
            });
        }

        fetcher.fetch(AZURE_REQUIREMENTS_URL, requirements_dest)?;

        let pip_reqs = Invocation::new("pip")
            .args(["install", "-r"])
            .arg(requirements_dest.to_string_lossy());
        let out = self
            .runner
            .run(&pip_reqs, &OutputSink::Discard, &OutputSink::Discard)?;
        if !out.success {
            return Err(DragnetError::CommandFailed {
                program: "pip".to_string(),
                code: out.code,
            });
        }

        let galaxy = Invocation::new(ExternalTool::ProviderCollection.binary())
            .args(["collection", "install", AZURE_COLLECTION]);
        let out = self
            .runner
            .run(&galaxy, &OutputSink::Discard, &OutputSink::Discard)?;
        if !out.success {
            return Err(DragnetError::CommandFailed {
                program: "ansible-galaxy".to_string(),
                code: out.code,
            });
        }

        tracing::info!("configuration-management toolchain installed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::process::RunOutput;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct RecordingRunner {
        calls: RefCell<Vec<(String, OutputSink, OutputSink)>>,
        stdout: String,
    }

    impl RecordingRunner {
        fn new(stdout: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                stdout: stdout.to_string(),
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(
            &self,
            invocation: &Invocation,
            stdout: &OutputSink,
            stderr: &OutputSink,
        ) -> Result<RunOutput> {
            self.calls
                .borrow_mut()
                .push((invocation.to_string(), stdout.clone(), stderr.clone()));
            Ok(RunOutput {
                success: true,
                code: Some(0),
                stdout: self.stdout.clone(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_playbook_argument_construction() {
        let runner = RecordingRunner::new("");
        let ansible = Ansible::new(&runner);

        let playbook = PathBuf::from("playbooks/install.yaml");
        let inventory = PathBuf::from("target/inventory/hosts.yaml");
        let key = PathBuf::from("target/ssh/dragnet");
        let log = PathBuf::from("logs/install.log");

        let ok = ansible
            .playbook(&PlaybookRun {
                playbook: &playbook,
                inventory: Some(&inventory),
                remote_user: Some("dragnet"),
                private_key: Some(&key),
                log: &log,
            })
            .unwrap();
        assert!(ok);

        let calls = runner.calls.borrow();
        assert_eq!(
            calls[0].0,
            "ansible-playbook playbooks/install.yaml -i target/inventory/hosts.yaml \
             -u dragnet --private-key target/ssh/dragnet"
        );
        assert_eq!(calls[0].1, OutputSink::Append(log.clone()));
        assert_eq!(calls[0].2, OutputSink::Append(log));
    }

    #[test]
    fn test_collection_presence_needs_nonempty_listing() {
        let empty = RecordingRunner::new("   \n");
        assert!(!Ansible::new(&empty).collection_installed(AZURE_COLLECTION));

        let listed = RecordingRunner::new("azure.azcollection 1.19.0\n");
        assert!(Ansible::new(&listed).collection_installed(AZURE_COLLECTION));
    }
}
