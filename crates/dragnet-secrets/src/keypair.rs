//! SSH key-pair provisioning.

use dragnet_core::fs;
use dragnet_core::process::{CommandRunner, Invocation, OutputSink};
use dragnet_types::{DragnetError, ExternalTool, Result};
use std::path::{Path, PathBuf};

/// A private/public key pair at a fixed filesystem location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Private key path
    pub private_key: PathBuf,
    /// Public key path (`<private>.pub`)
    pub public_key: PathBuf,
}

impl KeyPair {
    /// Key pair named `name` under `dir`.
    pub fn at(dir: impl AsRef<Path>, name: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            private_key: dir.join(name),
            public_key: dir.join(format!("{}.pub", name)),
        }
    }

    /// Whether both halves of the pair exist.
    ///
    /// Both files are required: a generator that died after writing only
    /// the private key must not be treated as already satisfied on the
    /// next run.
    pub fn exists(&self) -> bool {
        self.private_key.is_file() && self.public_key.is_file()
    }
}

/// What `ensure_key_pair` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPairOutcome {
    /// Both files were already present; nothing was invoked
    AlreadyPresent,
    /// The external generator ran and exited cleanly
    Generated,
}

/// Ensure the key pair exists, generating it if needed.
///
/// Creates the parent directory recursively, then checks for BOTH key
/// files; if present, generation is skipped and reported as success.
/// Otherwise `ssh-keygen` produces a 4096-bit RSA pair with no passphrase.
/// Generation is idempotent by existence check, not content check, and the
/// external generator is expected to write its output atomically or not at
/// all.
pub fn ensure_key_pair(pair: &KeyPair, runner: &dyn CommandRunner) -> Result<KeyPairOutcome> {
    if let Some(parent) = pair.private_key.parent() {
        fs::ensure_dir(parent)?;
    }

    if pair.exists() {
        tracing::info!(
            private_key = %pair.private_key.display(),
            "key pair already exists, skipping generation"
        );
        return Ok(KeyPairOutcome::AlreadyPresent);
    }

    let inv = Invocation::new(ExternalTool::KeyGenerator.binary())
        .args(["-t", "rsa", "-b", "4096", "-N", ""])
        .arg("-f")
        .arg(pair.private_key.to_string_lossy());

    let out = runner.run(&inv, &OutputSink::Discard, &OutputSink::Discard)?;
    if !out.success {
        return Err(DragnetError::Secret(format!(
            "Key-pair generation failed (ssh-keygen exit code {:?})",
            out.code
        )));
    }

    tracing::info!(
        private_key = %pair.private_key.display(),
        public_key = %pair.public_key.display(),
        "key pair generated"
    );
    Ok(KeyPairOutcome::Generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::process::RunOutput;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct CountingRunner {
        calls: RefCell<Vec<String>>,
        succeed: bool,
    }

    impl CountingRunner {
        fn new(succeed: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                succeed,
            }
        }
    }

    impl CommandRunner for CountingRunner {
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
    fn test_existing_pair_skips_generation() {
        let dir = TempDir::new().unwrap();
        let pair = KeyPair::at(dir.path(), "dragnet");
        std::fs::write(&pair.private_key, "private").unwrap();
        std::fs::write(&pair.public_key, "public").unwrap();

        let runner = CountingRunner::new(true);
        let outcome = ensure_key_pair(&pair, &runner).unwrap();

        assert_eq!(outcome, KeyPairOutcome::AlreadyPresent);
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_partial_pair_triggers_generation() {
        let dir = TempDir::new().unwrap();
        let pair = KeyPair::at(dir.path(), "dragnet");
        std::fs::write(&pair.private_key, "orphaned private half").unwrap();

        let runner = CountingRunner::new(true);
        let outcome = ensure_key_pair(&pair, &runner).unwrap();

        assert_eq!(outcome, KeyPairOutcome::Generated);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_generation_invokes_ssh_keygen_with_fixed_parameters() {
        let dir = TempDir::new().unwrap();
        let keys = dir.path().join("ssh");
        let pair = KeyPair::at(&keys, "dragnet");

        let runner = CountingRunner::new(true);
        ensure_key_pair(&pair, &runner).unwrap();

        assert!(keys.is_dir());
        let calls = runner.calls.borrow();
        assert_eq!(
            calls[0],
            format!(
                "ssh-keygen -t rsa -b 4096 -N  -f {}",
                pair.private_key.display()
            )
        );
    }

    #[test]
    fn test_generator_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let pair = KeyPair::at(dir.path(), "dragnet");

        let runner = CountingRunner::new(false);
        let err = ensure_key_pair(&pair, &runner).unwrap_err();
        assert!(matches!(err, DragnetError::Secret(_)));
    }
}
