//! External process invocation.
//!
//! Every component that shells out does so through [`CommandRunner`], so that
//! output policy and failure classification live in one place. Commands are
//! built as argument lists ([`Invocation`]), never as shell strings.

use dragnet_types::{DragnetError, Result};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A fully specified external command: a program and its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to be invoked.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument list.
    pub fn arg_list(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Where a child process stream is directed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Drop the stream
    Discard,
    /// Collect the stream into the [`RunOutput`]
    Capture,
    /// Pass the stream through to the operator's console
    Inherit,
    /// Append the stream to a log file, creating it if needed
    Append(PathBuf),
}

/// Reduced outcome of one external invocation.
///
/// A missing binary and a nonzero exit are both reported as `success ==
/// false`; callers that need to distinguish the two can inspect `code`,
/// which is `None` when the process never started or was killed by a signal.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Whether the command exited with status zero
    pub success: bool,
    /// Exit code, if the process ran and terminated normally
    pub code: Option<i32>,
    /// Captured standard output (empty unless the sink was `Capture`)
    pub stdout: String,
    /// Captured standard error (empty unless the sink was `Capture`)
    pub stderr: String,
}

impl RunOutput {
    fn not_found() -> Self {
        Self {
            success: false,
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Executes external commands.
///
/// The production implementation is [`SystemRunner`]; the trait seam exists
/// so lifecycle phases can be exercised in tests without the collaborator
/// tools installed. No retries happen at this layer; retry policy, if any,
/// belongs to the calling phase.
pub trait CommandRunner {
    /// Run one external command synchronously, blocking until it exits.
    ///
    /// Returns `Err` only for invoker-level problems (e.g. a log file that
    /// cannot be opened). A missing binary is a normal, unsuccessful
    /// [`RunOutput`], not an `Err`.
    fn run(
        &self,
        invocation: &Invocation,
        stdout: &OutputSink,
        stderr: &OutputSink,
    ) -> Result<RunOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn stdio_for(sink: &OutputSink) -> Result<Stdio> {
        match sink {
            OutputSink::Discard => Ok(Stdio::null()),
            OutputSink::Capture => Ok(Stdio::piped()),
            OutputSink::Inherit => Ok(Stdio::inherit()),
            OutputSink::Append(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)
                            .map_err(|e| DragnetError::file(parent, e))?;
                    }
                }
                let file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)
                    .map_err(|e| DragnetError::file(path, e))?;
                Ok(Stdio::from(file))
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        invocation: &Invocation,
        stdout: &OutputSink,
        stderr: &OutputSink,
    ) -> Result<RunOutput> {
        tracing::debug!(command = %invocation, "invoking external command");

        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.arg_list())
            .stdin(Stdio::null())
            .stdout(Self::stdio_for(stdout)?)
            .stderr(Self::stdio_for(stderr)?);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(program = invocation.program(), "command not found");
                return Ok(RunOutput::not_found());
            }
            Err(e) => return Err(DragnetError::Io(e)),
        };

        let output = child.wait_with_output().map_err(DragnetError::Io)?;

        let result = RunOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !result.success {
            tracing::debug!(
                command = %invocation,
                code = ?result.code,
                "external command failed"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn runner() -> SystemRunner {
        SystemRunner
    }

    #[test]
    fn test_zero_exit_is_success() {
        let inv = Invocation::new("sh").args(["-c", "exit 0"]);
        let out = runner()
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .unwrap();
        assert!(out.success);
        assert_eq!(out.code, Some(0));
    }

    #[test]
    fn test_nonzero_exit_is_failure() {
        let inv = Invocation::new("sh").args(["-c", "exit 3"]);
        let out = runner()
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
    }

    #[test]
    fn test_missing_binary_is_failure_not_error() {
        let inv = Invocation::new("dragnet-test-no-such-binary");
        let out = runner()
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, None);
    }

    #[test]
    fn test_capture_sink() {
        let inv = Invocation::new("sh").args(["-c", "echo hello"]);
        let out = runner()
            .run(&inv, &OutputSink::Capture, &OutputSink::Discard)
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_append_sink_accumulates() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("logs").join("phase.log");
        let sink = OutputSink::Append(log.clone());

        for word in ["first", "second"] {
            let inv = Invocation::new("sh").arg("-c").arg(format!("echo {}", word));
            let out = runner().run(&inv, &sink, &sink).unwrap();
            assert!(out.success);
        }

        let content = std::fs::read_to_string(&log).unwrap();
        assert!(content.contains("first"));
        assert!(content.contains("second"));
    }

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("docker").args(["compose", "up", "-d"]);
        assert_eq!(inv.to_string(), "docker compose up -d");
    }
}
