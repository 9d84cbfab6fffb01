//! Container runtime compose wrapper.

use dragnet_core::process::{CommandRunner, Invocation, OutputSink};
use dragnet_types::{ExternalTool, Result};
use std::path::Path;

/// Options for `docker compose up`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpOptions<'o> {
    /// Compose file to use; `None` means the runtime's default lookup
    pub file: Option<&'o Path>,
    /// Run detached (`-d`)
    pub detached: bool,
    /// Per-service replica-count overrides (`--scale svc=n`)
    pub scale: &'o [(&'o str, u32)],
}

/// Thin client for the `docker compose` interface.
pub struct Compose<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Compose<'a> {
    /// Create a new wrapper over the given runner.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn base(file: Option<&Path>) -> Invocation {
        let mut inv = Invocation::new(ExternalTool::ContainerRuntime.binary()).arg("compose");
        if let Some(file) = file {
            inv = inv.arg("-f").arg(file.to_string_lossy());
        }
        inv
    }

    /// Whether the compose interface is available.
    pub fn available(&self) -> bool {
        let inv = Invocation::new(ExternalTool::ContainerRuntime.binary()).args(["compose", "version"]);
        self.runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)
            .map(|out| out.success)
            .unwrap_or(false)
    }

    /// Bring a stack up.
    ///
    /// Attached runs inherit the operator's console; detached runs keep
    /// their output. Returns whether the command exited cleanly.
    pub fn up(&self, opts: &UpOptions<'_>) -> Result<bool> {
        let mut inv = Self::base(opts.file).arg("up");
        for (service, replicas) in opts.scale {
            inv = inv.arg("--scale").arg(format!("{}={}", service, replicas));
        }
        if opts.detached {
            inv = inv.arg("-d");
        }

        let sink = if opts.detached {
            OutputSink::Discard
        } else {
            OutputSink::Inherit
        };
        let out = self.runner.run(&inv, &sink, &sink)?;
        Ok(out.success)
    }

    /// Stop a stack without removing containers.
    pub fn stop(&self, file: Option<&Path>) -> Result<bool> {
        let inv = Self::base(file).arg("stop");
        let out = self
            .runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)?;
        Ok(out.success)
    }

    /// Stop and remove a stack.
    pub fn down(&self, file: Option<&Path>) -> Result<bool> {
        let inv = Self::base(file).arg("down");
        let out = self
            .runner
            .run(&inv, &OutputSink::Discard, &OutputSink::Discard)?;
        Ok(out.success)
    }
}
