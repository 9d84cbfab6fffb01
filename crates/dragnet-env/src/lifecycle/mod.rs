//! Lifecycle orchestration.
//!
//! The orchestrator is the only component with phase knowledge. Each
//! invocation evaluates the requested phases independently, in a fixed
//! priority order, and accumulates failures: a failed phase never blocks a
//! later requested phase, but any failure makes the overall outcome a
//! failure. Phases are functions of an explicit, immutable request plus the
//! collaborator handles held by the orchestrator; there is no ambient
//! state.

pub mod cloud;
pub mod stack;

pub use cloud::CloudRequest;
pub use stack::{InitOptions, StackRequest};

use chrono::Local;
use dragnet_core::fetch::ContentFetcher;
use dragnet_core::paths;
use dragnet_core::process::CommandRunner;
use dragnet_types::{DragnetError, LifecyclePhase, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of one lifecycle phase.
#[derive(Debug)]
pub struct PhaseReport {
    /// Phase this report covers
    pub phase: LifecyclePhase,
    /// Whether the phase succeeded
    pub ok: bool,
    /// Human-readable diagnostics, in the order they occurred
    pub notes: Vec<String>,
}

impl PhaseReport {
    fn new(phase: LifecyclePhase) -> Self {
        Self {
            phase,
            ok: true,
            notes: Vec::new(),
        }
    }

    fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    fn fail(&mut self, note: impl Into<String>) {
        let note = note.into();
        tracing::error!(phase = %self.phase, "{}", note);
        self.ok = false;
        self.notes.push(note);
    }
}

/// Accumulated outcome of one invocation.
#[derive(Debug, Default)]
pub struct InvocationReport {
    /// One report per requested phase, in execution order
    pub phases: Vec<PhaseReport>,
}

impl InvocationReport {
    /// Whether every requested phase succeeded.
    pub fn ok(&self) -> bool {
        self.phases.iter().all(|phase| phase.ok)
    }

    /// Whether any phase was requested at all.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Sequences lifecycle phases over the managed root.
pub struct Orchestrator<'a> {
    root: PathBuf,
    runner: &'a dyn CommandRunner,
    fetcher: &'a dyn ContentFetcher,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator over `root` using the given collaborator handles.
    pub fn new(
        root: impl AsRef<Path>,
        runner: &'a dyn CommandRunner,
        fetcher: &'a dyn ContentFetcher,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            runner,
            fetcher,
        }
    }

    /// Managed root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner
    }

    pub(crate) fn fetcher(&self) -> &dyn ContentFetcher {
        self.fetcher
    }

    /// Run the requested single-host stack phases in fixed priority order.
    pub fn run_stack(&self, request: &StackRequest) -> InvocationReport {
        let mut report = InvocationReport::default();
        if request.check {
            report.phases.push(stack::check(self));
        }
        if let Some(init) = &request.init {
            report.phases.push(stack::init(self, init));
        }
        if let Some(mode) = request.run {
            report.phases.push(stack::run(self, mode));
        }
        if request.stop {
            report.phases.push(stack::stop(self));
        }
        if request.down {
            report.phases.push(stack::down(self));
        }
        if request.reset {
            report.phases.push(stack::reset(self));
        }
        report
    }

    /// Run the requested cloud phases in fixed priority order.
    pub fn run_cloud(&self, request: &CloudRequest) -> InvocationReport {
        let mut report = InvocationReport::default();
        if request.check {
            report.phases.push(cloud::check(self));
        }
        if request.prepare {
            report.phases.push(cloud::prepare(self));
        }
        if request.provision {
            report.phases.push(cloud::provision(self));
        }
        if request.install {
            report.phases.push(cloud::install(self));
        }
        if request.destroy {
            report.phases.push(cloud::destroy(self));
        }
        report
    }

    /// Open this phase's append-only log and stamp a header line.
    pub(crate) fn phase_log(&self, phase: LifecyclePhase) -> Result<PathBuf> {
        let path = paths::phase_log(&self.root, &phase.to_string());
        if let Some(parent) = path.parent() {
            dragnet_core::fs::ensure_dir(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| DragnetError::file(&path, e))?;
        writeln!(
            file,
            "==== {} invoked at {} ====",
            phase,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .map_err(|e| DragnetError::file(&path, e))?;
        Ok(path)
    }
}
