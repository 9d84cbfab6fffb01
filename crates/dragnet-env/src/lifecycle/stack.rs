//! Single-host stack phases.

use super::{Orchestrator, PhaseReport};
use crate::profile;
use crate::scaffold::Scaffold;
use crate::tokens::{self, ExclusionRules};
use crate::variables::VariableSet;
use crate::wordlists;
use dragnet_core::paths;
use dragnet_services::compose::{Compose, UpOptions};
use dragnet_services::git::{Git, MONITORING_REPO_URL};
use dragnet_services::preflight;
use dragnet_types::{LifecyclePhase, RunMode};
use std::path::PathBuf;

/// Scanner services brought up with more than one replica.
pub const SCALED_SERVICES: &[(&str, u32)] = &[
    ("dragnet-nmap", 5),
    ("dragnet-nuclei-cve", 5),
    ("dragnet-nuclei-vulnerability", 5),
    ("dragnet-nuclei-exposed-panels", 5),
    ("dragnet-nuclei-exposure", 5),
    ("dragnet-nuclei-misconfiguration", 5),
    ("dragnet-nuclei-technologies", 5),
    ("dragnet-masscan", 2),
];

/// Options for the stack Prepare/Init phase.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Named profile to resolve the configuration source from
    pub profile: String,
    /// Explicit configuration source, overriding the profile
    pub conf_file: Option<PathBuf>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            conf_file: None,
        }
    }
}

/// Requested phases for one stack invocation.
#[derive(Debug, Clone, Default)]
pub struct StackRequest {
    /// Verify prerequisite tooling
    pub check: bool,
    /// Materialize the environment and substitute tokens
    pub init: Option<InitOptions>,
    /// Bring the stack up in the given mode
    pub run: Option<RunMode>,
    /// Stop the stack
    pub stop: bool,
    /// Stop and remove the stack
    pub down: bool,
    /// Delete materialized environment state
    pub reset: bool,
}

pub(super) fn check(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Check);
    for diagnostic in preflight::check_stack(o.runner()).diagnostics {
        report.fail(diagnostic);
    }
    report
}

pub(super) fn init(o: &Orchestrator<'_>, opts: &InitOptions) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Prepare);

    let resolved = profile::resolve(o.root(), &opts.profile, opts.conf_file.as_deref());
    report.note(format!(
        "using {} as config source",
        resolved.config_source.display()
    ));

    let scaffold = Scaffold::new(o.root());
    match scaffold.materialize() {
        Ok(created) => report.note(format!("{} environment file(s) materialized", created.len())),
        Err(e) => report.fail(format!("Materialization failed: {}", e)),
    }
    if let Err(e) = scaffold.apply_fixed_defaults() {
        report.fail(format!("Default scaffold files failed: {}", e));
    }
    if let Some(export) = &resolved.realm_export {
        if let Err(e) = scaffold.apply_realm_export(export) {
            report.fail(format!("Realm export failed: {}", e));
        }
    }

    if let Err(e) = dragnet_core::fs::ensure_dir(o.root().join(paths::BACKUP_DIR)) {
        report.fail(format!("Backup directory creation failed: {}", e));
    }

    let git = Git::new(o.runner());
    let monitoring = o.root().join(paths::MONITORING_DIR);
    let ensured = if monitoring.is_dir() {
        git.pull(&monitoring)
    } else {
        git.clone_shallow(MONITORING_REPO_URL, &monitoring)
    };
    match ensured {
        Ok(true) => {}
        Ok(false) => report.fail("Monitoring add-on clone/pull failed"),
        Err(e) => report.fail(format!("Monitoring add-on: {}", e)),
    }

    for (url, e) in wordlists::fetch_all(&o.root().join(paths::WORDLISTS_DIR), o.fetcher()) {
        report.fail(format!("Wordlist fetch failed for {}: {}", url, e));
    }

    // A broken config source aborts the phase here; everything above has
    // already been attempted and reported.
    let variables = match VariableSet::load(&resolved.config_source) {
        Ok(variables) => variables,
        Err(e) => {
            report.fail(e.to_string());
            return report;
        }
    };

    let mut rules = ExclusionRules::reference();
    let source_needle = resolved
        .config_source
        .strip_prefix(o.root())
        .unwrap_or(&resolved.config_source);
    rules.push(source_needle.to_string_lossy());

    let result = tokens::substitute(o.root(), &variables, &rules);
    report.note(format!("{} file(s) modified", result.modified.len()));
    for (path, e) in &result.errors {
        report.fail(format!("Substitution failed for {}: {}", path.display(), e));
    }

    report
}

pub(super) fn run(o: &Orchestrator<'_>, mode: RunMode) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Run);
    let compose = Compose::new(o.runner());

    if mode == RunMode::Normal {
        let monitoring_file = o.root().join(paths::MONITORING_COMPOSE_FILE);
        match compose.up(&UpOptions {
            file: Some(&monitoring_file),
            detached: true,
            scale: &[],
        }) {
            Ok(true) => {}
            Ok(false) => report.fail("Monitoring stack failed to start"),
            Err(e) => report.fail(format!("Monitoring stack: {}", e)),
        }
    }

    let (detached, scale) = match mode {
        RunMode::Normal | RunMode::Light => (true, SCALED_SERVICES),
        RunMode::Debug => (false, &[] as &[(&str, u32)]),
    };
    match compose.up(&UpOptions {
        file: None,
        detached,
        scale,
    }) {
        Ok(true) => {}
        Ok(false) => report.fail("Scanner stack failed to start"),
        Err(e) => report.fail(format!("Scanner stack: {}", e)),
    }

    report
}

pub(super) fn stop(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Stop);
    let compose = Compose::new(o.runner());

    match compose.stop(None) {
        Ok(true) => {}
        Ok(false) => report.fail("Scanner stack stop failed"),
        Err(e) => report.fail(format!("Scanner stack: {}", e)),
    }

    let monitoring_file = o.root().join(paths::MONITORING_COMPOSE_FILE);
    if monitoring_file.is_file() {
        match compose.stop(Some(&monitoring_file)) {
            Ok(true) => {}
            Ok(false) => report.fail("Monitoring stack stop failed"),
            Err(e) => report.fail(format!("Monitoring stack: {}", e)),
        }
    }

    report
}

pub(super) fn down(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Down);
    let compose = Compose::new(o.runner());

    match compose.down(None) {
        Ok(true) => {}
        Ok(false) => report.fail("Scanner stack down failed"),
        Err(e) => report.fail(format!("Scanner stack: {}", e)),
    }

    let monitoring_file = o.root().join(paths::MONITORING_COMPOSE_FILE);
    if monitoring_file.is_file() {
        match compose.down(Some(&monitoring_file)) {
            Ok(true) => {}
            Ok(false) => report.fail("Monitoring stack down failed"),
            Err(e) => report.fail(format!("Monitoring stack: {}", e)),
        }
    }

    report
}

pub(super) fn reset(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Reset);
    match Scaffold::new(o.root()).reset() {
        Ok(removed) => report.note(format!("{} path(s) removed", removed.len())),
        Err(e) => report.fail(format!("Reset failed: {}", e)),
    }
    report
}
