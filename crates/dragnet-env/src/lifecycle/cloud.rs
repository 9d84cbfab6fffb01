//! Cloud-target phases.

use super::{Orchestrator, PhaseReport};
use crate::inventory;
use dragnet_core::paths;
use dragnet_secrets::{ensure_key_pair, KeyPair, KeyPairOutcome};
use dragnet_services::ansible::{Ansible, PlaybookRun};
use dragnet_services::preflight;
use dragnet_types::LifecyclePhase;

/// Requested phases for one cloud invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudRequest {
    /// Verify prerequisite tooling and authentication
    pub check: bool,
    /// Provision the key pair, toolchain, and inventory
    pub prepare: bool,
    /// Provision cloud resources
    pub provision: bool,
    /// Install services onto provisioned hosts
    pub install: bool,
    /// Tear down cloud resources
    pub destroy: bool,
}

pub(super) fn check(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Check);
    for diagnostic in preflight::check_cloud(o.runner()).diagnostics {
        report.fail(diagnostic);
    }
    report
}

pub(super) fn prepare(o: &Orchestrator<'_>) -> PhaseReport {
    let mut report = PhaseReport::new(LifecyclePhase::Prepare);

    // Each step is attempted even if an earlier one failed; all
    // sub-failures end up in the report.
    let pair = KeyPair::at(o.root().join(paths::SSH_DIR), paths::SSH_KEY_NAME);
    match ensure_key_pair(&pair, o.runner()) {
        Ok(KeyPairOutcome::AlreadyPresent) => report.note("key pair already present"),
        Ok(KeyPairOutcome::Generated) => report.note("key pair generated"),
        Err(e) => report.fail(format!("Key-pair provisioning failed: {}", e)),
    }

    let ansible = Ansible::new(o.runner());
    if let Err(e) = ansible.install_toolchain(o.fetcher(), &o.root().join(paths::REQUIREMENTS_FILE))
    {
        report.fail(format!("Toolchain installation failed: {}", e));
    }

    if let Err(e) = inventory::write_inventory(
        &o.root().join(paths::CLOUD_VARS_FILE),
        &o.root().join(paths::INVENTORY_FILE),
    ) {
        report.fail(format!("Inventory generation failed: {}", e));
    }

    report
}

pub(super) fn provision(o: &Orchestrator<'_>) -> PhaseReport {
    playbook_phase(o, LifecyclePhase::Provision, "playbooks/provision.yaml", false)
}

pub(super) fn install(o: &Orchestrator<'_>) -> PhaseReport {
    playbook_phase(o, LifecyclePhase::Install, "playbooks/install.yaml", true)
}

pub(super) fn destroy(o: &Orchestrator<'_>) -> PhaseReport {
    playbook_phase(o, LifecyclePhase::Destroy, "playbooks/destroy.yaml", false)
}

fn playbook_phase(
    o: &Orchestrator<'_>,
    phase: LifecyclePhase,
    playbook: &str,
    remote: bool,
) -> PhaseReport {
    let mut report = PhaseReport::new(phase);

    let log = match o.phase_log(phase) {
        Ok(log) => log,
        Err(e) => {
            report.fail(format!("Phase log unavailable: {}", e));
            return report;
        }
    };

    let playbook_path = o.root().join(playbook);
    let inventory_path = o.root().join(paths::INVENTORY_FILE);
    let key_path = o.root().join(paths::SSH_DIR).join(paths::SSH_KEY_NAME);

    let run = PlaybookRun {
        playbook: &playbook_path,
        inventory: remote.then_some(inventory_path.as_path()),
        remote_user: remote.then_some(paths::REMOTE_USER),
        private_key: remote.then_some(key_path.as_path()),
        log: &log,
    };

    match Ansible::new(o.runner()).playbook(&run) {
        Ok(true) => report.note(format!("output in {}", log.display())),
        Ok(false) => report.fail(format!("Playbook {} failed, see {}", playbook, log.display())),
        Err(e) => report.fail(format!("Playbook {}: {}", playbook, e)),
    }

    report
}
