//! Lifecycle phase and run-mode enumerations.

use crate::errors::{DragnetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named unit of the provisioning lifecycle.
///
/// Phases are evaluated independently per invocation, in a fixed priority
/// order (the declaration order below), and failures accumulate across the
/// invocation rather than short-circuiting later requested phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// Verify required external tooling is installed and authenticated
    Check,
    /// Materialize the environment, provision secrets, substitute tokens
    Prepare,
    /// Provision cloud resources
    Provision,
    /// Install services onto provisioned hosts
    Install,
    /// Bring the container stack up
    Run,
    /// Stop the container stack
    Stop,
    /// Stop and remove the container stack
    Down,
    /// Tear down cloud resources
    Destroy,
    /// Delete materialized environment state
    Reset,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Check => "check",
            LifecyclePhase::Prepare => "prepare",
            LifecyclePhase::Provision => "provision",
            LifecyclePhase::Install => "install",
            LifecyclePhase::Run => "run",
            LifecyclePhase::Stop => "stop",
            LifecyclePhase::Down => "down",
            LifecyclePhase::Destroy => "destroy",
            LifecyclePhase::Reset => "reset",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LifecyclePhase {
    type Err = DragnetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "check" => Ok(LifecyclePhase::Check),
            "prepare" | "init" => Ok(LifecyclePhase::Prepare),
            "provision" => Ok(LifecyclePhase::Provision),
            "install" => Ok(LifecyclePhase::Install),
            "run" => Ok(LifecyclePhase::Run),
            "stop" => Ok(LifecyclePhase::Stop),
            "down" => Ok(LifecyclePhase::Down),
            "destroy" => Ok(LifecyclePhase::Destroy),
            "reset" => Ok(LifecyclePhase::Reset),
            _ => Err(DragnetError::Validation(format!(
                "Unknown lifecycle phase: {}",
                s
            ))),
        }
    }
}

/// How the container stack is brought up by the Run phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Monitoring stack plus scaled scanner stack, detached
    Normal,
    /// Scanner stack only, detached; skips the monitoring stack
    Light,
    /// Scanner stack attached to the console, no detach
    Debug,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Normal => "normal",
            RunMode::Light => "light",
            RunMode::Debug => "debug",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RunMode {
    type Err = DragnetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(RunMode::Normal),
            "light" => Ok(RunMode::Light),
            "debug" => Ok(RunMode::Debug),
            _ => Err(DragnetError::Validation(format!(
                "Unknown run mode '{}': expected normal, light, or debug",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_roundtrip() {
        for name in [
            "check",
            "prepare",
            "provision",
            "install",
            "run",
            "stop",
            "down",
            "destroy",
            "reset",
        ] {
            let phase: LifecyclePhase = name.parse().unwrap();
            assert_eq!(phase.to_string(), name);
        }
    }

    #[test]
    fn test_init_is_prepare_alias() {
        let phase: LifecyclePhase = "init".parse().unwrap();
        assert_eq!(phase, LifecyclePhase::Prepare);
    }

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!("normal".parse::<RunMode>().unwrap(), RunMode::Normal);
        assert_eq!("LIGHT".parse::<RunMode>().unwrap(), RunMode::Light);
        assert!("attached".parse::<RunMode>().is_err());
    }
}
