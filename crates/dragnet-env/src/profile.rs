//! Profile resolution.
//!
//! A profile pre-resolves to a concrete configuration source (and, for the
//! demo profile, a fixed-asset override) before the ordinary Prepare phase
//! runs. This replaces special-casing inside the phase logic: Prepare never
//! knows which profile it is serving.

use dragnet_core::paths;
use std::path::{Path, PathBuf};

/// Name of the profile that ships with unhardened localhost settings.
pub const DEMO_PROFILE: &str = "demo";

/// A profile resolved to concrete paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// Profile name, `custom` for an explicit `--conf-file`
    pub name: String,
    /// The single configuration source for this invocation
    pub config_source: PathBuf,
    /// Identity-provider export overriding the default scaffold file
    pub realm_export: Option<PathBuf>,
}

/// Resolve a profile name (or explicit config file) against a managed root.
///
/// An explicit `conf_file` wins over the named profile; relative paths are
/// taken relative to the root. Named profiles resolve to
/// `profiles/<name>.yaml`; the demo profile additionally carries its
/// insecure realm export.
pub fn resolve(root: &Path, name: &str, conf_file: Option<&Path>) -> ResolvedProfile {
    if let Some(conf) = conf_file {
        let config_source = if conf.is_absolute() {
            conf.to_path_buf()
        } else {
            root.join(conf)
        };
        return ResolvedProfile {
            name: "custom".to_string(),
            config_source,
            realm_export: None,
        };
    }

    let config_source = root
        .join(paths::PROFILES_DIR)
        .join(format!("{}.yaml", name));

    let realm_export = if name == DEMO_PROFILE {
        tracing::warn!("demo profile selected: settings are not hardened, do not expose publicly");
        Some(
            root.join(paths::PROFILES_DIR)
                .join("demo-realm-export.json"),
        )
    } else {
        None
    };

    ResolvedProfile {
        name: name.to_string(),
        config_source,
        realm_export,
    }
}
