//! Fixed on-disk layout managed by Dragnet.
//!
//! All paths are relative to the managed root (normally the directory the
//! operator runs the tool from). Keeping them in one place makes the layout
//! the documented contract between phases.

use std::path::{Path, PathBuf};

/// Suffix marking a scaffold file as a template.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Directory holding per-service environment templates and their
/// materialized counterparts.
pub const ENVIRONMENTS_DIR: &str = "data/environments";

/// Consolidated environment file at the root of the managed tree.
pub const CONSOLIDATED_ENV: &str = ".env";

/// Directory wordlist assets are fetched into.
pub const WORDLISTS_DIR: &str = "data/wordlists";

/// Directory the monitoring add-on stack is cloned into.
pub const MONITORING_DIR: &str = "dockprom";

/// Compose file of the monitoring add-on stack.
pub const MONITORING_COMPOSE_FILE: &str = "dockprom/docker-compose.yml";

/// Backup directory created during stack initialization.
pub const BACKUP_DIR: &str = "backup";

/// Directory phase logs are appended to.
pub const LOGS_DIR: &str = "logs";

/// Directory the generated SSH key pair lives in.
pub const SSH_DIR: &str = "target/ssh";

/// Base name of the generated SSH key pair.
pub const SSH_KEY_NAME: &str = "dragnet";

/// Remote user the installer connects as.
pub const REMOTE_USER: &str = "dragnet";

/// Generated dynamic inventory file.
pub const INVENTORY_FILE: &str = "target/inventory/dragnet_inventory.azure_rm.yaml";

/// Downloaded Python requirements of the provider collection.
pub const REQUIREMENTS_FILE: &str = "target/requirements-azure.txt";

/// Cloud variables consumed by the playbooks and the inventory generator.
pub const CLOUD_VARS_FILE: &str = "playbooks/vars/cloud.yaml";

/// Default identity-provider realm export shipped with the scaffold.
pub const DEFAULT_REALM_EXPORT: &str = "defaults/realm-export.json";

/// Live location of the identity-provider realm export.
pub const REALM_EXPORT: &str = "conf/keycloak/realm-export.json";

/// Default reverse-proxy configuration shipped with the scaffold.
pub const DEFAULT_PROXY_CONF: &str = "defaults/reverse-proxy.conf";

/// Live location of the reverse-proxy configuration.
pub const PROXY_CONF: &str = "conf/proxy/reverse-proxy.conf";

/// Directory named profiles resolve against.
pub const PROFILES_DIR: &str = "profiles";

/// Log file for a named lifecycle phase.
pub fn phase_log(root: impl AsRef<Path>, phase: &str) -> PathBuf {
    root.as_ref().join(LOGS_DIR).join(format!("{}.log", phase))
}
