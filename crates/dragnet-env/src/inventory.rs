//! Dynamic inventory generation for the cloud target.

use dragnet_core::fs as dfs;
use dragnet_types::{DragnetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CloudVars {
    resource_group: String,
}

#[derive(Debug, Serialize)]
struct KeyedGroup {
    key: String,
}

#[derive(Debug, Serialize)]
struct AzureRmInventory {
    plugin: String,
    include_vm_resource_groups: Vec<String>,
    keyed_groups: Vec<KeyedGroup>,
    auth_source: String,
}

/// Derive the dynamic inventory file from the cloud variables file.
///
/// Reads the resource-group name from `vars_file` and writes an `azure_rm`
/// plugin inventory to `dest`, authenticating through the CLI's
/// pre-established local session.
pub fn write_inventory(vars_file: &Path, dest: &Path) -> Result<()> {
    let content = std::fs::read_to_string(vars_file).map_err(|e| {
        DragnetError::Environment(format!(
            "Cloud vars file {} not readable: {}",
            vars_file.display(),
            e
        ))
    })?;
    let vars: CloudVars = serde_yaml::from_str(&content).map_err(|e| {
        DragnetError::Environment(format!(
            "Cloud vars file {} not parseable: {}",
            vars_file.display(),
            e
        ))
    })?;

    let inventory = AzureRmInventory {
        plugin: "azure_rm".to_string(),
        include_vm_resource_groups: vec![vars.resource_group],
        keyed_groups: vec![KeyedGroup {
            key: "tags".to_string(),
        }],
        auth_source: "cli".to_string(),
    };

    let yaml = serde_yaml::to_string(&inventory)?;
    dfs::spit(dest, &yaml)?;
    tracing::info!(file = %dest.display(), "inventory file created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inventory_derived_from_cloud_vars() {
        let dir = TempDir::new().unwrap();
        let vars = dir.path().join("cloud.yaml");
        std::fs::write(&vars, "resource_group: dragnet-prod\nlocation: westeurope\n").unwrap();

        let dest = dir.path().join("target/inventory/inventory.azure_rm.yaml");
        write_inventory(&vars, &dest).unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.contains("plugin: azure_rm"));
        assert!(written.contains("dragnet-prod"));
        assert!(written.contains("auth_source: cli"));
    }

    #[test]
    fn test_missing_vars_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = write_inventory(
            &dir.path().join("absent.yaml"),
            &dir.path().join("inventory.yaml"),
        )
        .unwrap_err();
        assert!(matches!(err, DragnetError::Environment(_)));
    }
}
