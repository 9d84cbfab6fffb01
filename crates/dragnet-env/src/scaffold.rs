//! Scaffold materialization and reset.

use dragnet_core::fs as dfs;
use dragnet_core::paths;
use dragnet_types::{DragnetError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Template scans never descend into these trees.
const SKIP_DIRS: &[&str] = &[".git", paths::MONITORING_DIR];

/// The on-disk tree of template and fixed default files, prior to and after
/// materialization.
#[derive(Debug, Clone)]
pub struct Scaffold {
    root: PathBuf,
}

impl Scaffold {
    /// Scaffold rooted at the managed tree.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Managed root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn templates(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !SKIP_DIRS.contains(&name))
                    .unwrap_or(true)
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name.ends_with(paths::TEMPLATE_SUFFIX))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect()
    }

    fn materialized_path(template: &Path) -> PathBuf {
        let name = template.file_name().unwrap_or_default().to_string_lossy();
        let stripped = name
            .strip_suffix(paths::TEMPLATE_SUFFIX)
            .unwrap_or(&name)
            .to_string();
        template.with_file_name(stripped)
    }

    /// Expand every template file into its live counterpart.
    ///
    /// Each `*.template` under the root is copied byte-for-byte to its
    /// de-suffixed path, only if that path does not already exist: an
    /// operator-edited live file is never overwritten short of an explicit
    /// [`Scaffold::reset`]. No substitution happens at this stage. Returns
    /// the files created.
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for template in self.templates() {
            let target = Self::materialized_path(&template);
            if target.exists() {
                continue;
            }
            dfs::copy_file(&template, &target)?;
            tracing::info!(file = %target.display(), "environment file materialized");
            created.push(target);
        }
        Ok(created)
    }

    /// Copy fixed, non-template scaffold files into place.
    ///
    /// Defaults are only copied on first materialization: an existing live
    /// copy is left alone.
    pub fn apply_fixed_defaults(&self) -> Result<()> {
        for (default, live) in [
            (paths::DEFAULT_REALM_EXPORT, paths::REALM_EXPORT),
            (paths::DEFAULT_PROXY_CONF, paths::PROXY_CONF),
        ] {
            let source = self.root.join(default);
            let target = self.root.join(live);
            if !source.is_file() || target.exists() {
                continue;
            }
            dfs::copy_file(&source, &target)?;
            tracing::info!(file = %target.display(), "default scaffold file installed");
        }
        Ok(())
    }

    /// Install a caller-supplied identity-provider export.
    ///
    /// An asset referenced by the active profile overrides whatever realm
    /// export is currently in place.
    pub fn apply_realm_export(&self, source: &Path) -> Result<()> {
        if !source.is_file() {
            return Err(DragnetError::Environment(format!(
                "Realm export {} not found",
                source.display()
            )));
        }
        dfs::copy_file(source, self.root.join(paths::REALM_EXPORT))?;
        tracing::info!(source = %source.display(), "realm export installed");
        Ok(())
    }

    /// Delete materialized environment state.
    ///
    /// Removes every de-suffixed counterpart of a template, the
    /// consolidated environment file, downloaded wordlists (keeping
    /// version-control placeholder files), and the cloned monitoring
    /// add-on tree. Destructive; never invoked implicitly by any other
    /// phase. Returns the paths removed.
    pub fn reset(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for template in self.templates() {
            let target = Self::materialized_path(&template);
            if target.is_file() {
                std::fs::remove_file(&target).map_err(|e| DragnetError::file(&target, e))?;
                tracing::info!(file = %target.display(), "environment file removed");
                removed.push(target);
            }
        }

        let consolidated = self.root.join(paths::CONSOLIDATED_ENV);
        if consolidated.is_file() {
            std::fs::remove_file(&consolidated)
                .map_err(|e| DragnetError::file(&consolidated, e))?;
            removed.push(consolidated);
        }

        let wordlists = self.root.join(paths::WORDLISTS_DIR);
        if wordlists.is_dir() {
            let entries =
                std::fs::read_dir(&wordlists).map_err(|e| DragnetError::file(&wordlists, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| DragnetError::file(&wordlists, e))?;
                let path = entry.path();
                let keep = entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with('.'))
                    .unwrap_or(false);
                if path.is_file() && !keep {
                    std::fs::remove_file(&path).map_err(|e| DragnetError::file(&path, e))?;
                    removed.push(path);
                }
            }
        }

        let monitoring = self.root.join(paths::MONITORING_DIR);
        if monitoring.is_dir() {
            std::fs::remove_dir_all(&monitoring)
                .map_err(|e| DragnetError::file(&monitoring, e))?;
            tracing::info!(dir = %monitoring.display(), "monitoring add-on removed");
            removed.push(monitoring);
        }

        Ok(removed)
    }
}
