//! Token substitution across the managed file tree.
//!
//! Placeholders are the upper-cased variable names themselves, with no
//! delimiter syntax. This keeps configuration sources human-writable, at
//! the documented cost of a collision risk: ordinary file content that
//! happens to match an upper-cased key name will be replaced too. That
//! behavior is preserved deliberately rather than "fixed".

use crate::variables::VariableSet;
use dragnet_types::DragnetError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Explicit, configurable exclusion rule set.
///
/// A file is excluded when its path relative to the scan root contains any
/// needle as a substring. Excluded files are never opened.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    needles: Vec<String>,
}

impl ExclusionRules {
    /// The reference rule set (the most complete observed one).
    ///
    /// Covers version-control metadata, the cloned monitoring add-on tree,
    /// profile and scaffold-default directories, backup and log
    /// directories, generated state under `target/`, template files, and
    /// OS junk files.
    pub fn reference() -> Self {
        Self {
            needles: [
                ".git",
                "dockprom",
                "profiles",
                "defaults",
                "backup",
                "logs",
                "target",
                ".template",
                ".DS_Store",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    /// A rule set with only the given needles.
    pub fn with<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needles: needles.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a needle, e.g. the literal path of the active config source.
    pub fn push(&mut self, needle: impl Into<String>) {
        self.needles.push(needle.into());
    }

    /// Whether a path (relative to the scan root) is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy();
        self.needles.iter().any(|needle| path.contains(needle))
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::reference()
    }
}

/// Outcome of one substitution scan.
#[derive(Debug, Default)]
pub struct SubstitutionReport {
    /// Files whose content changed and was written back
    pub modified: Vec<PathBuf>,
    /// Per-file read/write failures; the scan continued past each
    pub errors: Vec<(PathBuf, DragnetError)>,
}

impl SubstitutionReport {
    /// Overall success: no errors were recorded.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Replace every variable's placeholder across all files under `root`.
///
/// Files are visited in a deterministic order. For each non-excluded file
/// the full UTF-8 content is read, every variable's upper-cased name is
/// replaced literally and globally in the variable set's iteration order
/// (a single accumulated pass, so one variable's replacement value can
/// itself be rewritten by a later variable), and the result is written back
/// only if it differs. A file containing no placeholders is left
/// byte-identical and not reported as modified, which makes the scan
/// idempotent. Read or write failures are recorded per file and do not
/// abort the scan.
pub fn substitute(
    root: impl AsRef<Path>,
    variables: &VariableSet,
    rules: &ExclusionRules,
) -> SubstitutionReport {
    let root = root.as_ref();
    let mut report = SubstitutionReport::default();

    let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                report.errors.push((path.clone(), DragnetError::file(path, io)));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if rules.is_excluded(relative) {
            continue;
        }

        let original = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                report
                    .errors
                    .push((path.to_path_buf(), DragnetError::file(path, e)));
                continue;
            }
        };

        let mut result = original.clone();
        for (key, value) in variables.iter() {
            result = result.replace(&VariableSet::placeholder(key), value);
        }

        if result != original {
            if let Err(e) = std::fs::write(path, &result) {
                report
                    .errors
                    .push((path.to_path_buf(), DragnetError::file(path, e)));
                continue;
            }
            tracing::info!(file = %relative.display(), "file modified");
            report.modified.push(path.to_path_buf());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> VariableSet {
        VariableSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_basic_replacement() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.conf");
        std::fs::write(&file, "password = DB_PASSWORD\nhost = DB_HOST\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("db_password", "hunter2"), ("db_host", "db.internal")]),
            &ExclusionRules::reference(),
        );

        assert!(report.ok());
        assert_eq!(report.modified, vec![file.clone()]);
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "password = hunter2\nhost = db.internal\n"
        );
    }

    #[test]
    fn test_idempotence() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.conf");
        std::fs::write(&file, "listen = WEB_PORT\n").unwrap();
        let variables = vars(&[("web_port", "8443")]);
        let rules = ExclusionRules::reference();

        let first = substitute(dir.path(), &variables, &rules);
        assert_eq!(first.modified.len(), 1);
        let after_first = std::fs::read_to_string(&file).unwrap();

        let second = substitute(dir.path(), &variables, &rules);
        assert!(second.ok());
        assert!(second.modified.is_empty());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), after_first);
    }

    #[test]
    fn test_file_without_tokens_is_not_reported() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "nothing to see here\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("db_password", "hunter2")]),
            &ExclusionRules::reference(),
        );

        assert!(report.ok());
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_excluded_files_are_never_opened() {
        let dir = TempDir::new().unwrap();
        let git_dir = dir.path().join(".git");
        std::fs::create_dir_all(&git_dir).unwrap();
        // Invalid UTF-8: opening this file for substitution would record a
        // read error, so a clean report proves it was skipped unopened.
        std::fs::write(git_dir.join("index"), [0xffu8, 0xfe, 0x00, 0x01]).unwrap();
        std::fs::write(git_dir.join("config"), "TOKEN\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("token", "value")]),
            &ExclusionRules::reference(),
        );

        assert!(report.ok());
        assert!(report.modified.is_empty());
        assert_eq!(
            std::fs::read_to_string(git_dir.join("config")).unwrap(),
            "TOKEN\n"
        );
    }

    #[test]
    fn test_template_files_are_excluded() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("app.conf.template");
        std::fs::write(&template, "listen = WEB_PORT\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("web_port", "8443")]),
            &ExclusionRules::reference(),
        );

        assert!(report.ok());
        assert!(report.modified.is_empty());
        assert_eq!(
            std::fs::read_to_string(&template).unwrap(),
            "listen = WEB_PORT\n"
        );
    }

    #[test]
    fn test_active_config_source_is_excluded() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("site.yaml");
        std::fs::write(&source, "web_port: WEB_PORT\n").unwrap();

        let mut rules = ExclusionRules::reference();
        rules.push("site.yaml");
        let report = substitute(dir.path(), &vars(&[("web_port", "8443")]), &rules);

        assert!(report.ok());
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_replacement_order_is_the_variable_set_order() {
        // With variables [a -> "B", x -> "A"] applied in that order to the
        // content "X A": replacing A first rewrites the literal "A" to "B",
        // then replacing X yields its value "A". The single deterministic
        // result is "A B"; any reordering would produce "A A" instead.
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ordered.txt");
        std::fs::write(&file, "X A").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("a", "B"), ("x", "A")]),
            &ExclusionRules::reference(),
        );

        assert_eq!(report.modified.len(), 1);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "A B");
    }

    #[test]
    fn test_read_error_is_recorded_and_scan_continues() {
        let dir = TempDir::new().unwrap();
        // Not valid UTF-8, so the read fails and is recorded per-file.
        std::fs::write(dir.path().join("a-binary.bin"), [0xffu8, 0xfe, 0x00]).unwrap();
        let good = dir.path().join("b-good.conf");
        std::fs::write(&good, "port = WEB_PORT\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("web_port", "8443")]),
            &ExclusionRules::reference(),
        );

        assert!(!report.ok());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].0.ends_with("a-binary.bin"));
        assert_eq!(report.modified, vec![good.clone()]);
        assert_eq!(std::fs::read_to_string(&good).unwrap(), "port = 8443\n");
    }

    #[test]
    fn test_custom_rule_set_only_excludes_its_needles() {
        let dir = TempDir::new().unwrap();
        let kept = dir.path().join("third-party/tool.conf");
        std::fs::create_dir_all(kept.parent().unwrap()).unwrap();
        std::fs::write(&kept, "port = WEB_PORT\n").unwrap();
        let touched = dir.path().join("app.conf");
        std::fs::write(&touched, "port = WEB_PORT\n").unwrap();

        let report = substitute(
            dir.path(),
            &vars(&[("web_port", "8443")]),
            &ExclusionRules::with(["third-party"]),
        );

        assert_eq!(report.modified, vec![touched]);
        assert_eq!(
            std::fs::read_to_string(&kept).unwrap(),
            "port = WEB_PORT\n"
        );
    }

    #[test]
    fn test_exclusion_matches_relative_path_only() {
        // A needle must not match components of the scan root itself.
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("backup");
        std::fs::create_dir_all(&root).unwrap();
        let file = root.join("app.conf");
        std::fs::write(&file, "port = WEB_PORT\n").unwrap();

        let report = substitute(
            &root,
            &vars(&[("web_port", "8443")]),
            &ExclusionRules::reference(),
        );

        assert_eq!(report.modified.len(), 1);
    }
}
