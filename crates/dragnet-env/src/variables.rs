//! Configuration variable sets.

use dragnet_types::{DragnetError, Result};
use indexmap::IndexMap;
use std::path::Path;

/// An ordered mapping from variable name to resolved string value.
///
/// Loaded from exactly one YAML configuration source per invocation. Keys
/// are case-folded to lowercase on load and must be unique after folding.
/// Iteration order is the source document order, which makes replacement
/// order during substitution a stable, documented contract.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    entries: IndexMap<String, String>,
}

impl VariableSet {
    /// Load a variable set from a YAML file.
    ///
    /// Any failure to open or parse the source is a
    /// [`DragnetError::ConfigSource`], which is fatal to the Prepare/Init
    /// phase.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DragnetError::ConfigSource(format!(
                "Unable to open config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let doc: IndexMap<String, serde_yaml::Value> =
            serde_yaml::from_str(&content).map_err(|e| {
                DragnetError::ConfigSource(format!(
                    "Unable to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let mut entries = IndexMap::with_capacity(doc.len());
        for (key, value) in doc {
            let folded = key.to_lowercase();
            let value = Self::scalar(&value).ok_or_else(|| {
                DragnetError::ConfigSource(format!(
                    "Variable '{}' in {} is not a scalar value",
                    key,
                    path.display()
                ))
            })?;
            if entries.insert(folded.clone(), value).is_some() {
                return Err(DragnetError::ConfigSource(format!(
                    "Duplicate variable '{}' in {} after case folding",
                    folded,
                    path.display()
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Build a variable set from ordered pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (key, value) in pairs {
            let folded = key.into().to_lowercase();
            if entries.insert(folded.clone(), value.into()).is_some() {
                return Err(DragnetError::ConfigSource(format!(
                    "Duplicate variable '{}' after case folding",
                    folded
                )));
            }
        }
        Ok(Self { entries })
    }

    fn scalar(value: &serde_yaml::Value) -> Option<String> {
        match value {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The in-file placeholder for a variable name.
    ///
    /// The upper-cased name doubles as the placeholder, so a key
    /// `db_password` is embedded in files as the literal `DB_PASSWORD`
    /// without any delimiter syntax.
    pub fn placeholder(key: &str) -> String {
        key.to_uppercase()
    }

    /// Iterate entries in source document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up a value by case-insensitive name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
