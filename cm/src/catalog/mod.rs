//! Use-case catalog
//!
//! Use cases are loaded from:
//! 1. Builtin (embedded in binary)
//! 2. User global (~/.config/cometmastery/catalog/*.yml)
//! 3. Project-specific (.cometmastery/catalog/*.yml)
//!
//! Later definitions replace earlier ones with the same id, keeping the
//! original position; new ids are appended. A catalog file holds either a
//! list of use cases or a single one.
//!
//! Once loaded the catalog is never modified.

mod use_case;
mod validate;

use std::fs;
use std::path::Path;

use eyre::{Context, Result, eyre};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;

pub use use_case::{FieldDescriptor, FieldKind, UseCase};
pub use validate::{CatalogIssue, validate_use_case};

/// Builtin use cases (embedded in binary)
const BUILTIN_CATALOG: &str = include_str!("builtin.yml");

/// Ordered, read-only table of use cases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    use_cases: Vec<UseCase>,
}

impl Catalog {
    pub fn new(use_cases: Vec<UseCase>) -> Self {
        Self { use_cases }
    }

    /// The use cases shipped with the binary
    pub fn builtin() -> Result<Self> {
        debug!("builtin: called");
        let use_cases = parse_catalog(BUILTIN_CATALOG).context("Failed to parse builtin catalog")?;
        debug!(count = use_cases.len(), "builtin: complete");
        Ok(Self { use_cases })
    }

    /// Load from all configured sources
    ///
    /// Unreadable directories and unreadable or unparsable files are skipped
    /// with a warning. Authoring issues are left to [`Catalog::validate`].
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        debug!(?config, "load: called");
        let mut catalog = if config.use_builtin() {
            Self::builtin()?
        } else {
            debug!("load: builtin catalog disabled");
            Self::default()
        };

        for path in config.expanded_paths() {
            if path.is_dir() {
                if let Err(e) = catalog.load_directory(&path) {
                    warn!(?path, error = %e, "Failed to load catalog directory");
                }
            } else if path.is_file() {
                if let Err(e) = catalog.load_file(&path) {
                    warn!(?path, error = %e, "Failed to load catalog file");
                }
            } else {
                debug!(?path, "load: path does not exist, skipping");
            }
        }

        info!(count = catalog.len(), "Loaded use case catalog");
        Ok(catalog)
    }

    /// Load every .yml/.yaml file in a directory, in file-name order
    fn load_directory(&mut self, dir: &Path) -> Result<()> {
        debug!(?dir, "load_directory: called");
        let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|e| e == "yml" || e == "yaml").unwrap_or(false))
            .collect();
        files.sort();

        for path in files {
            if let Err(e) = self.load_file(&path) {
                warn!(?path, error = %e, "Failed to load catalog file");
            }
        }

        debug!(?dir, "load_directory: complete");
        Ok(())
    }

    /// Merge the use cases defined in one YAML file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        debug!(?path, "load_file: called");
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?;
        let use_cases = parse_catalog(&content).with_context(|| format!("Failed to parse: {}", path.display()))?;
        debug!(?path, count = use_cases.len(), "load_file: parsed");
        self.merge(use_cases);
        Ok(())
    }

    /// Replace same-id entries in place, append the rest
    pub fn merge(&mut self, incoming: Vec<UseCase>) {
        for uc in incoming {
            match self.use_cases.iter_mut().find(|existing| existing.id == uc.id) {
                Some(existing) => {
                    debug!(id = %uc.id, "merge: overriding use case");
                    *existing = uc;
                }
                None => {
                    debug!(id = %uc.id, "merge: adding use case");
                    self.use_cases.push(uc);
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&UseCase> {
        self.use_cases.iter().find(|uc| uc.id == id)
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UseCase> {
        self.use_cases.iter()
    }

    pub fn len(&self) -> usize {
        self.use_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.use_cases.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.use_cases.iter().map(|uc| uc.id.as_str()).collect()
    }

    /// Authoring issues across the whole catalog
    pub fn validate(&self) -> Vec<CatalogIssue> {
        validate::validate(&self.use_cases)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a UseCase;
    type IntoIter = std::slice::Iter<'a, UseCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.use_cases.iter()
    }
}

/// Parse a list of use cases, or a single one
fn parse_catalog(content: &str) -> Result<Vec<UseCase>> {
    match serde_yaml::from_str::<Value>(content)? {
        value @ Value::Sequence(_) => Ok(serde_yaml::from_value(value)?),
        value @ Value::Mapping(_) => Ok(vec![serde_yaml::from_value(value)?]),
        _ => Err(eyre!("Expected a use case or a list of use cases")),
    }
}
