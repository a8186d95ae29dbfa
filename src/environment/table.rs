use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::{EnvironmentClass, BUILTIN_ENVIRONMENTS};
use crate::error::TableError;
use crate::matrix::Column;

#[derive(Debug, Deserialize)]
struct EnvironmentsFile {
    environments: HashMap<String, String>,
}

/// Environment name → column lookup, seeded with the built-in names and
/// optionally extended from a site file.
#[derive(Debug, Clone)]
pub struct EnvironmentTable {
    entries: HashMap<String, Column>,
}

impl EnvironmentTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let entries = BUILTIN_ENVIRONMENTS
            .iter()
            .map(|(name, column)| (name.to_string(), *column))
            .collect();
        Self { entries }
    }

    pub fn classify(&self, environment: &str) -> EnvironmentClass {
        match self.entries.get(environment) {
            Some(column) => EnvironmentClass::Known(*column),
            None => {
                trace!(environment, "unrecognized environment");
                EnvironmentClass::Unknown
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges entries from a JSON or YAML file of the form
    /// `environments: { <name>: <column> }`. File entries win over
    /// existing ones.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading environment table");

        let content =
            fs::read_to_string(path).map_err(|e| TableError::read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let file: EnvironmentsFile = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| TableError::parse_error(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| TableError::parse_error(path, e.to_string()))?,
            _ => return Err(TableError::unsupported_format(extension)),
        };

        self.merge(file)
    }

    fn merge(&mut self, file: EnvironmentsFile) -> Result<(), TableError> {
        let mut resolved = Vec::with_capacity(file.environments.len());
        for (environment, column) in file.environments {
            let parsed = column
                .parse::<Column>()
                .map_err(|_| TableError::unknown_column(&environment, &column))?;
            resolved.push((environment, parsed));
        }

        let count = resolved.len();
        self.entries.extend(resolved);
        debug!(count, total = self.entries.len(), "merged environment table");
        Ok(())
    }
}

impl Default for EnvironmentTable {
    fn default() -> Self {
        Self::builtin()
    }
}
