//! Commission rule configuration loading.
//!
//! This module provides the [`ConfigLoader`] type for loading commission
//! bracket tables from YAML files. The same rule set can also be built
//! directly from collaborator rows via [`CommissionRuleSet::from_rows`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::types::{CommissionRuleSet, RawRuleRow};

/// One YAML rule file: a named configuration and its raw rows.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleFile {
    /// The configuration name (e.g., "COMISION JEFES DE TIENDA").
    pub configuration: String,
    /// The raw rule rows.
    pub rules: Vec<RawRuleRow>,
}

/// Loads and provides access to commission rule configuration.
///
/// The `ConfigLoader` reads every `*.yaml` file in a directory, merges
/// their rows, and builds the bracket lookup once.
///
/// # Directory Structure
///
/// ```text
/// config/commissions/
/// └── store-manager.yaml   # configuration name + rule rows
/// ```
///
/// # Example
///
/// ```no_run
/// use commission_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/commissions")?;
/// let rules = loader.rules();
/// # Ok::<(), commission_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    configurations: Vec<String>,
    rules: CommissionRuleSet,
}

impl ConfigLoader {
    /// Loads all rule files from the specified directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory or any file cannot be read, when a file
    /// contains invalid YAML, or when no rule file is found at all.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut configurations = Vec::new();
        let mut rows: Vec<RawRuleRow> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<RuleFile>(&file_path)?;
                configurations.push(file.configuration);
                rows.extend(file.rules);
            }
        }

        if rows.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", path_str),
            });
        }

        Ok(Self {
            configurations,
            rules: CommissionRuleSet::from_rows(&rows),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the built bracket lookup.
    pub fn rules(&self) -> &CommissionRuleSet {
        &self.rules
    }

    /// Returns the names of the loaded configurations.
    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }
}
