//! JSON license definition loader.
//!
//! Reads a definition file mapping license identifiers to their text and
//! converts it into an [`InMemoryLicenseStore`].
//!
//! # `licenses.json` format
//!
//! ```json
//! {
//!   "MIT": {
//!     "name": "MIT License",
//!     "text": "Copyright (c) {year} {name}\n...",
//!     "requires_name": true
//!   },
//!   "Unlicense": { "text": "...", "requires_name": false }
//! }
//! ```
//!
//! Every field is optional: `name` defaults to the identifier, `text` to the
//! empty string and `requires_name` to `true`. Entries keep file order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, instrument, warn};

use repoman_core::{domain::LicenseTemplate, error::RepoResult};

use crate::license_store::InMemoryLicenseStore;

/// Conventional name of the definition file.
pub const DEFAULT_DEFINITIONS_FILE: &str = "licenses.json";

/// Why a definition file could not be used.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid entry '{id}' in {}: {reason}", path.display())]
    InvalidEntry {
        path: PathBuf,
        id: String,
        reason: String,
    },

    #[error("{} defines no licenses", path.display())]
    Empty { path: PathBuf },
}

impl DefinitionError {
    /// True when the file simply is not there.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// One entry of the definition file.
#[derive(Debug, Deserialize)]
struct DefinitionEntry {
    name: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default = "default_requires_name")]
    requires_name: bool,
}

fn default_requires_name() -> bool {
    true
}

/// Loads license templates from a JSON definition file.
#[derive(Debug, Clone)]
pub struct LicenseDefinitionLoader {
    path: PathBuf,
}

impl LicenseDefinitionLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file into templates, in file order.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<LicenseTemplate>, DefinitionError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| DefinitionError::Read {
            path: self.path.clone(),
            source,
        })?;
        self.parse(&raw)
    }

    /// Parse definition JSON that has already been read.
    pub fn parse(&self, raw: &str) -> Result<Vec<LicenseTemplate>, DefinitionError> {
        let entries: Map<String, Value> =
            serde_json::from_str(raw).map_err(|source| DefinitionError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if entries.is_empty() {
            return Err(DefinitionError::Empty {
                path: self.path.clone(),
            });
        }

        entries
            .into_iter()
            .map(|(id, value)| self.to_template(id, value))
            .collect()
    }

    /// Load the file into a store, falling back to the built-in licenses
    /// when it is missing, unreadable, or defines nothing.
    pub fn load_or_builtin(&self) -> RepoResult<InMemoryLicenseStore> {
        match self.load() {
            Ok(templates) => {
                let store = InMemoryLicenseStore::from_templates(templates)?;
                info!(
                    "Licenses loaded successfully from {}",
                    self.path.display()
                );
                Ok(store)
            }
            Err(e) if e.is_missing() => {
                warn!(
                    "{} not found. Using default licenses.",
                    self.path.display()
                );
                InMemoryLicenseStore::with_builtin()
            }
            Err(e) => {
                warn!("{e}. Using default licenses.");
                InMemoryLicenseStore::with_builtin()
            }
        }
    }

    fn to_template(&self, id: String, value: Value) -> Result<LicenseTemplate, DefinitionError> {
        if id.trim().is_empty() {
            return Err(DefinitionError::InvalidEntry {
                path: self.path.clone(),
                id,
                reason: "license id cannot be empty".into(),
            });
        }

        let entry: DefinitionEntry =
            serde_json::from_value(value).map_err(|e| DefinitionError::InvalidEntry {
                path: self.path.clone(),
                id: id.clone(),
                reason: e.to_string(),
            })?;

        let display_name = entry.name.unwrap_or_else(|| id.clone());
        Ok(LicenseTemplate::new(id, entry.text)
            .display_name(display_name)
            .requires_name(entry.requires_name))
    }
}
