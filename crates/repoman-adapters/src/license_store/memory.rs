//! In-memory license store with built-in licenses.

use std::sync::{Arc, PoisonError, RwLock};

use repoman_core::{
    application::ports::LicenseStore,
    domain::LicenseTemplate,
    error::{RepoError, RepoResult},
};
use tracing::debug;

use crate::builtin_licenses;

/// Thread-safe, insertion-ordered license store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLicenseStore {
    inner: Arc<RwLock<Vec<LicenseTemplate>>>,
}

impl InMemoryLicenseStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in licenses loaded.
    pub fn with_builtin() -> RepoResult<Self> {
        Self::from_templates(builtin_licenses::all())
    }

    /// Build a store from `templates`, keeping their order.
    pub fn from_templates(
        templates: impl IntoIterator<Item = LicenseTemplate>,
    ) -> RepoResult<Self> {
        let store = Self::new();
        for template in templates {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Append a template. Identifiers must be unique.
    pub fn insert(&self, template: LicenseTemplate) -> RepoResult<()> {
        if template.id.trim().is_empty() {
            return Err(RepoError::InvalidArgument {
                operation: "license",
                reason: "license id cannot be empty".into(),
            });
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.iter().any(|t| t.id == template.id) {
            return Err(RepoError::InvalidArgument {
                operation: "license",
                reason: format!("duplicate license id '{}'", template.id),
            });
        }

        debug!(id = %template.id, "Registered license");
        inner.push(template);
        Ok(())
    }

    /// Get the number of licenses.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LicenseStore for InMemoryLicenseStore {
    fn ids(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.iter().map(|t| t.id.clone()).collect()
    }

    fn get(&self, id: &str) -> Option<LicenseTemplate> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.iter().find(|t| t.id == id).cloned()
    }

    fn list(&self) -> Vec<LicenseTemplate> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
