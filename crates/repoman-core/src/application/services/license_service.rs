//! License Service - generate and persist license text.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::{
    application::ports::{Clock, Filesystem, LicenseStore},
    domain::{
        GeneratedLicense, LICENSE_FILE_NAME, LicenseTemplate, RepositoryHandle,
        SubstitutionValues, substitute,
    },
    error::{RepoError, RepoResult},
};

/// Turns a license identifier and optional author into persisted text.
pub struct LicenseService {
    handle: RepositoryHandle,
    store: Box<dyn LicenseStore>,
    filesystem: Box<dyn Filesystem>,
    clock: Box<dyn Clock>,
}

impl LicenseService {
    /// Create a new license service writing into `handle`'s root.
    pub fn new(
        handle: RepositoryHandle,
        store: Box<dyn LicenseStore>,
        filesystem: Box<dyn Filesystem>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            handle,
            store,
            filesystem,
            clock,
        }
    }

    /// Known license identifiers, in store order.
    pub fn list_available(&self) -> Vec<String> {
        self.store.ids()
    }

    /// Full templates, in store order.
    pub fn templates(&self) -> Vec<LicenseTemplate> {
        self.store.list()
    }

    /// Produce license text for `id`.
    ///
    /// Whitespace-only authors count as absent; any other author is
    /// substituted exactly as given.
    #[instrument(skip(self))]
    pub fn generate(&self, id: &str, author: Option<&str>) -> RepoResult<GeneratedLicense> {
        let template = self.store.get(id).ok_or_else(|| RepoError::UnknownLicense {
            id: id.to_string(),
            available: self.store.ids(),
        })?;

        let author = author.filter(|a| !a.trim().is_empty());
        if template.requires_name && author.is_none() {
            return Err(RepoError::MissingAuthor {
                license: template.id,
            });
        }

        let values = SubstitutionValues::new(self.clock.current_year(), author.unwrap_or_default());
        let text = substitute(&template.body, &values).map_err(|e| {
            RepoError::TemplateMalformed {
                license: template.id.clone(),
                placeholder: e.token,
            }
        })?;

        info!("Generated {} license", template.id);
        Ok(GeneratedLicense::new(template.id, text))
    }

    /// Write `text` to `LICENSE` at the repository root, replacing any
    /// existing file.
    #[instrument(skip_all)]
    pub fn persist(&self, text: &str) -> RepoResult<PathBuf> {
        let path = self.license_path();
        self.filesystem
            .write_file(&path, text)
            .map_err(|e| RepoError::WriteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved LICENSE file to {}", path.display());
        Ok(path)
    }

    /// Where [`Self::persist`] writes.
    pub fn license_path(&self) -> PathBuf {
        self.handle.resolve(LICENSE_FILE_NAME)
    }
}
