//! RepoManager - application facade.
//!
//! Composes [`RepositoryService`] and [`LicenseService`] into the named use
//! cases. Holds no state beyond the two services.

use tracing::{info, instrument};

use crate::{
    application::services::{LicenseService, RepositoryService},
    domain::{GeneratedLicense, LICENSE_FILE_NAME},
    error::RepoResult,
};

/// Main application facade.
pub struct RepoManager {
    repository: RepositoryService,
    licenses: LicenseService,
}

impl RepoManager {
    /// Both services must operate on the same repository handle.
    pub fn new(repository: RepositoryService, licenses: LicenseService) -> Self {
        Self {
            repository,
            licenses,
        }
    }

    pub fn repository(&self) -> &RepositoryService {
        &self.repository
    }

    pub fn licenses(&self) -> &LicenseService {
        &self.licenses
    }

    /// Create a new repository.
    pub fn create_repository(&self) -> RepoResult<()> {
        self.repository.init_repository()
    }

    /// Generate license text, write it to `LICENSE`, and stage it.
    ///
    /// The steps run in order and stop at the first failure: a generation
    /// error skips the write, a write error skips staging.
    #[instrument(skip(self))]
    pub fn generate_and_add_license(
        &self,
        id: &str,
        author: Option<&str>,
    ) -> RepoResult<GeneratedLicense> {
        let license = self.licenses.generate(id, author)?;
        let path = self.licenses.persist(license.text())?;
        self.repository.add_files(&[LICENSE_FILE_NAME])?;

        info!("Generated and added {} license", license.license_id());
        Ok(license.written_to(path))
    }
}
