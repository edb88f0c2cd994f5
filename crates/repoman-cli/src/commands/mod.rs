//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core
//! [`RepoManager`] and reports the outcome through the [`OutputManager`].
//! The helpers below wire the production adapters into the core services.
//!
//! [`OutputManager`]: crate::output::OutputManager

use tracing::debug;

use repoman_adapters::{
    DEFAULT_DEFINITIONS_FILE, InMemoryLicenseStore, LicenseDefinitionLoader, LocalFilesystem,
    ProcessRunner, SystemClock,
};
use repoman_core::{
    application::{LicenseService, RepoManager, RepositoryService, ports::Filesystem},
    domain::RepositoryHandle,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod branch;
pub mod completions;
pub mod config;
pub mod files;
pub mod init;
pub mod license;
pub mod remote;
pub mod status;

/// Build a manager for `--repo` without checking that it is a repository.
pub fn repo_manager(global: &GlobalArgs, config: &AppConfig) -> CliResult<RepoManager> {
    let handle = RepositoryHandle::new(&global.repo);
    debug!(repo = %handle, program = %config.git.program, "Opening repository");

    let runner = ProcessRunner::with_timeout(config.git.timeout());
    let repository = RepositoryService::with_tool(
        handle.clone(),
        &config.git.program,
        Box::new(runner),
        Box::new(LocalFilesystem),
    )?;
    let licenses = license_service(handle, config)?;

    Ok(RepoManager::new(repository, licenses))
}

/// License service writing into `handle`. Needs neither git nor a repository.
pub fn license_service(handle: RepositoryHandle, config: &AppConfig) -> CliResult<LicenseService> {
    Ok(LicenseService::new(
        handle,
        Box::new(license_store(config)?),
        Box::new(LocalFilesystem),
        Box::new(SystemClock),
    ))
}

/// Build a manager for `--repo`, failing unless it already is a repository.
///
/// The marker check runs before git is probed so a wrong `-C` is reported
/// as such even on machines without git.
pub fn open_repository(global: &GlobalArgs, config: &AppConfig) -> CliResult<RepoManager> {
    let handle = RepositoryHandle::new(&global.repo);
    if !LocalFilesystem.exists(&handle.marker_path()) {
        return Err(CliError::NotARepository {
            path: handle.root().to_path_buf(),
        });
    }
    repo_manager(global, config)
}

/// License templates from `license.definitions`, else from
/// `licenses.json` in the working directory, else the built-in set.
///
/// Only a configured file that is missing is worth a warning.
pub fn license_store(config: &AppConfig) -> CliResult<InMemoryLicenseStore> {
    let loader = match &config.license.definitions {
        Some(path) => LicenseDefinitionLoader::new(path),
        None => {
            let loader = LicenseDefinitionLoader::new(DEFAULT_DEFINITIONS_FILE);
            if !LocalFilesystem.exists(loader.path()) {
                debug!("No {DEFAULT_DEFINITIONS_FILE} in working directory, using built-in licenses");
                return Ok(InMemoryLicenseStore::with_builtin()?);
            }
            loader
        }
    };
    Ok(loader.load_or_builtin()?)
}
