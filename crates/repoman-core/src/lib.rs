//! repoman Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for repoman, a
//! git repository and license manager that drives the `git` command-line
//! tool as a subprocess.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           repoman-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (RepoManager → RepositoryService,      │
//! │               LicenseService)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CommandRunner, Filesystem,             │
//! │  LicenseStore, Clock)                   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   repoman-adapters (Infrastructure)     │
//! │ (ProcessRunner, LocalFilesystem, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use repoman_core::prelude::*;
//!
//! # fn run(runner: Box<dyn CommandRunner>, fs: Box<dyn Filesystem>,
//! #        fs2: Box<dyn Filesystem>, store: Box<dyn LicenseStore>,
//! #        clock: Box<dyn Clock>) -> RepoResult<()> {
//! let handle = RepositoryHandle::new("./my-project");
//! let repository = RepositoryService::new(handle.clone(), runner, fs)?;
//! let licenses = LicenseService::new(handle, store, fs2, clock);
//!
//! let manager = RepoManager::new(repository, licenses);
//! manager.create_repository()?;
//! manager.generate_and_add_license("MIT", Some("Acme Corp"))?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        LicenseService, RepoManager, RepositoryService,
        ports::{Clock, CommandRunner, Filesystem, LicenseStore},
    };
    pub use crate::domain::{
        BranchList, GeneratedLicense, LicenseTemplate, OperationResult, RepositoryHandle,
        ToolInvocation,
    };
    pub use crate::error::{ErrorCategory, RepoError, RepoResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
