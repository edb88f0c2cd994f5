//! Application layer for repoman.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RepositoryService, LicenseService, RepoManager)
//! - **Ports**: Interface definitions (traits) for external dependencies
//!
//! Errors for every layer live in [`crate::error`].

pub mod ports;
pub mod services;

// Re-export main services
pub use services::{LicenseService, RepoManager, RepositoryService};

// Re-export port traits (for adapter implementation)
pub use ports::{Clock, CommandRunner, Filesystem, LicenseStore};
