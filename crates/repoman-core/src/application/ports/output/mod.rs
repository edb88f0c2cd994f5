//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `repoman-adapters` crate provides implementations.

use std::io;
use std::path::Path;

use crate::domain::{LicenseTemplate, OperationResult, ToolInvocation};

/// Port for running the external version-control tool.
///
/// Implemented by:
/// - `repoman_adapters::process::ProcessRunner` (production)
///
/// Returns `Err` only when the process could not be run to completion
/// (spawn failure, timeout). A nonzero exit is an `Ok` result; interpreting
/// it is the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<OperationResult>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `repoman_adapters::filesystem::LocalFilesystem` (production)
/// - `repoman_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Errors are raw `io::Error`s; the services decide which failure kind
/// they map to.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replace the contents of a file, creating it if needed.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Port for license template storage.
///
/// Implemented by:
/// - `repoman_adapters::license_store::InMemoryLicenseStore`
#[cfg_attr(test, mockall::automock)]
pub trait LicenseStore: Send + Sync {
    /// Identifiers in load order.
    fn ids(&self) -> Vec<String>;

    /// Look up a template by identifier.
    fn get(&self, id: &str) -> Option<LicenseTemplate>;

    /// All templates in load order.
    fn list(&self) -> Vec<LicenseTemplate>;
}

/// Port for the current calendar year.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}
