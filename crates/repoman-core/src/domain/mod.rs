//! Core domain layer for repoman.
//!
//! Pure data and rules: no process spawning, no filesystem access. Those
//! concerns reach the domain only through the ports in
//! [`crate::application::ports`].
//!
//! - **Repository**: [`RepositoryHandle`], [`BranchList`]
//! - **Invocation**: [`ToolInvocation`], [`OperationResult`]
//! - **License**: [`LicenseTemplate`], [`GeneratedLicense`], placeholder substitution

pub mod entities;
pub mod placeholder;

pub use entities::{
    invocation::{OperationResult, ToolInvocation},
    license::{GeneratedLicense, LICENSE_FILE_NAME, LicenseTemplate},
    repository::{BranchList, REPOSITORY_MARKER, RepositoryHandle},
};

pub use placeholder::{MalformedPlaceholder, Placeholder, SubstitutionValues, substitute};
