//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "stage these files" or "add a license".

pub mod license_service;
pub mod repo_manager;
pub mod repository_service;

pub use license_service::LicenseService;
pub use repo_manager::RepoManager;
pub use repository_service::{DEFAULT_BRANCH, DEFAULT_REMOTE, DEFAULT_TOOL, RepositoryService};
