//! Infrastructure adapters for repoman.
//!
//! This crate implements the ports defined in `repoman-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_licenses;
pub mod clock;
pub mod filesystem;
pub mod license_loader;
pub mod license_store;
pub mod process;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use license_loader::{DEFAULT_DEFINITIONS_FILE, DefinitionError, LicenseDefinitionLoader};
pub use license_store::InMemoryLicenseStore;
pub use process::ProcessRunner;
