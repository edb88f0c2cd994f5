//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `repoman-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandRunner`: External tool invocation
//!   - `Filesystem`: File operations
//!   - `LicenseStore`: License template retrieval
//!   - `Clock`: Current year for license text

pub mod output;

pub use output::{Clock, CommandRunner, Filesystem, LicenseStore};

#[cfg(test)]
pub use output::{MockClock, MockCommandRunner, MockFilesystem, MockLicenseStore};
