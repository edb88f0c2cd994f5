//! License template storage adapters.

mod memory;

pub use memory::InMemoryLicenseStore;
