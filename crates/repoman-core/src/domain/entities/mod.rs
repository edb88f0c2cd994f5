//! Domain entities.

pub mod invocation;
pub mod license;
pub mod repository;
