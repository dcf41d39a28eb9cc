//! Driven adapters: HTTP registry client and persistence.

pub mod memory;
pub mod registry;

pub use memory::{InMemoryAccounts, InMemoryCounter};
pub use registry::RegistryHttpClient;
