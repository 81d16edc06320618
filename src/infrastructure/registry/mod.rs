//! Registry implementations.
//!
//! - [`InMemoryRegistry`] - process-local store backed by a sharded concurrent map

pub mod memory;

pub use memory::InMemoryRegistry;
