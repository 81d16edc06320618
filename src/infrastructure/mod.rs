//! Infrastructure layer for storage and external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`audit`] - Fire-and-forget remote audit logging
//! - [`registry`] - In-memory link registry

pub mod audit;
pub mod registry;
