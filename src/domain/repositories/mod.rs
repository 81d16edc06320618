//! Registry trait definitions for the domain layer.
//!
//! The registry is the single owner of shortcode records. Its contract is
//! defined here; the in-memory implementation lives in
//! `crate::infrastructure::registry`.
//!
//! # Testing
//!
//! A `mockall` mock is generated under `cfg(test)` for service unit tests.

pub mod link_registry;

pub use link_registry::{ClickOutcome, LinkRegistry};

#[cfg(test)]
pub use link_registry::MockLinkRegistry;
