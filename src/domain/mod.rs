//! Domain layer containing business entities and logic.
//!
//! Everything here is independent of HTTP and of the storage backend.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Registry trait definition
//! - [`expiry`] - Expiry policy (pure functions of wall-clock time)
//! - [`click_recorder`] - Click application on a live record
//!
//! # Redirect Flow
//!
//! 1. HTTP handler builds a [`entities::ClickEvent`] from request metadata
//! 2. [`repositories::LinkRegistry::record_click`] locks the record
//! 3. [`expiry::is_expired`] decides whether the record is still live
//! 4. [`click_recorder::apply_click`] mutates it before the lock is released

pub mod click_recorder;
pub mod entities;
pub mod expiry;
pub mod repositories;
