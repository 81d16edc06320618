//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Behavior that mutates them lives in
//! [`crate::domain::click_recorder`] and behavior that reads time from them in
//! [`crate::domain::expiry`].
//!
//! # Entity Types
//!
//! - [`ShortLinkRecord`] - A shortcode mapped to its long URL plus click analytics
//! - [`ClickEvent`] - One successful redirect
//!
//! `NewShortLink` carries the validated input for creating a record.

pub mod click;
pub mod link;

pub use click::ClickEvent;
pub use link::{NewShortLink, ShortLinkRecord};
