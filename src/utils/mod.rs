//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Shortcode generation and validation
//! - [`url_validator`] - Long URL validation
//! - [`request_host`] - Public base URL derivation from HTTP headers

pub mod code_generator;
pub mod request_host;
pub mod url_validator;
