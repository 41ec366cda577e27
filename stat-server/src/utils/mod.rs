//! Utility module
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - input validation helpers shared by API and form handlers

pub mod logger;
pub mod validation;
