//! Networking modules for the analyzer backend REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues REST calls behind the `LogBackend` trait, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod types;
