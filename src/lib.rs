//! Axum host for the maintenance log analyzer.
//!
//! ARCHITECTURE
//! ============
//! The host owns no records. It renders the Leptos shell, serves the
//! compiled client bundle, and tells the client which analyzer backend to
//! call. All record traffic goes from the browser straight to that backend.

#![recursion_limit = "256"]

pub mod config;
pub mod routes;
