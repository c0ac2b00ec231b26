//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod assessment;
pub mod config;
pub mod download;
pub mod timefmt;
pub mod ui_persistence;
pub mod upload_filter;
