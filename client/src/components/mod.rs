//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the log list, upload surface and record detail while
//! reading and writing shared state from Leptos context providers.

pub mod busy_overlay;
pub mod entry_fields;
pub mod log_detail;
pub mod sidebar;
pub mod toaster;
pub mod upload_area;
