//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides each state tree as an `RwSignal` through Leptos context.
//! `logs` is the record store and its reducer, `log_store` the async
//! operations that drive it, `detail` the edit buffer of the detail view,
//! and `toasts`/`ui` transient presentation state.

pub mod detail;
pub mod log_store;
pub mod logs;
pub mod toasts;
pub mod ui;
