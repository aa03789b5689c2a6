//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and tables while reading shared
//! session state from the Leptos context providers.

pub mod detail_table;
pub mod error_banner;
pub mod filters_panel;
pub mod route_guard;
pub mod stat_card;
pub mod summary_table;
pub mod top_nav;
