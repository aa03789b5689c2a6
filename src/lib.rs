//! # salesboard
//!
//! Leptos + WASM front end for the sales-operations reporting dashboard.
//! Authentication rides on an HTTP-only session cookie owned by the
//! backend; all aggregation happens server-side and this crate renders it:
//! filterable report tables, supervisor feedback, a seller roster, and CSV
//! exports.
//!
//! The one stateful core is the session machine in [`state::session`],
//! driven by [`net::session_client`]; everything else is thin plumbing
//! over the backend's REST endpoints.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
