//! Networking modules for the reporting backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the auth endpoints and shared HTTP plumbing,
//! `reports`/`feedback`/`sellers` wrap the data services,
//! `session_client` drives the session machine, and `types` defines the
//! wire schema with its defensive identity decode.

pub mod api;
pub mod error;
pub mod feedback;
pub mod reports;
pub mod sellers;
pub mod session_client;
pub mod types;
