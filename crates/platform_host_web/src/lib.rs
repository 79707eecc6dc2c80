//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer: the HTTP execution-service client,
//! the `localStorage` preference store, and the factory that assembles them into a
//! [`platform_host::HostServices`] bundle.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-strategy selection and host-bundle assembly for runtime wiring.
pub mod adapters;
pub mod execution;
pub mod prefs;

pub use adapters::{build_host_services, host_strategy_for};
pub use execution::HttpExecutionService;
pub use prefs::WebPrefsStore;
