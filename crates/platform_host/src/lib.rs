//! Typed host-domain contracts shared by the console core and the browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the execution-service
//! and preference-store traits, in-memory and no-op adapters for tests and offline builds, and time
//! helpers, while concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod execution;
pub mod host;
pub mod prefs;
pub mod time;

pub use execution::{
    ExecutionError, ExecutionFuture, ExecutionService, MemoryExecutionService,
    NoopExecutionService,
};
pub use host::{HostServices, HostStrategy};
pub use prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, PrefsError, PrefsFuture, PrefsStore,
};
pub use time::{format_clock_utc, unix_time_ms_now};
