//! Shared types, error model, and configuration for buildnotify.
//!
//! This crate is the foundation depended on by all other buildnotify crates.
//! It provides:
//! - [`NotifyError`] — the unified error type
//! - Domain types ([`CiFlavor`], [`EnvSnapshot`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_CONFIG_FILE, LinksConfig, WebexConfig, load_config, load_config_from,
};
pub use error::{NotifyError, Result};
pub use types::{CiFlavor, EnvSnapshot};
