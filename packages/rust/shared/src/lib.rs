//! Shared types, error model, and configuration for graphscout.
//!
//! This crate is the foundation depended on by all other graphscout crates.
//! It provides:
//! - [`GraphScoutError`] — the unified error type
//! - Domain types ([`Attributes`], [`Collection`], [`RenderFormat`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GraphConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from, resolve_client_secret,
};
pub use error::{GraphScoutError, Result};
pub use types::{Attributes, Collection, RenderFormat, merge_additional, put};
