//! Shared types, error model, and configuration for PersonScope.
//!
//! This crate is the foundation depended on by all other PersonScope crates.
//! It provides:
//! - [`PersonScopeError`] — the unified error type
//! - Domain types ([`Query`], [`Category`], [`SearchHit`])
//! - Configuration ([`AppConfig`], provider credentials, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LegalConfig, LegalCredentials, SearchConfig, SearchCredentials, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{PersonScopeError, Result};
pub use types::{Category, Query, SearchHit};
