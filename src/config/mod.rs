//! Configuration module for Stratalis
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file is
//! the same as loading an empty one.
//!
//! # Example
//!
//! ```no_run
//! use stratalis::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("stratalis.toml")).unwrap();
//! println!("Connection ceiling: {}", config.http.max_connections);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT_SECS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
