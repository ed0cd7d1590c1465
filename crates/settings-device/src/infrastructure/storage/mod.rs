//! Storage infrastructure: host configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML host configuration (data directory, settings file
//!   paths, log level).
//! - Writing a default configuration on request.
//! - Providing sensible defaults when the file does not exist yet (first run).

pub mod config;
