//! Configuration management for the bookmark manager.
//!
//! This module provides centralized configuration handling for the database
//! location and logging, resolved from defaults, `config.toml` and the
//! command line (including its environment variables).

mod config;

pub use config::*;
