//! Core utilities for the aspect-ratio analysis tools
//!
//! This crate provides functionality shared by every other crate in the workspace:
//!
//! - **Error handling**: Coded errors with context, suggestions and serializable reports
//! - **Configuration**: TOML-based configuration for the object store, output and logging
//!
//! # Example
//!
//! ```rust,no_run
//! use aspect_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("region: {}", config.schema.store.region);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
