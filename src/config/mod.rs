//! Configuration loading and management for the attendance engine.
//!
//! This module provides functionality to load named policy profiles
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! let policy = config.profile("strict_daily").unwrap();
//! println!("Mode: {:?}", policy.mode);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::PoliciesConfig;
