//! Configuration loading and management for the bid award engine.
//!
//! This module loads the deployment metadata and the per-bid-type option
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use pilot_bid_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pilotbid").unwrap();
//! println!("Loaded: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BidTypeConfig, BidTypesConfig, EngineConfig, EngineMetadata, ServerConfig};
