//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::engine::OptionPolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{BidTypeConfig, BidTypesConfig, EngineConfig, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/pilotbid/
/// ├── engine.yaml      # Deployment metadata, server and logging
/// └── bid_types.yaml   # Bid types and their options
/// ```
///
/// # Example
///
/// ```no_run
/// use pilot_bid_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pilotbid").unwrap();
/// let policy = loader.option_policy("summer_deployment").unwrap();
/// println!("Seniority field: {}", policy.seniority_field());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let bid_types = Self::load_yaml::<BidTypesConfig>(&path.join("bid_types.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(metadata, bid_types.bid_types),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets a bid type by its id.
    pub fn get_bid_type(&self, bid_type: &str) -> EngineResult<&BidTypeConfig> {
        self.config
            .bid_types()
            .get(bid_type)
            .ok_or_else(|| EngineError::BidTypeNotFound {
                bid_type: bid_type.to_string(),
            })
    }

    /// Builds the option policy configured for a bid type.
    ///
    /// Fails with `BidTypeNotFound` for an unknown bid type, or
    /// `InvalidOption` if the configured options are inconsistent.
    pub fn option_policy(&self, bid_type: &str) -> EngineResult<OptionPolicy> {
        let config = self.get_bid_type(bid_type)?;
        OptionPolicy::from_settings(config.options.clone())
    }
}
