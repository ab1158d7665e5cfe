//! Configuration types for the bid award engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{BidType, OptionSetting};

/// Metadata about the engine deployment, from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the deployment.
    pub name: String,
    /// Version of the configuration set.
    pub version: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Default log filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// One configured bid type and its options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidTypeConfig {
    /// Description, e.g. "Summer Deployment".
    pub description: String,
    /// Options that apply to bids of this type.
    #[serde(default)]
    pub options: Vec<OptionSetting>,
}

/// Bid types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BidTypesConfig {
    /// Map of bid type id to its configuration.
    pub bid_types: BTreeMap<String, BidTypeConfig>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    bid_types: BTreeMap<String, BidTypeConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, bid_types: BTreeMap<String, BidTypeConfig>) -> Self {
        Self {
            metadata,
            bid_types,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all configured bid types keyed by id.
    pub fn bid_types(&self) -> &BTreeMap<String, BidTypeConfig> {
        &self.bid_types
    }

    /// Returns the bid type records, ordered by id.
    pub fn bid_type_records(&self) -> Vec<BidType> {
        self.bid_types
            .iter()
            .map(|(id, config)| BidType {
                id: id.clone(),
                description: config.description.clone(),
            })
            .collect()
    }
}
