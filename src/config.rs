// src/config.rs

//! Defines the encoding configuration for the `textgrid` binary.
//!
//! This module provides a struct that can be deserialized from a JSON
//! configuration file to customize the grid shape used when encoding
//! whole documents. Default values match the dimensions the downstream
//! character-level model consumes.

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid shape used when encoding documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Apply default values for any field missing from the file.
pub struct GridConfig {
    /// Row length in cells.
    pub width: usize,
    /// Upper bound on rows per document.
    pub max_rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 128,
            max_rows: 64,
        }
    }
}

impl GridConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<GridConfig> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads a configuration from `path`, falling back to the defaults
    /// (with a logged warning) when the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> GridConfig {
        match GridConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default grid configuration: {:#}", e);
                GridConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_model_shape() {
        let config = GridConfig::default();
        assert_eq!(config.width, 128);
        assert_eq!(config.max_rows, 64);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{ "width": 40 }"#).unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.max_rows, 64);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GridConfig {
            width: 80,
            max_rows: 25,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
