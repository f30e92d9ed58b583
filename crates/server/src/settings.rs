//! # Settings
//!
//! Layered catalog configuration for the binary:
//! defaults -> `POKEDEX_*` env (incl. `.env`) -> JSON file -> CLI flags.

use anyhow::{Context, Result};
use pokedex_core::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional overrides as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_in_flight: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_cap: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PersistedConfig {
    /// Read overrides from `path`; a missing file means no overrides
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config: {:?}", path))
    }

    /// Later values win
    pub fn merge(&mut self, other: PersistedConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.max_in_flight.is_some() {
            self.max_in_flight = other.max_in_flight;
        }
        if other.category_cap.is_some() {
            self.category_cap = other.category_cap;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    pub fn apply(self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(max_in_flight) = self.max_in_flight {
            config.max_in_flight = max_in_flight;
        }
        if let Some(category_cap) = self.category_cap {
            config.category_cap = category_cap;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        config
    }
}

/// Resolve the effective catalog configuration
pub async fn resolve_config(
    config_path: Option<&Path>,
    cli: PersistedConfig,
) -> Result<CatalogConfig> {
    let mut overrides = match config_path {
        Some(path) => PersistedConfig::load(path).await?,
        None => PersistedConfig::default(),
    };
    overrides.merge(cli);
    Ok(overrides.apply(CatalogConfig::from_env()))
}
