//! # Catalog Configuration
//!
//! The only knobs the engine accepts: where the catalog lives and how wide a
//! fan-out burst may get.

use serde::{Deserialize, Serialize};

/// Public PokeAPI endpoint used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Members resolved per category lookup
pub const DEFAULT_CATEGORY_CAP: usize = 40;

/// Configuration for catalog access
///
/// ## Example
/// ```rust,ignore
/// use pokedex_core::config::CatalogConfig;
///
/// // Public catalog, default bounds
/// let config = CatalogConfig::default();
///
/// // Self-hosted mirror with a narrower burst
/// let config = CatalogConfig::new("http://localhost:8000/api/v2").with_max_in_flight(4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base endpoint that relative catalog paths are joined to
    pub base_url: String,
    /// Maximum detail fetches outstanding at once during a fan-out
    pub max_in_flight: usize,
    /// Members considered per category lookup
    pub category_cap: usize,
    /// Per-request timeout in seconds (`None` leaves the transport default)
    pub timeout_secs: Option<u64>,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_in_flight: 10,
            category_cap: DEFAULT_CATEGORY_CAP,
            timeout_secs: None,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CatalogConfig {
    /// Default bounds against a custom base endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_category_cap(mut self, category_cap: usize) -> Self {
        self.category_cap = category_cap;
        self
    }

    /// Defaults overlaid with `POKEDEX_*` environment variables
    ///
    /// - `POKEDEX_CATALOG_URL` - base endpoint
    /// - `POKEDEX_MAX_IN_FLIGHT` - fan-out width
    /// - `POKEDEX_TIMEOUT_SECS` - request timeout
    ///
    /// Unparsable numeric values are ignored.
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Apply `POKEDEX_*` environment overrides on top of `self`
    pub fn overlay_env(mut self) -> Self {
        if let Ok(url) = std::env::var("POKEDEX_CATALOG_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Some(n) = env_number("POKEDEX_MAX_IN_FLIGHT") {
            self.max_in_flight = n as usize;
        }
        if let Some(secs) = env_number("POKEDEX_TIMEOUT_SECS") {
            self.timeout_secs = Some(secs);
        }
        self
    }

    /// Fan-out width, never below one
    pub fn effective_max_in_flight(&self) -> usize {
        self.max_in_flight.max(1)
    }

    /// Base endpoint without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn env_number(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
