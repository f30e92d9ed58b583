//! # Pokedex Core
//!
//! The "Engine" of the Pokedex system - turns the paginated, cross-referenced
//! catalog REST resources into a stable, UI-ready domain model.
//!
//! ## Architecture
//!
//! - `catalog/` - HTTP access, error taxonomy, wire payloads
//! - `domain/` - EntitySummary, EntityDetail, EvolutionNode
//! - `resolve/` - list, detail, evolution, category and search resolvers
//! - `config` - base endpoint and fan-out bounds
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pokedex_core::config::CatalogConfig;
//! use pokedex_core::domain::EntityKey;
//! use pokedex_core::resolve::Resolver;
//!
//! let resolver = Resolver::new(&CatalogConfig::from_env())?;
//! let page = resolver.fetch_page(0, 20).await?;
//! let detail = resolver.fetch_detail(&EntityKey::from("eevee")).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod resolve;

pub use catalog::{CatalogError, CatalogResult};
pub use config::CatalogConfig;
pub use resolve::Resolver;
