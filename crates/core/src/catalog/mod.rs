//! # Catalog Access
//!
//! The only layer that performs I/O. Everything above it composes
//! [`CatalogClient::get`].
//!
//! ## Modules
//!
//! - `client` - GET + decode, pluggable transport
//! - `error` - the three failure kinds
//! - `wire` - remote payload shapes and their projections

pub mod client;
pub mod error;
pub mod wire;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::{CatalogClient, CatalogTransport, HttpTransport};
pub use error::{CatalogError, CatalogResult, ErrorKind};
