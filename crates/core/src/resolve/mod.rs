//! # Resolvers
//!
//! Composition of catalog fetches into domain values.
//!
//! ## Layering
//!
//! ```text
//! list / category / search
//!            ↓
//!         detail
//!            ↓
//!        evolution
//!            ↓
//!      CatalogClient
//! ```
//!
//! ## Partial-failure policy
//!
//! | Operation | On a failed sub-fetch |
//! |---|---|
//! | `fetch_page` | whole call fails |
//! | `fetch_detail` | species/primary fatal, evolution chain degrades to `[]` |
//! | `resolve_chain` | node omitted, descendants still visited |
//! | `fetch_by_category` | member omitted |
//! | `fetch_by_key` | `NotFound` becomes `None` |

pub mod category;
pub mod detail;
pub mod evolution;
pub mod fanout;
pub mod list;
pub mod search;

use crate::catalog::{CatalogClient, CatalogResult};
use crate::config::CatalogConfig;

pub use evolution::preorder_species;
pub use fanout::FanOut;
pub use list::DEFAULT_PAGE_SIZE;

/// Entry point for all catalog reads
///
/// Stateless apart from its configuration: every call performs the full
/// fetch sequence against the remote catalog.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: CatalogClient,
    fan_out: FanOut,
    category_cap: usize,
}

impl Resolver {
    /// Resolver over HTTP for `config`
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = CatalogClient::new(config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: CatalogClient, config: &CatalogConfig) -> Self {
        Self {
            client,
            fan_out: FanOut::new(config.effective_max_in_flight()),
            category_cap: config.category_cap,
        }
    }
}
