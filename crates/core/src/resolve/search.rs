//! # Search Resolver
//!
//! Probes the catalog with user input. "Not found" is a normal outcome here,
//! reported as `None`; every other failure still propagates.

use super::Resolver;
use crate::catalog::CatalogResult;
use crate::domain::{EntityDetail, EntityKey};

impl Resolver {
    /// Detail for free-form input, or `None` when nothing matches
    ///
    /// Input is trimmed and lowercased first. Blank input matches nothing
    /// and performs no request.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_by_key(&self, query: &str) -> CatalogResult<Option<EntityDetail>> {
        let Some(key) = EntityKey::parse(query) else {
            return Ok(None);
        };

        match self.fetch_detail(&key).await {
            Ok(detail) => Ok(Some(detail)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(key = %key, "No match");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
