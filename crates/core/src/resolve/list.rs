//! # List Resolver
//!
//! One index page, then a detail fetch per referenced entity.
//!
//! All-or-nothing: page size and ordering are exact for pagination UIs, so a
//! single failed item fails the whole page instead of shrinking it.

use super::detail::fetch_summary;
use super::Resolver;
use crate::catalog::wire::IndexPage;
use crate::catalog::CatalogResult;
use crate::domain::Page;

/// Page size used by the UI when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl Resolver {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_page(&self, offset: u32, limit: u32) -> CatalogResult<Page> {
        let path = format!("pokemon?offset={}&limit={}", offset, limit);
        let index: IndexPage = self.client.get(&path).await?;

        let refs: Vec<String> = index.results.into_iter().map(|r| r.url).collect();
        let client = &self.client;
        let items = self
            .fan_out
            .all_or_nothing(refs, |url| fetch_summary(client.clone(), url))
            .await?;

        tracing::debug!(count = items.len(), total = index.count, "Page resolved");
        Ok(Page {
            items,
            total: index.count,
        })
    }
}
