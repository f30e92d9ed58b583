//! # Category Resolver
//!
//! Members of a named category (elemental type), capped at the first
//! `category_cap` entries of the membership list. Members whose detail
//! fetch fails are dropped; survivors keep membership order.

use super::detail::fetch_summary;
use super::Resolver;
use crate::catalog::wire::CategoryRecord;
use crate::catalog::CatalogResult;
use crate::domain::EntitySummary;

impl Resolver {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_by_category(&self, category: &str) -> CatalogResult<Vec<EntitySummary>> {
        let key = category.trim().to_lowercase();
        let path = format!("type/{}", urlencoding::encode(&key));
        let record: CategoryRecord = self.client.get(&path).await?;

        let members = record.pokemon.len();
        let refs: Vec<String> = record
            .pokemon
            .into_iter()
            .take(self.category_cap)
            .map(|member| member.pokemon.url)
            .collect();
        let requested = refs.len();

        let client = &self.client;
        let items = self
            .fan_out
            .tolerant(refs, |url| fetch_summary(client.clone(), url))
            .await;

        if items.len() < requested {
            tracing::warn!(
                category = %key,
                dropped = requested - items.len(),
                "Some category members could not be resolved"
            );
        }
        tracing::debug!(members, returned = items.len(), "Category resolved");
        Ok(items)
    }
}
