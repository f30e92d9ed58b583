//! # Detail Resolver
//!
//! Primary record -> species record -> evolution chain.
//!
//! The first two fetches are fatal. The evolution chain is best-effort: any
//! failure fetching it degrades the lineage to an empty sequence.

use super::Resolver;
use crate::catalog::wire::{EvolutionChainRecord, PokemonRecord, SpeciesRecord};
use crate::catalog::{CatalogClient, CatalogResult};
use crate::domain::{EntityDetail, EntityKey, EntitySummary, EvolutionNode};

impl Resolver {
    /// Full detail for an id or canonical name
    #[tracing::instrument(skip_all, fields(key = %key))]
    pub async fn fetch_detail(&self, key: &EntityKey) -> CatalogResult<EntityDetail> {
        let path = format!("pokemon/{}", key.path_segment());
        let url = self.client.resolve_url(&path);
        let record: PokemonRecord = self.client.get(&path).await?;

        let summary = record.to_summary(&url)?;
        let sprite_shiny_url = record.sprite_shiny_url(&url)?;
        let stats = record.base_stats(&url)?;

        let species: SpeciesRecord = self.client.get(&record.species.url).await?;
        let evolution_chain = match species.evolution_chain_url() {
            Some(chain_url) => match self.client.get::<EvolutionChainRecord>(chain_url).await {
                Ok(chain) => self.resolve_chain(&chain.chain).await,
                Err(e) => {
                    tracing::warn!(error = %e, "Evolution chain unavailable, continuing without it");
                    Vec::new()
                }
            },
            None if species.evolution_chain.is_some() => {
                tracing::warn!(species = %record.species.name, "Unusable evolution chain reference, continuing without it");
                Vec::new()
            }
            None => {
                tracing::debug!(species = %record.species.name, "Species has no evolution chain");
                Vec::new()
            }
        };

        Ok(EntityDetail {
            id: summary.id,
            name: summary.name,
            types: summary.types,
            sprite_url: summary.sprite_url,
            sprite_shiny_url,
            height: record.height,
            weight: record.weight,
            stats,
            abilities: record.ability_names(),
            evolution_chain,
        })
    }
}

/// Primary record at `path`, projected to a summary
///
/// Takes owned arguments so it can run inside a fan-out task.
pub(crate) async fn fetch_summary(client: CatalogClient, path: String) -> CatalogResult<EntitySummary> {
    let record: PokemonRecord = client.get(&path).await?;
    record.to_summary(&client.resolve_url(&path))
}

/// Primary record at `path`, projected to a lineage node
pub(crate) async fn fetch_evolution_node(
    client: CatalogClient,
    path: String,
) -> CatalogResult<EvolutionNode> {
    let record: PokemonRecord = client.get(&path).await?;
    record.to_evolution_node(&client.resolve_url(&path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{link, FixtureCatalog};
    use crate::catalog::CatalogError;
    use crate::config::CatalogConfig;
    use crate::domain::TypeTag;
    use serde_json::json;

    fn resolver(catalog: &FixtureCatalog) -> Resolver {
        Resolver::with_client(catalog.client(), &CatalogConfig::default())
    }

    fn bulbasaur_line() -> FixtureCatalog {
        let catalog = FixtureCatalog::new();
        catalog.add_pokemon(1, "bulbasaur", &["grass", "poison"], Some(1));
        catalog.add_pokemon(2, "ivysaur", &["grass", "poison"], Some(1));
        catalog.add_pokemon(3, "venusaur", &["grass", "poison"], Some(1));
        catalog.add_chain(
            1,
            link("bulbasaur", vec![link("ivysaur", vec![link("venusaur", vec![])])]),
        );
        catalog
    }

    #[tokio::test]
    async fn test_full_detail() {
        let catalog = bulbasaur_line();
        let detail = resolver(&catalog).fetch_detail(&EntityKey::Id(2)).await.unwrap();

        assert_eq!(detail.id, 2);
        assert_eq!(detail.name, "ivysaur");
        assert_eq!(detail.types, vec![TypeTag::Grass, TypeTag::Poison]);
        assert_eq!(detail.sprite_url, "https://img.test/art/2.png");
        assert_eq!(detail.sprite_shiny_url, "https://img.test/shiny/2.png");
        assert_eq!((detail.height, detail.weight), (10, 100));
        assert_eq!(detail.stats.to_array(), [40, 41, 42, 43, 44, 45]);
        assert_eq!(detail.abilities, vec!["ivysaur-ability".to_string()]);

        let lineage: Vec<_> = detail.evolution_chain.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(lineage, vec!["bulbasaur", "ivysaur", "venusaur"]);
    }

    #[tokio::test]
    async fn test_lookup_by_name() {
        let catalog = bulbasaur_line();
        let detail = resolver(&catalog)
            .fetch_detail(&EntityKey::from("venusaur"))
            .await
            .unwrap();
        assert_eq!(detail.id, 3);
    }

    #[tokio::test]
    async fn test_missing_chain_reference_yields_empty_lineage() {
        let catalog = FixtureCatalog::new();
        catalog.add_pokemon(132, "ditto", &["normal"], None);
        let detail = resolver(&catalog).fetch_detail(&EntityKey::Id(132)).await.unwrap();
        assert_eq!(detail.name, "ditto");
        assert!(detail.evolution_chain.is_empty());
    }

    #[tokio::test]
    async fn test_unusable_chain_reference_yields_empty_lineage() {
        let catalog = FixtureCatalog::new();
        catalog.add_pokemon(132, "ditto", &["normal"], None);
        for chain in [json!({}), json!({ "url": null })] {
            catalog.serve(
                "pokemon-species/132",
                json!({ "id": 132, "name": "ditto", "evolution_chain": chain }),
            );
            let detail = resolver(&catalog).fetch_detail(&EntityKey::Id(132)).await.unwrap();
            assert_eq!(detail.id, 132);
            assert!(detail.evolution_chain.is_empty());
        }
    }

    #[tokio::test]
    async fn test_failed_chain_fetch_is_not_fatal() {
        let catalog = bulbasaur_line();
        catalog.fail("evolution-chain/1", 500);
        let detail = resolver(&catalog).fetch_detail(&EntityKey::Id(1)).await.unwrap();
        assert_eq!(detail.name, "bulbasaur");
        assert_eq!(detail.stats.hp, 40);
        assert!(detail.evolution_chain.is_empty());

        catalog.garbage("evolution-chain/1");
        let detail = resolver(&catalog).fetch_detail(&EntityKey::Id(1)).await.unwrap();
        assert!(detail.evolution_chain.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let catalog = bulbasaur_line();
        let err = resolver(&catalog)
            .fetch_detail(&EntityKey::from("missingno"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_species_failure_is_fatal() {
        let catalog = bulbasaur_line();
        catalog.fail("pokemon-species/1", 502);
        let err = resolver(&catalog).fetch_detail(&EntityKey::Id(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Upstream { status: Some(502), .. }));
    }

    #[tokio::test]
    async fn test_short_stats_are_malformed() {
        let catalog = bulbasaur_line();
        let mut body = crate::catalog::fixtures::pokemon_json(1, "bulbasaur", &["grass"]);
        body["stats"].as_array_mut().unwrap().pop();
        catalog.serve("pokemon/1", body);

        let err = resolver(&catalog).fetch_detail(&EntityKey::Id(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResponse { .. }));
        // nothing past the primary record is fetched
        assert_eq!(catalog.hit_count("pokemon-species/1"), 0);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let catalog = bulbasaur_line();
        let resolver = resolver(&catalog);
        let first = resolver.fetch_detail(&EntityKey::Id(1)).await.unwrap();
        let second = resolver.fetch_detail(&EntityKey::Id(1)).await.unwrap();
        assert_eq!(first, second);
        // no cache between calls
        assert_eq!(catalog.hit_count("pokemon/1"), 2);
        assert_eq!(catalog.hit_count("pokemon-species/1"), 2);
    }

    #[tokio::test]
    async fn test_fetch_summary_projects_record() {
        let catalog = FixtureCatalog::new();
        catalog.serve(
            "pokemon/25",
            json!({
                "id": 25,
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "types": [{ "type": { "name": "electric", "url": "" } }],
                "sprites": { "front_default": "p.png" },
                "species": { "name": "pikachu", "url": "" }
            }),
        );
        let summary = fetch_summary(catalog.client(), "pokemon/25".to_string())
            .await
            .unwrap();
        assert_eq!(summary.sprite_url, "p.png");
        assert_eq!(summary.types, vec![TypeTag::Electric]);
    }
}
