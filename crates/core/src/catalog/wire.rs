//! # Catalog Wire Format
//!
//! Shapes of the remote payloads, trimmed to the fields the engine reads,
//! plus the projections from those payloads into the domain model.
//! Unknown fields are ignored.

use serde::Deserialize;

use super::error::{CatalogError, CatalogResult};
use crate::domain::{EntitySummary, EvolutionNode, Stats, TypeTag};

/// `{ name, url }` reference used throughout the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `GET /pokemon?offset=&limit=`
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub other: Option<OtherSprites>,
}

impl Sprites {
    fn artwork(&self) -> Option<&Artwork> {
        self.other.as_ref()?.official_artwork.as_ref()
    }

    /// Official artwork, falling back to the plain front sprite
    pub fn primary(&self) -> Option<&str> {
        self.artwork()
            .and_then(|a| a.front_default.as_deref())
            .or(self.front_default.as_deref())
    }

    /// Shiny artwork, falling back to the plain shiny sprite
    pub fn shiny(&self) -> Option<&str> {
        self.artwork()
            .and_then(|a| a.front_shiny.as_deref())
            .or(self.front_shiny.as_deref())
    }
}

/// `GET /pokemon/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    pub species: NamedResource,
}

impl PokemonRecord {
    fn checked_id(&self, url: &str) -> CatalogResult<u32> {
        if self.id == 0 {
            return Err(CatalogError::malformed(url, "id must be positive"));
        }
        Ok(self.id)
    }

    pub fn type_tags(&self, url: &str) -> CatalogResult<Vec<TypeTag>> {
        if self.types.is_empty() {
            return Err(CatalogError::malformed(url, "types: empty"));
        }
        Ok(self
            .types
            .iter()
            .map(|slot| TypeTag::from(slot.type_.name.as_str()))
            .collect())
    }

    pub fn sprite_url(&self, url: &str) -> CatalogResult<String> {
        self.sprites
            .primary()
            .map(str::to_string)
            .ok_or_else(|| CatalogError::malformed(url, "sprites: no front image"))
    }

    /// Shiny sprite; the primary sprite stands in when the catalog has none
    pub fn sprite_shiny_url(&self, url: &str) -> CatalogResult<String> {
        match self.sprites.shiny() {
            Some(shiny) => Ok(shiny.to_string()),
            None => self.sprite_url(url),
        }
    }

    /// First six positional stats
    ///
    /// Position, not the stat name, decides which field a value lands in.
    pub fn base_stats(&self, url: &str) -> CatalogResult<Stats> {
        if self.stats.len() < 6 {
            return Err(CatalogError::malformed(
                url,
                format!("stats: expected 6 entries, got {}", self.stats.len()),
            ));
        }
        let mut values = [0u8; 6];
        for (slot, value) in self.stats.iter().zip(values.iter_mut()) {
            *value = u8::try_from(slot.base_stat).map_err(|_| {
                CatalogError::malformed(
                    url,
                    format!("stats: {} = {} exceeds 255", slot.stat.name, slot.base_stat),
                )
            })?;
        }
        Ok(Stats::from_array(values))
    }

    pub fn ability_names(&self) -> Vec<String> {
        self.abilities
            .iter()
            .map(|slot| slot.ability.name.clone())
            .collect()
    }

    pub fn to_summary(&self, url: &str) -> CatalogResult<EntitySummary> {
        Ok(EntitySummary {
            id: self.checked_id(url)?,
            name: self.name.clone(),
            types: self.type_tags(url)?,
            sprite_url: self.sprite_url(url)?,
        })
    }

    pub fn to_evolution_node(&self, url: &str) -> CatalogResult<EvolutionNode> {
        Ok(EvolutionNode {
            id: self.checked_id(url)?,
            name: self.name.clone(),
            sprite_url: self.sprite_url(url)?,
        })
    }
}

/// `GET /pokemon-species/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesRecord {
    /// Kept loose: an unusable reference means "no lineage", not a bad species
    #[serde(default)]
    pub evolution_chain: Option<serde_json::Value>,
}

impl SpeciesRecord {
    /// URL of the evolution-chain resource, when the reference carries one
    pub fn evolution_chain_url(&self) -> Option<&str> {
        self.evolution_chain.as_ref()?.get("url")?.as_str()
    }
}

/// One node of the evolution tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    /// Leaf node, mostly for building trees by hand
    pub fn leaf(species: impl Into<String>) -> Self {
        let name = species.into();
        Self {
            species: NamedResource {
                url: String::new(),
                name,
            },
            evolves_to: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ChainLink) -> Self {
        self.evolves_to.push(child);
        self
    }
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainRecord {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    pub pokemon: NamedResource,
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub pokemon: Vec<CategoryMember>,
}
