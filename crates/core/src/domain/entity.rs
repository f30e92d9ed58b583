//! # Entity Model
//!
//! Request-scoped, immutable values handed to the presentation layer.
//! Every instance is built fresh per call from remote data; nothing here is
//! cached or mutated after construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elemental type tag
///
/// The catalog uses a closed vocabulary of 18 tags, but tags outside it are
/// carried through as `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    /// Tag outside the known vocabulary, kept verbatim
    Other(String),
}

impl TypeTag {
    /// The known vocabulary in display order
    pub const ALL: [TypeTag; 18] = [
        TypeTag::Normal,
        TypeTag::Fire,
        TypeTag::Water,
        TypeTag::Electric,
        TypeTag::Grass,
        TypeTag::Ice,
        TypeTag::Fighting,
        TypeTag::Poison,
        TypeTag::Ground,
        TypeTag::Flying,
        TypeTag::Psychic,
        TypeTag::Bug,
        TypeTag::Rock,
        TypeTag::Ghost,
        TypeTag::Dragon,
        TypeTag::Dark,
        TypeTag::Steel,
        TypeTag::Fairy,
    ];

    /// Catalog spelling of the tag
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Normal => "normal",
            TypeTag::Fire => "fire",
            TypeTag::Water => "water",
            TypeTag::Electric => "electric",
            TypeTag::Grass => "grass",
            TypeTag::Ice => "ice",
            TypeTag::Fighting => "fighting",
            TypeTag::Poison => "poison",
            TypeTag::Ground => "ground",
            TypeTag::Flying => "flying",
            TypeTag::Psychic => "psychic",
            TypeTag::Bug => "bug",
            TypeTag::Rock => "rock",
            TypeTag::Ghost => "ghost",
            TypeTag::Dragon => "dragon",
            TypeTag::Dark => "dark",
            TypeTag::Steel => "steel",
            TypeTag::Fairy => "fairy",
            TypeTag::Other(tag) => tag,
        }
    }

    /// Whether the tag belongs to the known vocabulary
    pub fn is_known(&self) -> bool {
        !matches!(self, TypeTag::Other(_))
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        TypeTag::ALL
            .iter()
            .find(|known| known.as_str() == tag)
            .cloned()
            .unwrap_or(TypeTag::Other(tag))
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        TypeTag::from(tag.to_string())
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup key for a single entity: catalog id or canonical lowercase name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Id(u32),
    Name(String),
}

impl EntityKey {
    /// Interpret free-form input as a key
    ///
    /// Input is trimmed and lowercased. Positive integers become `Id`,
    /// everything else (including `0`) is treated as a name. Blank input
    /// yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        match normalized.parse::<u32>() {
            Ok(id) if id > 0 => Some(EntityKey::Id(id)),
            _ => Some(EntityKey::Name(normalized)),
        }
    }

    /// Percent-encoded path segment for the catalog
    pub fn path_segment(&self) -> String {
        match self {
            EntityKey::Id(id) => id.to_string(),
            EntityKey::Name(name) => urlencoding::encode(name).into_owned(),
        }
    }
}

impl From<u32> for EntityKey {
    fn from(id: u32) -> Self {
        EntityKey::Id(id)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        EntityKey::Name(name.to_string())
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "{}", id),
            EntityKey::Name(name) => f.write_str(name),
        }
    }
}

/// Lightweight reference used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    pub id: u32,
    pub name: String,
    /// Slot order as reported by the catalog; never empty
    pub types: Vec<TypeTag>,
    pub sprite_url: String,
}

/// Base stats in canonical order
///
/// Field order is load-bearing: it mirrors the catalog's positional stat
/// list (hp, attack, defense, special-attack, special-defense, speed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl Stats {
    /// Catalog stat names in canonical order
    pub const NAMES: [&'static str; 6] = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];

    /// Build from the six positional values
    pub fn from_array(values: [u8; 6]) -> Self {
        let [hp, attack, defense, special_attack, special_defense, speed] = values;
        Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    pub fn to_array(self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
    }

    /// (name, value) pairs in canonical order
    pub fn entries(self) -> impl Iterator<Item = (&'static str, u8)> {
        Self::NAMES.into_iter().zip(self.to_array())
    }

    pub fn total(self) -> u32 {
        self.to_array().iter().map(|v| u32::from(*v)).sum()
    }
}

/// Minimal projection used to render a lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionNode {
    pub id: u32,
    pub name: String,
    pub sprite_url: String,
}

/// Full per-entity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDetail {
    pub id: u32,
    pub name: String,
    pub types: Vec<TypeTag>,
    pub sprite_url: String,
    pub sprite_shiny_url: String,
    /// Tenths of a metre
    pub height: u32,
    /// Tenths of a kilogram
    pub weight: u32,
    pub stats: Stats,
    pub abilities: Vec<String>,
    /// Pre-order flattening of the lineage; empty when it could not be resolved
    pub evolution_chain: Vec<EvolutionNode>,
}

impl EntityDetail {
    /// Project down to the listing shape
    pub fn summary(&self) -> EntitySummary {
        EntitySummary {
            id: self.id,
            name: self.name.clone(),
            types: self.types.clone(),
            sprite_url: self.sprite_url.clone(),
        }
    }
}

/// One page of the catalog index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<EntitySummary>,
    /// Total entities in the catalog, not on this page
    pub total: u32,
}
