//! # Domain Model
//!
//! UI-ready values produced by the resolvers.

pub mod entity;

pub use entity::{EntityDetail, EntityKey, EntitySummary, EvolutionNode, Page, Stats, TypeTag};
