//! # Evolution Graph Resolver
//!
//! Walks the branching evolution tree and resolves each species into an
//! [`EvolutionNode`].
//!
//! The walk uses an explicit stack rather than recursion, so tree depth is
//! bounded only by memory. Output is the pre-order of the source tree with
//! children in source order; a node that fails to resolve is left out but
//! its descendants are still visited.

use super::detail::fetch_evolution_node;
use super::Resolver;
use crate::catalog::wire::ChainLink;
use crate::domain::{EntityKey, EvolutionNode};

/// Species names of the tree in pre-order
pub fn preorder_species(root: &ChainLink) -> Vec<&str> {
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(link) = stack.pop() {
        order.push(link.species.name.as_str());
        // reversed so the first child is popped next
        stack.extend(link.evolves_to.iter().rev());
    }

    order
}

impl Resolver {
    /// Flatten and resolve an evolution tree
    ///
    /// Never fails: an entirely unresolvable tree yields an empty sequence.
    #[tracing::instrument(skip_all, fields(root = %root.species.name))]
    pub async fn resolve_chain(&self, root: &ChainLink) -> Vec<EvolutionNode> {
        let paths: Vec<String> = preorder_species(root)
            .into_iter()
            .map(|name| format!("pokemon/{}", EntityKey::from(name).path_segment()))
            .collect();

        let client = &self.client;
        let nodes = self
            .fan_out
            .tolerant(paths, |path| fetch_evolution_node(client.clone(), path))
            .await;

        tracing::debug!(resolved = nodes.len(), "Evolution chain resolved");
        nodes
    }
}
