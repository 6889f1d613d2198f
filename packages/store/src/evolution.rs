//! Flattening of an evolution tree into the ordered list the detail page shows.

use crate::format::artwork_url;
use crate::models::EvolutionStage;
use crate::pokeapi::{id_from_resource_url, ChainLink};

/// Walk the chain depth-first, emitting each species before its successors.
///
/// Branching chains (e.g. eevee) list the root first, then every branch in API
/// order. Nodes whose species URL carries no numeric id are skipped, but their
/// successors are still visited.
pub fn extract_evolution_chain(chain: &ChainLink) -> Vec<EvolutionStage> {
    let mut stages = Vec::new();
    collect(chain, &mut stages);
    stages
}

fn collect(node: &ChainLink, stages: &mut Vec<EvolutionStage>) {
    if let Some(id) = id_from_resource_url(&node.species.url) {
        stages.push(EvolutionStage {
            id,
            name: node.species.name.clone(),
            image: artwork_url(id),
        });
    }

    for next in &node.evolves_to {
        collect(next, stages);
    }
}
