//! Flattening of resolved evolution trees into display order

use shared::{EvolutionNode, EvolutionStep};

/// Pre-order walk of `root`, children in source order
///
/// Every step except the last carries `separator_after`, so the UI can draw
/// an arrow between a node and whatever follows it in the sequence.
pub fn flatten(root: &EvolutionNode) -> Vec<EvolutionStep> {
    let mut steps = Vec::with_capacity(root.node_count());
    visit(root, 0, 0, None, &mut steps);
    if let Some(last) = steps.last_mut() {
        last.separator_after = false;
    }
    steps
}

fn visit(
    node: &EvolutionNode,
    depth: usize,
    sibling_index: usize,
    parent_id: Option<u32>,
    steps: &mut Vec<EvolutionStep>,
) {
    steps.push(EvolutionStep {
        species_id: node.species_id,
        name: node.name.clone(),
        sprite_url: node.sprite_url.clone(),
        types: node.types.clone(),
        depth,
        sibling_index,
        parent_id,
        separator_after: true,
    });
    for (index, child) in node.children.iter().enumerate() {
        visit(child, depth + 1, index, Some(node.species_id), steps);
    }
}
