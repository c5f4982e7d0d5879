//! Resolve recipe layout entries against extracted blocks.
//!
//! Referenced blocks are rendered in layout order, but only inside the
//! document positions those blocks occupied; unreferenced blocks keep their
//! own position. Nothing is dropped. Dangling ids and standard items naming
//! `contrastPair` are ignored.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::blocks::Block;
use crate::domain::recipe::{Component, ContrastPairItem, LayoutEntry, LayoutItem};

/// One rendered unit of the layout plan.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Placement<'a> {
    Single {
        block: &'a Block,
        item: Option<&'a LayoutItem>,
    },
    Pair {
        left: &'a Block,
        right: &'a Block,
        item: &'a ContrastPairItem,
    },
}

pub(crate) fn plan_layout<'a>(blocks: &'a [Block], layout: &'a [LayoutEntry]) -> Vec<Placement<'a>> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(blocks.len());
    for (position, block) in blocks.iter().enumerate() {
        positions.entry(block.id.as_str()).or_insert(position);
    }

    let mut placed = vec![false; blocks.len()];
    let mut resolved: Vec<(usize, Placement<'a>)> = Vec::new();

    for entry in layout {
        match entry {
            LayoutEntry::Block(item) => {
                let position = (item.component != Component::ContrastPair)
                    .then(|| available(&positions, &placed, &item.block_id))
                    .flatten();
                let Some(position) = position else {
                    debug!(
                        target = "article_render::render",
                        block_id = %item.block_id,
                        "layout entry skipped"
                    );
                    continue;
                };
                placed[position] = true;
                resolved.push((
                    position,
                    Placement::Single {
                        block: &blocks[position],
                        item: Some(item),
                    },
                ));
            }
            LayoutEntry::ContrastPair(item) => {
                let left = available(&positions, &placed, &item.left_block_id);
                let right = available(&positions, &placed, &item.right_block_id)
                    .filter(|right| Some(*right) != left);

                match (left, right) {
                    (Some(left), Some(right)) => {
                        placed[left] = true;
                        placed[right] = true;
                        resolved.push((
                            left.min(right),
                            Placement::Pair {
                                left: &blocks[left],
                                right: &blocks[right],
                                item,
                            },
                        ));
                    }
                    (Some(position), None) | (None, Some(position)) => {
                        debug!(
                            target = "article_render::render",
                            left = %item.left_block_id,
                            right = %item.right_block_id,
                            "contrast pair degraded to a single block"
                        );
                        placed[position] = true;
                        resolved.push((
                            position,
                            Placement::Single {
                                block: &blocks[position],
                                item: None,
                            },
                        ));
                    }
                    (None, None) => {
                        debug!(
                            target = "article_render::render",
                            left = %item.left_block_id,
                            right = %item.right_block_id,
                            "contrast pair skipped"
                        );
                    }
                }
            }
        }
    }

    let mut slots: Vec<usize> = resolved.iter().map(|(slot, _)| *slot).collect();
    slots.sort_unstable();

    let mut ordered: BTreeMap<usize, Placement<'a>> = slots
        .into_iter()
        .zip(resolved.into_iter().map(|(_, placement)| placement))
        .collect();

    for (position, block) in blocks.iter().enumerate() {
        if !placed[position] {
            ordered.insert(position, Placement::Single { block, item: None });
        }
    }

    ordered.into_values().collect()
}

fn available(positions: &HashMap<&str, usize>, placed: &[bool], id: &str) -> Option<usize> {
    positions
        .get(id)
        .copied()
        .filter(|position| !placed[*position])
}
