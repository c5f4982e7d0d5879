use tracing::debug;

use crate::domain::recipe::{Component, LayoutEntry, LayoutItem, Recipe, Theme};
use crate::domain::seed::seeded_pick;

/// Placeholder slots; none of them names a real block, so rendering keeps
/// document order.
const FALLBACK_SLOTS: [(&str, Component, &str); 4] = [
    ("intro", Component::Paragraph, "lead"),
    ("content", Component::Paragraph, "normal"),
    ("faq", Component::List, "cards"),
    ("cta", Component::Callout, "info"),
];

/// Deterministic recipe for an article whose supplied recipe is missing or
/// invalid. The theme is keyed by `article_identity`.
pub fn generate_fallback_recipe(article_identity: &str) -> Recipe {
    let theme = seeded_pick(article_identity, &Theme::ALL)
        .copied()
        .unwrap_or_default();

    let layout = FALLBACK_SLOTS
        .iter()
        .map(|(slot, component, variant)| {
            LayoutEntry::Block(LayoutItem {
                block_id: (*slot).to_string(),
                component: *component,
                variant: (*variant).to_string(),
            })
        })
        .collect();

    debug!(
        target = "article_render::recipe",
        article_identity,
        theme = %theme,
        "fallback recipe generated"
    );

    Recipe::new(theme, true, layout)
}
