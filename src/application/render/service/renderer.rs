//! Deterministic `(blocks, recipe) -> HTML fragment` rendering.

use tracing::debug;

use crate::config::{DEFAULT_TAKEAWAYS_TITLE, DEFAULT_TOC_TITLE};
use crate::domain::blocks::Block;
use crate::domain::recipe::Recipe;
use crate::domain::slug::heading_anchor;

use super::components::ComponentRenderer;
use super::config::RenderPipelineConfig;
use super::escape::escape_html;
use super::layout::plan_layout;
use super::theme::{ThemeClasses, theme_classes};

const TOC_MAX_LEVEL: u8 = 3;
const TOC_MIN_HEADINGS: usize = 3;
const TOC_INDENT_PX: u8 = 16;

/// Locale strings used by generated chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub toc_title: String,
    pub takeaways_title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            takeaways_title: DEFAULT_TAKEAWAYS_TITLE.to_string(),
        }
    }
}

impl From<&RenderPipelineConfig> for RenderOptions {
    fn from(config: &RenderPipelineConfig) -> Self {
        Self {
            toc_title: config.toc_title.clone(),
            takeaways_title: config.takeaways_title.clone(),
        }
    }
}

pub fn render(blocks: &[Block], recipe: &Recipe) -> String {
    render_with_options(blocks, recipe, &RenderOptions::default())
}

pub fn render_with_options(blocks: &[Block], recipe: &Recipe, options: &RenderOptions) -> String {
    let classes = theme_classes(recipe.theme);
    let placements = plan_layout(blocks, &recipe.layout);
    let mut parts: Vec<String> = Vec::with_capacity(placements.len() + 1);

    if recipe.toc
        && let Some(toc) = render_toc(blocks, classes, &options.toc_title)
    {
        parts.push(toc);
    }

    let mut components = ComponentRenderer::new(classes, &options.takeaways_title);
    parts.extend(placements.iter().map(|placement| components.render(placement)));

    debug!(
        target = "article_render::render",
        theme = %recipe.theme,
        blocks = blocks.len(),
        placements = placements.len(),
        "fragment rendered"
    );

    let mut html = format!("<div class=\"article-content {}\">", classes.wrapper);
    for part in parts {
        html.push('\n');
        html.push_str(&part);
    }
    html.push_str("\n</div>");
    html
}

fn render_toc(blocks: &[Block], classes: &ThemeClasses, title: &str) -> Option<String> {
    let entries: Vec<String> = blocks
        .iter()
        .filter_map(|block| {
            let (level, text) = block.as_heading()?;
            (level.get() <= TOC_MAX_LEVEL).then(|| {
                format!(
                    "<li style=\"margin-left: {}px\"><a href=\"#{}\">{}</a></li>",
                    u16::from(level.get() - 1) * u16::from(TOC_INDENT_PX),
                    escape_html(&heading_anchor(text, &block.id)),
                    escape_html(text)
                )
            })
        })
        .collect();

    if entries.len() < TOC_MIN_HEADINGS {
        return None;
    }

    Some(format!(
        "<nav class=\"toc {}\"><h4>{}</h4><ul>{}</ul></nav>",
        classes.toc_container,
        escape_html(title),
        entries.concat()
    ))
}
