mod components;
mod config;
mod document;
mod escape;
mod extract;
mod inline;
mod layout;
mod markdown;
mod renderer;
mod sanitize;
mod summary;
mod theme;

use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::recipe::{RecipeIssue, generate_fallback_recipe, validate_recipe};
use crate::application::render::types::{
    OutputFormat, RecipeSource, RenderError, RenderOutput, RenderRequest, RenderService,
};
use crate::domain::blocks::Block;
use crate::domain::recipe::Recipe;

pub use config::{RenderPipelineConfig, SanitizeMode};
pub use document::{HtmlDocument, generate_html_document};
pub use escape::{escape_html, unescape_html};
pub use extract::{
    MAX_DEPTH, extract_blocks, extract_blocks_from_html, extract_blocks_from_html_with_mode,
    extract_blocks_with_mode,
};
pub use markdown::{is_markdown, markdown_to_html};
pub use renderer::{RenderOptions, render, render_with_options};
pub use sanitize::{sanitize, sanitize_with_mode};
pub use summary::{BlockSummary, SummaryDetail, summarize_blocks_for_llm};
pub use theme::{ThemeClasses, ThemeStyle, theme_classes, theme_style};

/// Extraction, recipe resolution, rendering and document assembly behind
/// [`RenderService`].
#[derive(Debug, Clone)]
pub struct ArticleRenderService {
    config: RenderPipelineConfig,
    options: RenderOptions,
}

impl ArticleRenderService {
    pub fn new(config: RenderPipelineConfig) -> Self {
        let options = RenderOptions::from(&config);
        Self { config, options }
    }

    /// Blocks for `content` using the configured sanitize mode.
    pub fn extract(&self, content: &str) -> Vec<Block> {
        extract_stage(content, self.config.sanitize_mode)
    }

    /// Summaries truncated to the configured preview length.
    pub fn summarize(&self, blocks: &[Block]) -> Vec<BlockSummary> {
        summarize_blocks_for_llm(blocks, self.config.summary_max_text_length)
    }
}

impl Default for ArticleRenderService {
    fn default() -> Self {
        Self::new(RenderPipelineConfig::default())
    }
}

static RENDER_SERVICE: Lazy<Arc<ArticleRenderService>> =
    Lazy::new(|| Arc::new(ArticleRenderService::new(active_render_config())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<ArticleRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl RenderService for ArticleRenderService {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        if request.content.trim().is_empty() {
            return Err(RenderError::empty_content());
        }

        let blocks = extract_stage(&request.content, self.config.sanitize_mode);
        if blocks.is_empty() {
            warn!(
                target = "article_render::render",
                article_id = %request.article_id,
                "content produced no blocks, rendering an empty body"
            );
        }

        let ResolvedRecipe {
            recipe,
            source,
            issues,
        } = recipe_stage(request);

        let body = render_with_options(&blocks, &recipe, &self.options);
        let html = match request.format {
            OutputFormat::BodyOnly => body,
            OutputFormat::Full => document_stage(request, &blocks, &recipe, &body, &self.config),
        };

        info!(
            target = "article_render::render",
            article_id = %request.article_id,
            theme = %recipe.theme,
            recipe_source = %source,
            blocks = blocks.len(),
            issues = issues.len(),
            "article rendered"
        );

        Ok(RenderOutput {
            html,
            blocks_rendered: blocks.len(),
            theme: recipe.theme,
            recipe_source: source,
            recipe_issues: issues,
        })
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

pub fn configure_render_service(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().cloned().unwrap_or_default()
}

struct ResolvedRecipe {
    recipe: Recipe,
    source: RecipeSource,
    issues: Vec<RecipeIssue>,
}

fn extract_stage(content: &str, mode: SanitizeMode) -> Vec<Block> {
    extract_blocks_with_mode(content, mode)
}

fn recipe_stage(request: &RenderRequest) -> ResolvedRecipe {
    let Some(value) = &request.recipe else {
        debug!(
            target = "article_render::recipe",
            article_id = %request.article_id,
            "no recipe supplied, using fallback"
        );
        return ResolvedRecipe {
            recipe: generate_fallback_recipe(&request.article_id),
            source: RecipeSource::Fallback,
            issues: Vec::new(),
        };
    };

    match validate_recipe(value) {
        Ok(recipe) => ResolvedRecipe {
            recipe,
            source: RecipeSource::Supplied,
            issues: Vec::new(),
        },
        Err(err) => {
            warn!(
                target = "article_render::recipe",
                article_id = %request.article_id,
                issues = err.issues.len(),
                error = %err,
                "recipe rejected, using fallback"
            );
            ResolvedRecipe {
                recipe: generate_fallback_recipe(&request.article_id),
                source: RecipeSource::Fallback,
                issues: err.issues,
            }
        }
    }
}

fn document_stage(
    request: &RenderRequest,
    blocks: &[Block],
    recipe: &Recipe,
    body: &str,
    config: &RenderPipelineConfig,
) -> String {
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .or_else(|| {
            blocks
                .iter()
                .find_map(Block::as_heading)
                .map(|(_, text)| text)
        })
        .unwrap_or(request.article_id.as_str());

    generate_html_document(&HtmlDocument {
        title,
        meta_description: request.meta_description.as_deref(),
        theme: recipe.theme,
        body_html: body,
        lang: &config.document_lang,
    })
}
