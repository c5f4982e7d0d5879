//! Article rendering pipeline.
//!
//! Content is sanitized, normalized from Markdown when needed and extracted
//! into typed blocks; a validated (or fallback) recipe then decides theme and
//! layout. Every stage is pure and deterministic, and recipe problems degrade
//! to the fallback instead of failing the render.

mod service;
mod types;

pub use service::{
    ArticleRenderService, BlockSummary, HtmlDocument, MAX_DEPTH, RenderConfigError, RenderOptions,
    RenderPipelineConfig, SanitizeMode, SummaryDetail, ThemeClasses, ThemeStyle,
    configure_render_service, escape_html, extract_blocks, extract_blocks_from_html,
    extract_blocks_from_html_with_mode, extract_blocks_with_mode, generate_html_document,
    is_markdown, markdown_to_html, render, render_service, render_with_options, sanitize,
    sanitize_with_mode, summarize_blocks_for_llm, theme_classes, theme_style, unescape_html,
};
pub use types::{
    OutputFormat, RecipeSource, RenderError, RenderOutput, RenderRequest, RenderService,
};
