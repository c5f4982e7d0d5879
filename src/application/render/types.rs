use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::recipe::RecipeIssue;
use crate::domain::recipe::Theme;

/// Whether the caller wants a complete document or only the article fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Full,
    BodyOnly,
}

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Stable article identity; keys the fallback theme.
    pub article_id: String,
    /// Document title. Defaults to the first heading, then the article id.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Raw Markdown or HTML.
    pub content: String,
    /// Untrusted recipe document, validated before use.
    #[serde(default)]
    pub recipe: Option<serde_json::Value>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl RenderRequest {
    pub fn new(article_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            title: None,
            meta_description: None,
            content: content.into(),
            recipe: None,
            format: OutputFormat::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn with_recipe(mut self, recipe: serde_json::Value) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    /// The caller's recipe passed validation.
    Supplied,
    /// The recipe was absent or invalid and a deterministic one was generated.
    Fallback,
}

impl RecipeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RecipeSource::Supplied => "supplied",
            RecipeSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub html: String,
    pub blocks_rendered: usize,
    pub theme: Theme,
    pub recipe_source: RecipeSource,
    /// Why a supplied recipe was rejected; empty when it was accepted or absent.
    pub recipe_issues: Vec<RecipeIssue>,
}

/// Structured errors surfaced by the rendering pipeline. Recipe problems are
/// not errors; they fall back and are reported on [`RenderOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("article content is empty")]
    EmptyContent,
}

impl RenderError {
    pub fn empty_content() -> Self {
        Self::EmptyContent
    }
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError>;
}
