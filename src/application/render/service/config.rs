use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};

use ammonia::Builder as AmmoniaBuilder;

use crate::config::{
    DEFAULT_DOCUMENT_LANG, DEFAULT_SUMMARY_MAX_TEXT_LENGTH, DEFAULT_TAKEAWAYS_TITLE,
    DEFAULT_TOC_TITLE,
};

/// How raw input is cleaned before block extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizeMode {
    /// Regex removal of scripts, frames, styles, event handlers and
    /// `javascript:`/`data:` URLs. Not an AST sanitizer.
    #[default]
    Pattern,
    /// Pattern pass followed by an allow-list DOM sanitizer.
    Strict,
}

impl SanitizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SanitizeMode::Pattern => "pattern",
            SanitizeMode::Strict => "strict",
        }
    }
}

impl fmt::Display for SanitizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SanitizeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pattern" => Ok(SanitizeMode::Pattern),
            "strict" => Ok(SanitizeMode::Strict),
            other => Err(format!("expected `pattern` or `strict`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    pub sanitize_mode: SanitizeMode,
    pub summary_max_text_length: usize,
    pub toc_title: String,
    pub takeaways_title: String,
    pub document_lang: String,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            sanitize_mode: SanitizeMode::default(),
            summary_max_text_length: DEFAULT_SUMMARY_MAX_TEXT_LENGTH,
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            takeaways_title: DEFAULT_TAKEAWAYS_TITLE.to_string(),
            document_lang: DEFAULT_DOCUMENT_LANG.to_string(),
        }
    }
}

impl From<&crate::config::Settings> for RenderPipelineConfig {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            sanitize_mode: settings.render.sanitize_mode,
            summary_max_text_length: settings.render.summary_max_text_length.get(),
            toc_title: settings.render.toc_title.clone(),
            takeaways_title: settings.render.takeaways_title.clone(),
            document_lang: settings.document.lang.clone(),
        }
    }
}

/// Allow list matching the elements the block extractor understands.
pub(crate) fn build_strict_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "article",
        "b",
        "blockquote",
        "br",
        "code",
        "div",
        "em",
        "figcaption",
        "figure",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "li",
        "main",
        "ol",
        "p",
        "pre",
        "section",
        "span",
        "strong",
        "table",
        "tbody",
        "td",
        "tfoot",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);
    builder.generic_attributes(HashSet::new());

    let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = HashMap::from([
        ("a", HashSet::from(["href", "title"])),
        ("img", HashSet::from(["src", "alt"])),
        ("code", HashSet::from(["class"])),
        ("th", HashSet::from(["colspan", "rowspan"])),
        ("td", HashSet::from(["colspan", "rowspan"])),
    ]);
    builder.tag_attributes(tag_attributes);

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_mode_parses_case_insensitively() {
        assert_eq!("Strict".parse::<SanitizeMode>(), Ok(SanitizeMode::Strict));
        assert_eq!(" pattern ".parse::<SanitizeMode>(), Ok(SanitizeMode::Pattern));
        assert!("dom".parse::<SanitizeMode>().is_err());
    }

    #[test]
    fn strict_sanitizer_keeps_code_language_class() {
        let cleaned = build_strict_sanitizer()
            .clean(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#)
            .to_string();
        assert!(cleaned.contains(r#"class="language-rust""#));
    }

    #[test]
    fn strict_sanitizer_drops_unknown_tags_and_attributes() {
        let cleaned = build_strict_sanitizer()
            .clean(r#"<p style="color:red" id="x">Hi <marquee>there</marquee></p><form><input></form>"#)
            .to_string();
        assert_eq!(cleaned, "<p>Hi there</p>");
    }
}
