//! Pattern-based input cleanup.
//!
//! This is not an HTML sanitizer in the AST sense: it strips the dangerous
//! constructs a semi-trusted generator is likely to emit and leaves the rest of
//! the markup alone. [`SanitizeMode::Strict`] adds an allow-list pass on top.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::config::{SanitizeMode, build_strict_sanitizer};

static SCRIPT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script pattern"));
static IFRAME_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe\s*>").expect("valid iframe pattern"));
static STYLE_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").expect("valid style pattern"));
static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z][^<>]*>").expect("valid open tag pattern"));
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+on\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+)"#)
        .expect("valid event handler pattern")
});
static JAVASCRIPT_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)href\s*=\s*(?:"\s*javascript:[^"]*"|'\s*javascript:[^']*'|javascript:[^\s>]*)"#)
        .expect("valid javascript href pattern")
});
static DATA_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)src\s*=\s*(?:"\s*data:[^"]*"|'\s*data:[^']*'|data:[^\s>]*)"#)
        .expect("valid data src pattern")
});
static STRICT_SANITIZER: Lazy<ammonia::Builder<'static>> = Lazy::new(build_strict_sanitizer);

/// Strip `<script>`, `<iframe>` and `<style>` elements with their content,
/// inline `on*` handlers, `javascript:` hrefs (rewritten to `#`) and `data:`
/// image sources (emptied).
///
/// Attribute rules only apply inside opening tags; text between tags is
/// never rewritten.
pub fn sanitize(html: &str) -> String {
    let html = SCRIPT_ELEMENT.replace_all(html, "");
    let html = IFRAME_ELEMENT.replace_all(&html, "");
    let html = STYLE_ELEMENT.replace_all(&html, "");
    let html = OPEN_TAG.replace_all(&html, |tag: &Captures<'_>| clean_attributes(&tag[0]));
    html.into_owned()
}

fn clean_attributes(tag: &str) -> String {
    let tag = EVENT_HANDLER.replace_all(tag, "");
    let tag = JAVASCRIPT_HREF.replace_all(&tag, r##"href="#""##);
    let tag = DATA_SRC.replace_all(&tag, r#"src="""#);
    tag.into_owned()
}

/// Run [`sanitize`] and, in strict mode, the allow-list sanitizer after it.
pub fn sanitize_with_mode(html: &str, mode: SanitizeMode) -> String {
    let cleaned = sanitize(html);
    match mode {
        SanitizeMode::Pattern => cleaned,
        SanitizeMode::Strict => {
            let strict = STRICT_SANITIZER.clean(&cleaned).to_string();
            debug!(
                target = "article_render::sanitize",
                before = cleaned.len(),
                after = strict.len(),
                "strict sanitizer applied"
            );
            strict
        }
    }
}
