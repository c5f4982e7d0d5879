//! Rebuild paragraph inline formatting from a block's markup snapshot.
//!
//! Only a handful of phrasing elements survive; everything else is flattened
//! to its text. Text is always escaped on the way out.

use ego_tree::iter::Edge;
use scraper::{Html, Node, node::Element};

use super::escape::escape_html;

/// Inline HTML for `snapshot`, or the escaped `fallback_text` when the
/// snapshot yields nothing.
pub fn rebuild_inline(snapshot: &str, fallback_text: &str) -> String {
    let fragment = Html::parse_fragment(snapshot);
    let mut writer = InlineWriter::default();

    for edge in fragment.root_element().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) => writer.text(text),
                Node::Element(element) => writer.open(element),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    writer.close(element);
                }
            }
        }
    }

    let rebuilt = writer.finish();
    if rebuilt.is_empty() {
        escape_html(fallback_text)
    } else {
        rebuilt
    }
}

#[derive(Default)]
struct InlineWriter {
    out: String,
    pending_space: bool,
}

impl InlineWriter {
    fn text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        for word in text.split_whitespace() {
            self.flush_space();
            self.out.push_str(&escape_html(word));
            self.pending_space = true;
        }
        self.pending_space = text.ends_with(char::is_whitespace)
            || (self.pending_space && text.trim().is_empty());
    }

    fn open(&mut self, element: &Element) {
        match element.name() {
            "br" => {
                self.out.push_str("<br>");
                self.pending_space = false;
            }
            "strong" | "b" => self.open_tag("<strong>"),
            "em" | "i" => self.open_tag("<em>"),
            "code" => self.open_tag("<code>"),
            "a" => {
                if let Some(href) = allowed_href(element) {
                    let tag = format!("<a href=\"{}\">", escape_html(href));
                    self.open_tag(&tag);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, element: &Element) {
        let tag = match element.name() {
            "strong" | "b" => "</strong>",
            "em" | "i" => "</em>",
            "code" => "</code>",
            "a" if allowed_href(element).is_some() => "</a>",
            _ => return,
        };
        self.out.push_str(tag);
    }

    fn open_tag(&mut self, tag: &str) {
        self.flush_space();
        self.out.push_str(tag);
    }

    fn flush_space(&mut self) {
        if self.pending_space && !self.out.is_empty() && !self.out.ends_with("<br>") {
            self.out.push(' ');
        }
        self.pending_space = false;
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}

fn allowed_href(element: &Element) -> Option<&str> {
    let href = element.attr("href")?.trim();
    is_safe_href(href).then_some(href)
}

/// `http(s)`, `mailto`, fragment and relative references pass.
pub(crate) fn is_safe_href(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    let Some(colon) = href.find(':') else {
        return true;
    };
    if href[..colon].contains(['/', '?', '#']) {
        return true;
    }
    matches!(
        href[..colon].to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    #[test]
    fn keeps_allowed_formatting() {
        assert_snapshot!(
            rebuild_inline("<p>Hello <b>bold</b> and <i>it</i> with <code>x&lt;y</code></p>", ""),
            @"Hello <strong>bold</strong> and <em>it</em> with <code>x&lt;y</code>"
        );
    }

    #[test]
    fn flattens_other_elements_and_collapses_whitespace() {
        assert_snapshot!(
            rebuild_inline("<p>  A <span class=\"x\">span</span>\n <u>under</u>  </p>", ""),
            @"A span under"
        );
    }

    #[test]
    fn drops_unsafe_links_but_keeps_text() {
        assert_snapshot!(
            rebuild_inline(r#"<p><a href="vbscript:msgbox">click</a> or <a href="https://e.com/?a=1&amp;b=2">here</a></p>"#, ""),
            @r#"click or <a href="https://e.com/?a=1&amp;b=2">here</a>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(rebuild_inline("<p>1 &lt; 2 &amp; \"q\"</p>", ""), "1 &lt; 2 &amp; &quot;q&quot;");
    }

    #[test]
    fn line_breaks_survive() {
        assert_eq!(rebuild_inline("<p>one<br>two</p>", ""), "one<br>two");
    }

    #[test]
    fn empty_snapshot_uses_escaped_fallback() {
        assert_eq!(rebuild_inline("", "Tom & Jerry"), "Tom &amp; Jerry");
    }

    #[rstest]
    #[case("https://example.com", true)]
    #[case("mailto:a@b.c", true)]
    #[case("#section", true)]
    #[case("/docs", true)]
    #[case("../up", true)]
    #[case("page?x=a:b", true)]
    #[case("JavaScript:alert(1)", false)]
    #[case("data:text/html,x", false)]
    #[case("", false)]
    fn href_allow_list(#[case] href: &str, #[case] allowed: bool) {
        assert_eq!(is_safe_href(href), allowed);
    }
}
