//! Markup for individual placements.

use crate::domain::blocks::{Block, BlockKind, HeadingLevel};
use crate::domain::recipe::{Component, ContrastPairItem, ContrastVariant, LayoutItem};
use crate::domain::slug::heading_anchor;

use super::escape::escape_html;
use super::inline::rebuild_inline;
use super::layout::Placement;
use super::theme::ThemeClasses;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderVariant {
    Badge,
    Underline,
    Minimal,
}

impl HeaderVariant {
    fn parse(variant: &str) -> Self {
        match variant {
            "badge" => Self::Badge,
            "underline" => Self::Underline,
            _ => Self::Minimal,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Badge => "badge",
            Self::Underline => "underline",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphVariant {
    Normal,
    Lead,
    Compact,
}

impl ParagraphVariant {
    fn parse(variant: &str) -> Self {
        match variant {
            "lead" => Self::Lead,
            "compact" => Self::Compact,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListVariant {
    Checklist,
    Steps,
    Cards,
    Plain,
}

impl ListVariant {
    fn parse(variant: &str) -> Self {
        match variant {
            "checklist" => Self::Checklist,
            "steps" => Self::Steps,
            "cards" => Self::Cards,
            _ => Self::Plain,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Checklist => "list-checklist",
            Self::Steps => "list-steps",
            Self::Cards => "list-cards",
            Self::Plain => "list-plain",
        }
    }
}

fn table_class(variant: &str) -> &'static str {
    match variant {
        "comparisonSticky" => "table-comparison",
        "plain" => "table-plain",
        _ => "table-zebra",
    }
}

fn callout_variant(variant: &str) -> &'static str {
    match variant {
        "tip" => "tip",
        "warning" => "warning",
        _ => "info",
    }
}

/// Stateful per-render component writer; tracks whether the lead paragraph
/// has been emitted.
pub(crate) struct ComponentRenderer<'a> {
    classes: &'static ThemeClasses,
    takeaways_title: &'a str,
    lead_used: bool,
}

impl<'a> ComponentRenderer<'a> {
    pub(crate) fn new(classes: &'static ThemeClasses, takeaways_title: &'a str) -> Self {
        Self {
            classes,
            takeaways_title,
            lead_used: false,
        }
    }

    pub(crate) fn render(&mut self, placement: &Placement<'_>) -> String {
        match placement {
            Placement::Single { block, item } => self.single(block, *item),
            Placement::Pair { left, right, item } => self.contrast_pair(left, right, item),
        }
    }

    fn single(&mut self, block: &Block, item: Option<&LayoutItem>) -> String {
        match &block.kind {
            BlockKind::Code { language, code } => return self.code(language.as_deref(), code),
            BlockKind::Hr => return format!("<hr class=\"{}\">", self.classes.hr),
            _ => {}
        }

        let Some(item) = item else {
            return self.default_component(block);
        };
        let variant = item.variant.as_str();

        match (item.component, &block.kind) {
            (Component::SectionHeader, BlockKind::Heading { level, text }) => {
                self.section_header(block, *level, text, HeaderVariant::parse(variant))
            }
            (Component::Paragraph, BlockKind::Paragraph { text }) => {
                self.paragraph(block, text, ParagraphVariant::parse(variant))
            }
            (Component::List, BlockKind::List { ordered, items }) => {
                self.list(*ordered, items, ListVariant::parse(variant))
            }
            (Component::Table, BlockKind::Table { headers, rows }) => {
                self.table(headers, rows, table_class(variant))
            }
            (Component::Quote, BlockKind::Paragraph { text } | BlockKind::Quote { text }) => {
                self.quote(text)
            }
            (Component::Image, BlockKind::Image { src, alt }) => self.image(src, alt),
            (Component::Callout, BlockKind::Paragraph { .. } | BlockKind::Quote { .. }) => {
                self.callout(block, callout_variant(variant))
            }
            (Component::Takeaways, BlockKind::List { items, .. }) => {
                self.takeaways(items, variant == "cards")
            }
            _ => generic(block),
        }
    }

    fn default_component(&mut self, block: &Block) -> String {
        match &block.kind {
            BlockKind::Heading { level, text } => {
                self.section_header(block, *level, text, HeaderVariant::Minimal)
            }
            BlockKind::Paragraph { text } => {
                let variant = if self.lead_used {
                    ParagraphVariant::Normal
                } else {
                    self.lead_used = true;
                    ParagraphVariant::Lead
                };
                self.paragraph(block, text, variant)
            }
            BlockKind::List { ordered, items } => self.list(*ordered, items, ListVariant::Plain),
            BlockKind::Table { headers, rows } => self.table(headers, rows, "table-zebra"),
            BlockKind::Quote { text } => self.quote(text),
            BlockKind::Image { src, alt } => self.image(src, alt),
            BlockKind::Code { language, code } => self.code(language.as_deref(), code),
            BlockKind::Hr => format!("<hr class=\"{}\">", self.classes.hr),
        }
    }

    fn section_header(
        &self,
        block: &Block,
        level: HeadingLevel,
        text: &str,
        variant: HeaderVariant,
    ) -> String {
        let class = match level.get() {
            1 => self.classes.heading,
            2 => self.classes.heading2,
            _ => self.classes.heading3,
        };
        let anchor = heading_anchor(text, &block.id);
        format!(
            "<div class=\"section-header {variant}\"><h{level} id=\"{anchor}\" class=\"{class}\">{text}</h{level}></div>",
            variant = variant.class(),
            anchor = escape_html(&anchor),
            text = escape_html(text),
        )
    }

    fn paragraph(&self, block: &Block, text: &str, variant: ParagraphVariant) -> String {
        let class = match variant {
            ParagraphVariant::Normal => self.classes.paragraph.to_string(),
            ParagraphVariant::Lead => format!("{} lead", self.classes.lead),
            ParagraphVariant::Compact => format!("{} compact", self.classes.paragraph),
        };
        format!(
            "<p class=\"{class}\">{}</p>",
            rebuild_inline(&block.html, text)
        )
    }

    fn list(&self, ordered: bool, items: &[String], variant: ListVariant) -> String {
        let tag = match variant {
            ListVariant::Steps => "ol",
            ListVariant::Checklist | ListVariant::Cards => "ul",
            ListVariant::Plain if ordered => "ol",
            ListVariant::Plain => "ul",
        };
        format!(
            "<div class=\"{}\"><{tag} class=\"{}\">{}</{tag}></div>",
            variant.class(),
            self.classes.list,
            list_items(items),
        )
    }

    fn table(&self, headers: &[String], rows: &[Vec<String>], variant_class: &str) -> String {
        let mut html = format!(
            "<div class=\"table-wrapper {variant_class}\"><table class=\"{}\">",
            self.classes.table
        );
        if !headers.is_empty() {
            html.push_str("<thead><tr>");
            for header in headers {
                html.push_str("<th>");
                html.push_str(&escape_html(header));
                html.push_str("</th>");
            }
            html.push_str("</tr></thead>");
        }
        html.push_str("<tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td>");
                html.push_str(&escape_html(cell));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
        html
    }

    fn quote(&self, text: &str) -> String {
        format!(
            "<blockquote class=\"{}\">{}</blockquote>",
            self.classes.quote,
            escape_html(text)
        )
    }

    fn image(&self, src: &str, alt: &str) -> String {
        let mut html = format!(
            "<figure><img src=\"{}\" alt=\"{}\" class=\"article-image {}\" loading=\"lazy\">",
            escape_html(safe_image_src(src)),
            escape_html(alt),
            self.classes.image,
        );
        if !alt.is_empty() {
            html.push_str(&format!(
                "<figcaption class=\"{}\">{}</figcaption>",
                self.classes.figcaption,
                escape_html(alt)
            ));
        }
        html.push_str("</figure>");
        html
    }

    fn code(&self, language: Option<&str>, code: &str) -> String {
        let code_class = language
            .map(|language| format!(" class=\"language-{}\"", escape_html(language)))
            .unwrap_or_default();
        format!(
            "<pre class=\"{}\"><code{code_class}>{}</code></pre>",
            self.classes.code,
            escape_html(code)
        )
    }

    fn callout(&self, block: &Block, variant: &str) -> String {
        let theme_class = match variant {
            "tip" => self.classes.callout_tip,
            "warning" => self.classes.callout_warning,
            _ => self.classes.callout_info,
        };
        format!(
            "<div class=\"callout callout-{variant} {theme_class}\"><p>{}</p></div>",
            side_body(block)
        )
    }

    fn takeaways(&self, items: &[String], cards: bool) -> String {
        let list = format!("<ul>{}</ul>", list_items(items));
        let body = if cards {
            format!("<div class=\"list-cards\">{list}</div>")
        } else {
            list
        };
        format!(
            "<div class=\"takeaways {}\"><h4>{}</h4>{body}</div>",
            self.classes.takeaways,
            escape_html(self.takeaways_title)
        )
    }

    fn contrast_pair(&self, left: &Block, right: &Block, item: &ContrastPairItem) -> String {
        let class = match item.variant {
            ContrastVariant::SplitCards => "contrast-pair",
            ContrastVariant::SplitMinimal => "contrast-pair contrast-pair-minimal",
        };
        format!(
            "<div class=\"{class}\">{}{}</div>",
            contrast_side("left", left, item.label_left.as_deref()),
            contrast_side("right", right, item.label_right.as_deref()),
        )
    }
}

fn contrast_side(side: &str, block: &Block, label: Option<&str>) -> String {
    let label = label
        .map(|label| format!("<div class=\"label\">{}</div>", escape_html(label)))
        .unwrap_or_default();
    format!(
        "<div class=\"side side-{side}\">{label}<p>{}</p></div>",
        side_body(block)
    )
}

/// Paragraphs keep their inline formatting; every other block contributes
/// its escaped plain text.
fn side_body(block: &Block) -> String {
    match &block.kind {
        BlockKind::Paragraph { text } => rebuild_inline(&block.html, text),
        _ => escape_html(&block.plain_text()),
    }
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

fn generic(block: &Block) -> String {
    format!(
        "<div class=\"block-generic\">{}</div>",
        escape_html(&block.plain_text())
    )
}

fn safe_image_src(src: &str) -> &str {
    let lowered = src.trim_start().to_ascii_lowercase();
    if ["javascript:", "data:", "vbscript:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        ""
    } else {
        src
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::service::theme::theme_classes;
    use crate::domain::recipe::Theme;
    use insta::assert_snapshot;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block {
            id: id.to_string(),
            html: String::new(),
            kind,
        }
    }

    fn renderer() -> ComponentRenderer<'static> {
        ComponentRenderer::new(theme_classes(Theme::MinimalClean), "Key takeaways")
    }

    fn with_item<'a>(block: &'a Block, item: &'a LayoutItem) -> Placement<'a> {
        Placement::Single {
            block,
            item: Some(item),
        }
    }

    fn layout_item(component: Component, variant: &str) -> LayoutItem {
        LayoutItem {
            block_id: String::new(),
            component,
            variant: variant.to_string(),
        }
    }

    #[test]
    fn only_first_default_paragraph_is_lead() {
        let first = block("paragraph-0", BlockKind::Paragraph { text: "One".into() });
        let second = block("paragraph-1", BlockKind::Paragraph { text: "Two".into() });
        let mut renderer = renderer();
        let one = renderer.render(&Placement::Single { block: &first, item: None });
        let two = renderer.render(&Placement::Single { block: &second, item: None });
        assert!(one.contains(" lead\">One</p>"));
        assert!(!two.contains(" lead\""));
    }

    #[test]
    fn heading_renders_section_header_with_anchor() {
        let heading = block(
            "heading-0",
            BlockKind::Heading {
                level: HeadingLevel::clamped(2),
                text: "Why <Rust>?".into(),
            },
        );
        let item = layout_item(Component::SectionHeader, "badge");
        assert_snapshot!(
            renderer().render(&with_item(&heading, &item)),
            @r#"<div class="section-header badge"><h2 id="why-rust" class="text-xl font-medium text-gray-800 mt-10 mb-3">Why &lt;Rust&gt;?</h2></div>"#
        );
    }

    #[test]
    fn steps_list_is_ordered() {
        let list = block(
            "list-0",
            BlockKind::List {
                ordered: false,
                items: vec!["a".into(), "b & c".into()],
            },
        );
        let item = layout_item(Component::List, "steps");
        assert_snapshot!(
            renderer().render(&with_item(&list, &item)),
            @r#"<div class="list-steps"><ol class="list-disc pl-5 space-y-1 mb-3"><li>a</li><li>b &amp; c</li></ol></div>"#
        );
    }

    #[test]
    fn table_without_headers_has_no_thead() {
        let table = block(
            "table-0",
            BlockKind::Table {
                headers: Vec::new(),
                rows: vec![vec!["1".into(), "2".into()]],
            },
        );
        let html = renderer().render(&Placement::Single { block: &table, item: None });
        assert!(html.starts_with("<div class=\"table-wrapper table-zebra\">"));
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<td>1</td><td>2</td>"));
    }

    #[test]
    fn mismatched_component_renders_generic_container() {
        let image = block(
            "image-0",
            BlockKind::Image {
                src: "/a.png".into(),
                alt: "<chart>".into(),
            },
        );
        let item = layout_item(Component::Table, "zebra");
        assert_eq!(
            renderer().render(&with_item(&image, &item)),
            "<div class=\"block-generic\">&lt;chart&gt;</div>"
        );
    }

    #[test]
    fn code_ignores_layout_component() {
        let code = block(
            "code-0",
            BlockKind::Code {
                language: Some("rust".into()),
                code: "a < b".into(),
            },
        );
        let item = layout_item(Component::Callout, "tip");
        assert_eq!(
            renderer().render(&with_item(&code, &item)),
            "<pre class=\"bg-gray-50 p-3 rounded font-mono text-sm\"><code class=\"language-rust\">a &lt; b</code></pre>"
        );
    }

    #[test]
    fn unsafe_image_source_is_dropped() {
        let image = block(
            "image-0",
            BlockKind::Image {
                src: "JavaScript:alert(1)".into(),
                alt: String::new(),
            },
        );
        let html = renderer().render(&Placement::Single { block: &image, item: None });
        assert!(html.contains("src=\"\""));
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn callout_wraps_paragraph_with_theme_class() {
        let paragraph = block("paragraph-0", BlockKind::Paragraph { text: "Heads up".into() });
        let item = layout_item(Component::Callout, "warning");
        assert_snapshot!(
            renderer().render(&with_item(&paragraph, &item)),
            @r#"<div class="callout callout-warning bg-yellow-50 border-l-2 border-yellow-400 p-3 my-4"><p>Heads up</p></div>"#
        );
    }

    #[test]
    fn takeaways_use_configured_title() {
        let list = block(
            "list-0",
            BlockKind::List {
                ordered: true,
                items: vec!["x".into()],
            },
        );
        let item = layout_item(Component::Takeaways, "cards");
        let html = ComponentRenderer::new(theme_classes(Theme::MinimalClean), "À retenir")
            .render(&with_item(&list, &item));
        assert!(html.contains("<h4>À retenir</h4><div class=\"list-cards\"><ul><li>x</li></ul></div>"));
    }

    #[test]
    fn contrast_pair_renders_labelled_sides() {
        let left = block("paragraph-0", BlockKind::Paragraph { text: "Before".into() });
        let right = block("quote-1", BlockKind::Quote { text: "After".into() });
        let item = ContrastPairItem {
            left_block_id: left.id.clone(),
            right_block_id: right.id.clone(),
            variant: ContrastVariant::SplitMinimal,
            label_left: Some("Old".into()),
            label_right: None,
        };
        assert_snapshot!(
            renderer().render(&Placement::Pair { left: &left, right: &right, item: &item }),
            @r#"<div class="contrast-pair contrast-pair-minimal"><div class="side side-left"><div class="label">Old</div><p>Before</p></div><div class="side side-right"><p>After</p></div></div>"#
        );
    }
}
