//! Block extraction: sanitized HTML in, a flat ordered list of typed blocks out.
//!
//! The parsed fragment lives in an arena (`ego_tree`) and is walked depth
//! first with an explicit stack, so hostile nesting cannot exhaust the call
//! stack. Extraction never fails; anomalies are logged and whatever was found
//! so far is returned.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::domain::blocks::{Block, BlockKind, HeadingLevel};

use super::config::SanitizeMode;
use super::escape::escape_html;
use super::markdown::{is_markdown, markdown_to_html};
use super::sanitize::sanitize_with_mode;

/// Deepest container nesting the walker follows before giving up.
pub const MAX_DEPTH: usize = 256;

const CONTAINER_TAGS: [&str; 5] = ["div", "section", "article", "main", "figure"];
const INLINE_TAGS: [&str; 26] = [
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "i", "ins",
    "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "u",
];

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-(\w+)").expect("valid language class pattern"));
static CODE: Lazy<Selector> = Lazy::new(|| Selector::parse("code").expect("valid code selector"));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid img selector"));
static TABLE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid tr selector"));

/// Extract blocks from Markdown or HTML content using the default sanitizer.
pub fn extract_blocks(content: &str) -> Vec<Block> {
    extract_blocks_with_mode(content, SanitizeMode::default())
}

pub fn extract_blocks_with_mode(content: &str, mode: SanitizeMode) -> Vec<Block> {
    if content.trim().is_empty() {
        debug!(
            target = "article_render::extract",
            "blank content produced no blocks"
        );
        return Vec::new();
    }

    if is_markdown(content) {
        debug!(
            target = "article_render::extract",
            "markdown detected, normalizing to html"
        );
        let html = markdown_to_html(content);
        extract_blocks_from_html_with_mode(&html, mode)
    } else {
        extract_blocks_from_html_with_mode(content, mode)
    }
}

/// Extract blocks from HTML using the default sanitizer.
pub fn extract_blocks_from_html(html: &str) -> Vec<Block> {
    extract_blocks_from_html_with_mode(html, SanitizeMode::default())
}

pub fn extract_blocks_from_html_with_mode(html: &str, mode: SanitizeMode) -> Vec<Block> {
    let sanitized = sanitize_with_mode(html, mode);
    let fragment = Html::parse_fragment(&sanitized);
    let blocks = BlockWalker::new(MAX_DEPTH).walk(fragment.root_element());

    debug!(
        target = "article_render::extract",
        blocks = blocks.len(),
        sanitize_mode = %mode,
        "blocks extracted"
    );
    blocks
}

enum NodeClass<'a> {
    Inline,
    Container,
    Block(ElementRef<'a>),
    Ignored,
    Skip,
}

fn classify(node: NodeRef<'_, Node>) -> NodeClass<'_> {
    match node.value() {
        Node::Text(_) => NodeClass::Inline,
        Node::Element(element) => {
            let name = element.name();
            if CONTAINER_TAGS.contains(&name) {
                NodeClass::Container
            } else if INLINE_TAGS.contains(&name) {
                NodeClass::Inline
            } else if is_block_tag(name)
                && let Some(element) = ElementRef::wrap(node)
            {
                NodeClass::Block(element)
            } else {
                NodeClass::Ignored
            }
        }
        _ => NodeClass::Skip,
    }
}

fn is_block_tag(name: &str) -> bool {
    matches!(
        name,
        "h1" | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "p"
            | "ul"
            | "ol"
            | "blockquote"
            | "table"
            | "img"
            | "pre"
            | "hr"
    )
}

/// Children of one container still waiting to be visited, plus the run of
/// loose inline content collected since the last block.
struct Frame<'a> {
    children: Vec<NodeRef<'a, Node>>,
    cursor: usize,
    depth: usize,
    inline_run: Vec<NodeRef<'a, Node>>,
}

impl<'a> Frame<'a> {
    fn new(parent: NodeRef<'a, Node>, depth: usize) -> Self {
        Self {
            children: parent.children().collect(),
            cursor: 0,
            depth,
            inline_run: Vec::new(),
        }
    }
}

struct BlockWalker {
    blocks: Vec<Block>,
    next_index: usize,
    max_depth: usize,
}

impl BlockWalker {
    fn new(max_depth: usize) -> Self {
        Self {
            blocks: Vec::new(),
            next_index: 0,
            max_depth,
        }
    }

    fn walk(mut self, root: ElementRef<'_>) -> Vec<Block> {
        let mut stack = vec![Frame::new(*root, 0)];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = frame.children.get(frame.cursor).copied() else {
                if let Some(finished) = stack.pop() {
                    self.flush_inline(finished.inline_run);
                }
                continue;
            };
            frame.cursor += 1;
            let depth = frame.depth;

            match classify(node) {
                NodeClass::Inline => frame.inline_run.push(node),
                NodeClass::Skip => {}
                NodeClass::Ignored => {
                    let run = std::mem::take(&mut frame.inline_run);
                    self.flush_inline(run);
                }
                NodeClass::Block(element) => {
                    let run = std::mem::take(&mut frame.inline_run);
                    self.flush_inline(run);
                    self.extract_element(element);
                }
                NodeClass::Container => {
                    let run = std::mem::take(&mut frame.inline_run);
                    self.flush_inline(run);
                    if depth + 1 > self.max_depth {
                        warn!(
                            target = "article_render::extract",
                            max_depth = self.max_depth,
                            blocks = self.blocks.len(),
                            "nesting too deep, returning partial extraction"
                        );
                        return self.blocks;
                    }
                    stack.push(Frame::new(node, depth + 1));
                }
            }
        }

        self.blocks
    }

    fn push(&mut self, kind: BlockKind, html: String) {
        let id = format!("{}-{}", kind.block_type(), self.next_index);
        self.next_index += 1;
        self.blocks.push(Block { id, html, kind });
    }

    fn extract_element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.extract_heading(element, name),
            "p" => self.extract_paragraph(element),
            "ul" | "ol" => self.extract_list(element, name == "ol"),
            "blockquote" => {
                let text = element_text(element);
                if !text.is_empty() {
                    self.push(BlockKind::Quote { text }, element.html());
                }
            }
            "table" => self.extract_table(element),
            "img" => self.extract_image(element),
            "pre" => self.extract_code(element),
            "hr" => self.push(BlockKind::Hr, element.html()),
            _ => {}
        }
    }

    fn extract_heading(&mut self, element: ElementRef<'_>, name: &str) {
        let text = element_text(element);
        if text.is_empty() {
            return;
        }
        let depth = name[1..].parse::<u8>().unwrap_or(HeadingLevel::MAX);
        let level = HeadingLevel::clamped(depth);
        self.push(BlockKind::Heading { level, text }, element.html());
    }

    fn extract_paragraph(&mut self, element: ElementRef<'_>) {
        let text = element_text(element);
        if text.is_empty() {
            for image in element.select(&IMAGE) {
                self.extract_image(image);
            }
            return;
        }
        self.push(BlockKind::Paragraph { text }, element.html());
    }

    /// Loose text and inline elements between blocks form one paragraph.
    fn flush_inline(&mut self, run: Vec<NodeRef<'_, Node>>) {
        if run.is_empty() {
            return;
        }

        let raw: String = run.iter().map(|node| node_text(*node)).collect();
        let text = normalize_whitespace(&raw);
        if text.is_empty() {
            let images: Vec<ElementRef<'_>> = run
                .iter()
                .flat_map(|node| node.descendants())
                .filter_map(ElementRef::wrap)
                .filter(|element| element.value().name() == "img")
                .collect();
            for image in images {
                self.extract_image(image);
            }
            return;
        }

        let mut html = String::from("<p>");
        for node in &run {
            match node.value() {
                Node::Text(text) => html.push_str(&escape_html(text)),
                _ => {
                    if let Some(element) = ElementRef::wrap(*node) {
                        html.push_str(&element.html());
                    }
                }
            }
        }
        html.push_str("</p>");
        self.push(BlockKind::Paragraph { text }, html);
    }

    fn extract_list(&mut self, element: ElementRef<'_>, ordered: bool) {
        let items: Vec<String> = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
            .map(element_text)
            .filter(|item| !item.is_empty())
            .collect();

        if items.is_empty() {
            return;
        }
        self.push(BlockKind::List { ordered, items }, element.html());
    }

    fn extract_table(&mut self, table: ElementRef<'_>) {
        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for (position, row) in table.select(&TABLE_ROW).enumerate() {
            let in_head = row
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| parent.value().name() == "thead");
            let cells: Vec<(bool, String)> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "th" | "td"))
                .map(|cell| (cell.value().name() == "th", element_text(cell)))
                .collect();

            let all_header_cells = !cells.is_empty() && cells.iter().all(|(is_th, _)| *is_th);
            if in_head || (position == 0 && all_header_cells) {
                if headers.is_empty() {
                    headers = cells.into_iter().map(|(_, text)| text).collect();
                }
                continue;
            }

            if cells.iter().all(|(_, text)| text.is_empty()) {
                continue;
            }
            rows.push(cells.into_iter().map(|(_, text)| text).collect());
        }

        if headers.is_empty() && rows.is_empty() {
            debug!(target = "article_render::extract", "empty table skipped");
            return;
        }
        self.push(BlockKind::Table { headers, rows }, table.html());
    }

    fn extract_image(&mut self, element: ElementRef<'_>) {
        let src = element.value().attr("src").unwrap_or_default().trim();
        let alt = normalize_whitespace(element.value().attr("alt").unwrap_or_default());
        if src.is_empty() && alt.is_empty() {
            debug!(target = "article_render::extract", "empty image skipped");
            return;
        }
        self.push(
            BlockKind::Image {
                src: src.to_string(),
                alt,
            },
            element.html(),
        );
    }

    fn extract_code(&mut self, pre: ElementRef<'_>) {
        let code_element = pre.select(&CODE).next();
        let source = code_element.unwrap_or(pre);
        let raw: String = source.text().collect();
        let code = raw.trim_matches(|ch| ch == '\n' || ch == '\r').to_string();
        if code.trim().is_empty() {
            return;
        }

        let language = code_element
            .and_then(|element| element.value().attr("class"))
            .or_else(|| pre.value().attr("class"))
            .and_then(|class| LANGUAGE_CLASS.captures(class))
            .map(|captures| captures[1].to_string());

        self.push(BlockKind::Code { language, code }, pre.html());
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn node_text(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => String::from(&**text),
        _ => ElementRef::wrap(node)
            .map(|element| element.text().collect())
            .unwrap_or_default(),
    }
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
