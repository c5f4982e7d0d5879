//! Heuristic Markdown detection and a deliberately small Markdown subset.
//!
//! The converter is line oriented and runs in a single pass. It covers what
//! generated articles actually contain: ATX headings, paragraphs, flat lists,
//! blockquotes, fenced code, pipe tables, rules and a handful of inline forms.
//! Nested lists, mixed list items and multi-paragraph items are passed through
//! as literal paragraph text. A CommonMark engine such as `comrak` would
//! nest those lists and merge the items, so it is not used here.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::escape::escape_html;

static MARKDOWN_HINTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^#{1,6}\s",
        r"\*\*[^*]+\*\*",
        r"\[[^\]]+\]\([^)]+\)",
        r"(?m)^[-*+]\s",
        r"(?m)^\d+\.\s",
        r"(?m)^>\s",
        r"(?s)```.*?```",
        r"(?m)^[ \t]*\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)+\|?[ \t]*$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid markdown hint pattern"))
    .collect()
});

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,4})\s+(.+?)\s*#*\s*$").expect("valid heading pattern"));
static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+(.+)$").expect("valid unordered item pattern"));
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("valid ordered item pattern"));
static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})\s*$").expect("valid rule pattern"));
static TABLE_DIVIDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\|\s*:?-+:?\s*)+\|?\s*$|^\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)+\|?\s*$")
        .expect("valid table divider pattern")
});
static RAW_HTML_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<[A-Za-z/!]").expect("valid raw html pattern"));

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code pattern"));
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).expect("valid image pattern")
});
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).expect("valid link pattern")
});
static BOLD_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*([^*]+)\*\*\*").expect("valid bold italic pattern"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold pattern"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic pattern"));

const PLACEHOLDER_MARK: char = '\u{1A}';

/// Cheap detection of Markdown syntax. False positives are tolerated: plain
/// text converted as Markdown still ends up as paragraphs.
pub fn is_markdown(text: &str) -> bool {
    MARKDOWN_HINTS.iter().any(|pattern| pattern.is_match(text))
}

/// Convert the supported Markdown subset to HTML.
pub fn markdown_to_html(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let mut writer = HtmlWriter::default();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let trimmed = line.trim_start();

        if let Some(info) = trimmed.strip_prefix("```") {
            writer.close_blocks();
            let language = fence_language(info);
            let mut body = Vec::new();
            index += 1;
            while index < lines.len() && !lines[index].trim_start().starts_with("```") {
                body.push(lines[index]);
                index += 1;
            }
            // Skip the closing fence; an unterminated fence runs to the end.
            index += 1;
            writer.push_code(language.as_deref(), &body.join("\n"));
            continue;
        }

        if trimmed.is_empty() {
            writer.close_blocks();
            index += 1;
            continue;
        }

        if let Some(quoted) = line.strip_prefix('>') {
            writer.close_list();
            writer.quote.push(inline(quoted.trim()));
            index += 1;
            continue;
        }
        writer.close_quote();

        if HORIZONTAL_RULE.is_match(line) {
            writer.close_list();
            writer.out.push("<hr>".to_string());
            index += 1;
            continue;
        }

        if let Some(captures) = HEADING.captures(line) {
            writer.close_list();
            let level = captures[1].len();
            writer
                .out
                .push(format!("<h{level}>{}</h{level}>", inline(&captures[2])));
            index += 1;
            continue;
        }

        if line.contains('|')
            && lines
                .get(index + 1)
                .is_some_and(|next| TABLE_DIVIDER.is_match(next))
        {
            writer.close_list();
            let headers = split_table_row(line);
            index += 2;
            let mut rows = Vec::new();
            while index < lines.len() && is_table_row(lines[index]) {
                rows.push(split_table_row(lines[index]));
                index += 1;
            }
            writer.push_table(&headers, &rows);
            continue;
        }

        if let Some(captures) = UNORDERED_ITEM.captures(line) {
            writer.push_item(ListKind::Unordered, &captures[1]);
            index += 1;
            continue;
        }

        if let Some(captures) = ORDERED_ITEM.captures(line) {
            writer.push_item(ListKind::Ordered, &captures[1]);
            index += 1;
            continue;
        }

        writer.close_list();
        if RAW_HTML_LINE.is_match(trimmed) {
            writer.out.push(line.to_string());
        } else {
            writer.out.push(format!("<p>{}</p>", inline(trimmed)));
        }
        index += 1;
    }

    writer.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Default)]
struct HtmlWriter {
    out: Vec<String>,
    list: Option<ListKind>,
    quote: Vec<String>,
}

impl HtmlWriter {
    fn push_item(&mut self, kind: ListKind, item: &str) {
        self.close_quote();
        if self.list != Some(kind) {
            self.close_list();
            self.out.push(format!("<{}>", kind.tag()));
            self.list = Some(kind);
        }
        self.out.push(format!("<li>{}</li>", inline(item)));
    }

    fn push_code(&mut self, language: Option<&str>, code: &str) {
        let class = language
            .map(|lang| format!(r#" class="language-{}""#, escape_html(lang)))
            .unwrap_or_default();
        self.out
            .push(format!("<pre><code{class}>{}</code></pre>", escape_html(code)));
    }

    fn push_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let mut html = String::from("<table><thead><tr>");
        for header in headers {
            html.push_str(&format!("<th>{}</th>", inline(header)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", inline(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        self.out.push(html);
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.out.push(format!("</{}>", kind.tag()));
        }
    }

    fn close_quote(&mut self) {
        if self.quote.is_empty() {
            return;
        }
        let lines: Vec<String> = self
            .quote
            .drain(..)
            .filter(|line| !line.is_empty())
            .collect();
        if !lines.is_empty() {
            self.out
                .push(format!("<blockquote>{}</blockquote>", lines.join("\n")));
        }
    }

    fn close_blocks(&mut self) {
        self.close_list();
        self.close_quote();
    }

    fn finish(mut self) -> String {
        self.close_blocks();
        self.out.join("\n")
    }
}

fn fence_language(info: &str) -> Option<String> {
    let token = info.split_whitespace().next()?;
    token
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '+'))
        .then(|| token.to_string())
}

fn is_table_row(line: &str) -> bool {
    !line.trim().is_empty() && line.contains('|')
}

fn split_table_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Inline transforms for one line of text. Code spans, images and link
/// targets are stashed behind placeholders so the emphasis rules never touch
/// them.
fn inline(text: &str) -> String {
    let mut stash: Vec<String> = Vec::new();
    let text: String = text.chars().filter(|ch| *ch != PLACEHOLDER_MARK).collect();

    let text = INLINE_CODE.replace_all(&text, |caps: &Captures<'_>| {
        stash_fragment(&mut stash, format!("<code>{}</code>", escape_html(&caps[1])))
    });
    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        stash_fragment(
            &mut stash,
            format!(
                r#"<img src="{}" alt="{}">"#,
                escape_html(&caps[2]),
                escape_html(&caps[1])
            ),
        )
    });
    let text = LINK.replace_all(&text, |caps: &Captures<'_>| {
        let href = stash_fragment(&mut stash, escape_html(&caps[2]));
        format!(r#"<a href="{href}">{}</a>"#, &caps[1])
    });
    let text = BOLD_ITALIC.replace_all(&text, "<strong><em>$1</em></strong>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");

    let mut html = text.into_owned();
    for (position, fragment) in stash.iter().enumerate() {
        html = html.replace(&placeholder(position), fragment);
    }
    html
}

fn stash_fragment(stash: &mut Vec<String>, fragment: String) -> String {
    let token = placeholder(stash.len());
    stash.push(fragment);
    token
}

fn placeholder(position: usize) -> String {
    format!("{PLACEHOLDER_MARK}{position}{PLACEHOLDER_MARK}")
}
