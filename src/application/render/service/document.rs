//! Standalone HTML document assembly.

use crate::domain::recipe::Theme;

use super::escape::escape_html;
use super::theme::theme_style;

const ARTICLE_CSS: &str = include_str!("../../../../static/article.css");

/// Inputs for a complete document around a rendered fragment.
#[derive(Debug, Clone)]
pub struct HtmlDocument<'a> {
    pub title: &'a str,
    pub meta_description: Option<&'a str>,
    pub theme: Theme,
    pub body_html: &'a str,
    pub lang: &'a str,
}

pub fn generate_html_document(document: &HtmlDocument<'_>) -> String {
    let title = escape_html(document.title);
    let mut head = vec![
        "<meta charset=\"UTF-8\">".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
        format!("<title>{title}</title>"),
        format!("<meta property=\"og:title\" content=\"{title}\">"),
        "<meta property=\"og:type\" content=\"article\">".to_string(),
        format!("<meta name=\"twitter:title\" content=\"{title}\">"),
    ];

    if let Some(description) = document
        .meta_description
        .map(str::trim)
        .filter(|description| !description.is_empty())
    {
        let description = escape_html(description);
        head.push(format!(
            "<meta name=\"description\" content=\"{description}\">"
        ));
        head.push(format!(
            "<meta property=\"og:description\" content=\"{description}\">"
        ));
        head.push(format!(
            "<meta name=\"twitter:description\" content=\"{description}\">"
        ));
    }

    head.push(format!(
        "<style>\n{}\n{}</style>",
        theme_style(document.theme).root_block(),
        ARTICLE_CSS
    ));

    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n",
        escape_html(document.lang)
    );
    for line in head {
        html.push_str(&line);
        html.push('\n');
    }
    html.push_str("</head>\n<body>\n<article class=\"article-container\">\n");
    html.push_str(document.body_html);
    html.push_str("\n</article>\n</body>\n</html>\n");
    html
}
