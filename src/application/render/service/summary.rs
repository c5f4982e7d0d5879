//! Compact block previews handed to the layout generator as context.

use serde::Serialize;

use crate::domain::blocks::{Block, BlockKind, BlockType};

const LIST_ITEM_LIMIT: usize = 12;
const LIST_ITEM_MAX_LENGTH: usize = 80;
const TABLE_SAMPLE_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(flatten)]
    pub detail: SummaryDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummaryDetail {
    Heading {
        level: u8,
        text: String,
    },
    Text {
        preview: String,
    },
    List {
        ordered: bool,
        #[serde(rename = "itemCount")]
        item_count: usize,
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        #[serde(rename = "rowCount")]
        row_count: usize,
        #[serde(rename = "sampleRows")]
        sample_rows: Vec<Vec<String>>,
    },
    Image {
        alt: String,
    },
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        #[serde(rename = "lineCount")]
        line_count: usize,
    },
    Rule {},
}

/// Lossy preview of `blocks`; paragraph and quote text is cut to
/// `max_text_length` characters.
pub fn summarize_blocks_for_llm(blocks: &[Block], max_text_length: usize) -> Vec<BlockSummary> {
    blocks
        .iter()
        .map(|block| BlockSummary {
            id: block.id.clone(),
            block_type: block.block_type(),
            detail: summarize_kind(&block.kind, max_text_length),
        })
        .collect()
}

fn summarize_kind(kind: &BlockKind, max_text_length: usize) -> SummaryDetail {
    match kind {
        BlockKind::Heading { level, text } => SummaryDetail::Heading {
            level: level.get(),
            text: text.clone(),
        },
        BlockKind::Paragraph { text } | BlockKind::Quote { text } => SummaryDetail::Text {
            preview: truncate(text, max_text_length),
        },
        BlockKind::List { ordered, items } => SummaryDetail::List {
            ordered: *ordered,
            item_count: items.len(),
            items: items
                .iter()
                .take(LIST_ITEM_LIMIT)
                .map(|item| truncate(item, LIST_ITEM_MAX_LENGTH))
                .collect(),
        },
        BlockKind::Table { headers, rows } => SummaryDetail::Table {
            headers: headers.clone(),
            row_count: rows.len(),
            sample_rows: rows.iter().take(TABLE_SAMPLE_ROWS).cloned().collect(),
        },
        BlockKind::Image { alt, .. } => SummaryDetail::Image { alt: alt.clone() },
        BlockKind::Code { language, code } => SummaryDetail::Code {
            language: language.clone(),
            line_count: code.lines().count(),
        },
        BlockKind::Hr => SummaryDetail::Rule {},
    }
}

/// Cut to `max` characters, appending `...` when anything was removed.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
