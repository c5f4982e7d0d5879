//! Typed intermediate representation of article content.
//!
//! Blocks are produced fresh on every extraction pass and are never persisted
//! on their own. Ids are unique within one extraction result only.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heading depth accepted by the block model (`h1`..`h4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("heading level must be between 1 and 4, got {0}")]
pub struct InvalidHeadingLevel(pub u8);

impl HeadingLevel {
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> Result<Self, InvalidHeadingLevel> {
        if (1..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidHeadingLevel(level))
        }
    }

    /// Map any HTML heading depth onto the supported range; `h5`/`h6` collapse to 4.
    pub fn clamped(level: u8) -> Self {
        Self(level.clamp(1, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest structural unit of extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    /// Literal markup the block was derived from.
    pub html: String,
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Quote {
        text: String,
    },
    Image {
        src: String,
        alt: String,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    Hr,
}

/// Discriminant of a [`BlockKind`], used for id prefixes and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Paragraph,
    List,
    Table,
    Quote,
    Image,
    Code,
    Hr,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::List => "list",
            BlockType::Table => "table",
            BlockType::Quote => "quote",
            BlockType::Image => "image",
            BlockType::Code => "code",
            BlockType::Hr => "hr",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Paragraph { .. } => BlockType::Paragraph,
            BlockKind::List { .. } => BlockType::List,
            BlockKind::Table { .. } => BlockType::Table,
            BlockKind::Quote { .. } => BlockType::Quote,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Code { .. } => BlockType::Code,
            BlockKind::Hr => BlockType::Hr,
        }
    }
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Flattened human-readable text of the block. Lists and table rows are
    /// joined with `"; "`, images contribute their alt text.
    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::Heading { text, .. }
            | BlockKind::Paragraph { text }
            | BlockKind::Quote { text } => text.clone(),
            BlockKind::List { items, .. } => items.join("; "),
            BlockKind::Table { headers, rows } => std::iter::once(headers)
                .chain(rows.iter())
                .filter(|row| !row.is_empty())
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("; "),
            BlockKind::Image { alt, .. } => alt.clone(),
            BlockKind::Code { code, .. } => code.clone(),
            BlockKind::Hr => String::new(),
        }
    }

    /// Heading level and text, when this block is a heading.
    pub fn as_heading(&self) -> Option<(HeadingLevel, &str)> {
        match &self.kind {
            BlockKind::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_rejects_out_of_range() {
        assert!(HeadingLevel::new(0).is_err());
        assert!(HeadingLevel::new(5).is_err());
        assert_eq!(HeadingLevel::new(3).map(HeadingLevel::get), Ok(3));
        assert_eq!(HeadingLevel::clamped(6).get(), 4);
    }

    #[test]
    fn block_serializes_flat_with_type_tag() {
        let block = Block {
            id: "heading-0".into(),
            html: "<h2>Intro</h2>".into(),
            kind: BlockKind::Heading {
                level: HeadingLevel::clamped(2),
                text: "Intro".into(),
            },
        };

        let value = serde_json::to_value(&block).expect("serialize");
        assert_eq!(value["type"], "heading");
        assert_eq!(value["level"], 2);
        assert_eq!(value["id"], "heading-0");

        let back: Block = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, block);
    }

    #[test]
    fn hr_block_round_trips_without_payload() {
        let json = serde_json::json!({ "id": "hr-3", "type": "hr", "html": "<hr>" });
        let block: Block = serde_json::from_value(json).expect("deserialize");
        assert_eq!(block.block_type(), BlockType::Hr);
        assert!(block.plain_text().is_empty());
    }

    #[test]
    fn plain_text_flattens_tables() {
        let block = Block {
            id: "table-1".into(),
            html: String::new(),
            kind: BlockKind::Table {
                headers: vec!["A".into(), "B".into()],
                rows: vec![vec!["1".into(), "2".into()]],
            },
        };
        assert_eq!(block.plain_text(), "A | B; 1 | 2");
    }
}
