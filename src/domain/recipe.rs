//! Recipe: the theme and layout decisions applied by the renderer.
//!
//! Recipes usually come from a generative collaborator and are untrusted
//! until they pass `application::recipe::validate_recipe`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const RECIPE_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    EditorialBold,
    MinimalClean,
    TechNeon,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::EditorialBold, Theme::MinimalClean, Theme::TechNeon];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::EditorialBold => "editorial-bold",
            Theme::MinimalClean => "minimal-clean",
            Theme::TechNeon => "tech-neon",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == name)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    SectionHeader,
    Paragraph,
    List,
    Table,
    ContrastPair,
    Callout,
    Takeaways,
    Quote,
    Image,
}

impl Component {
    pub const ALL: [Component; 9] = [
        Component::SectionHeader,
        Component::Paragraph,
        Component::List,
        Component::Table,
        Component::ContrastPair,
        Component::Callout,
        Component::Takeaways,
        Component::Quote,
        Component::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::SectionHeader => "sectionHeader",
            Component::Paragraph => "paragraph",
            Component::List => "list",
            Component::Table => "table",
            Component::ContrastPair => "contrastPair",
            Component::Callout => "callout",
            Component::Takeaways => "takeaways",
            Component::Quote => "quote",
            Component::Image => "image",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|component| component.as_str() == name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContrastVariant {
    SplitCards,
    SplitMinimal,
}

impl ContrastVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ContrastVariant::SplitCards => "splitCards",
            ContrastVariant::SplitMinimal => "splitMinimal",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "splitCards" => Some(ContrastVariant::SplitCards),
            "splitMinimal" => Some(ContrastVariant::SplitMinimal),
            _ => None,
        }
    }
}

/// Maps one block onto a component and a free-form variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub block_id: String,
    pub component: Component,
    pub variant: String,
}

/// Renders two blocks side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPairItem {
    pub left_block_id: String,
    pub right_block_id: String,
    pub variant: ContrastVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    Block(LayoutItem),
    ContrastPair(ContrastPairItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_version: String,
    pub theme: Theme,
    pub toc: bool,
    pub layout: Vec<LayoutEntry>,
}

impl Recipe {
    pub fn new(theme: Theme, toc: bool, layout: Vec<LayoutEntry>) -> Self {
        Self {
            recipe_version: RECIPE_VERSION.to_string(),
            theme,
            toc,
            layout,
        }
    }
}

/// Wire shape of a contrast pair; the `component` literal is part of the schema.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContrastPairWire<'a> {
    component: Component,
    #[serde(flatten)]
    item: &'a ContrastPairItem,
}

impl Serialize for LayoutEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            LayoutEntry::Block(item) => item.serialize(serializer),
            LayoutEntry::ContrastPair(item) => ContrastPairWire {
                component: Component::ContrastPair,
                item,
            }
            .serialize(serializer),
        }
    }
}
