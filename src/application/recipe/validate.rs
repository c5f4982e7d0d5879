use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::recipe::{
    Component, ContrastPairItem, ContrastVariant, LayoutEntry, LayoutItem, RECIPE_VERSION, Recipe,
    Theme,
};

/// One schema violation, addressed by a JSON path such as `layout[2].variant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeIssue {
    pub path: String,
    pub message: String,
}

impl RecipeIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RecipeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid recipe: {}", format_issues(.issues))]
pub struct RecipeValidationError {
    pub issues: Vec<RecipeIssue>,
}

impl RecipeValidationError {
    fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![RecipeIssue::new(path, message)],
        }
    }
}

fn format_issues(issues: &[RecipeIssue]) -> String {
    issues
        .iter()
        .map(RecipeIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check an untrusted recipe document and convert it into a [`Recipe`].
///
/// Every violation is collected; unknown keys are ignored. `toc` defaults to
/// `true` and `layout` to an empty list when absent.
pub fn validate_recipe(value: &Value) -> Result<Recipe, RecipeValidationError> {
    let Some(root) = value.as_object() else {
        return Err(RecipeValidationError::single("$", "expected an object"));
    };
    let mut issues = Vec::new();

    match root.get("recipeVersion") {
        Some(Value::String(version)) if version == RECIPE_VERSION => {}
        Some(_) => issues.push(RecipeIssue::new(
            "recipeVersion",
            format!("expected \"{RECIPE_VERSION}\""),
        )),
        None => issues.push(RecipeIssue::new("recipeVersion", "required")),
    }

    let theme = match root.get("theme") {
        Some(Value::String(name)) => {
            let theme = Theme::parse(name);
            if theme.is_none() {
                issues.push(RecipeIssue::new(
                    "theme",
                    format!("expected one of {}", theme_names()),
                ));
            }
            theme
        }
        Some(_) => {
            issues.push(RecipeIssue::new("theme", "expected a string"));
            None
        }
        None => {
            issues.push(RecipeIssue::new("theme", "required"));
            None
        }
    };

    let toc = match root.get("toc") {
        None => true,
        Some(Value::Bool(toc)) => *toc,
        Some(_) => {
            issues.push(RecipeIssue::new("toc", "expected a boolean"));
            true
        }
    };

    let layout = match root.get("layout") {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| validate_entry(index, entry, &mut issues))
            .collect(),
        Some(_) => {
            issues.push(RecipeIssue::new("layout", "expected an array"));
            Vec::new()
        }
    };

    match theme {
        Some(theme) if issues.is_empty() => Ok(Recipe::new(theme, toc, layout)),
        _ => Err(RecipeValidationError { issues }),
    }
}

/// Parse `text` as JSON and validate it. A parse failure is reported as a
/// single issue at `$`.
pub fn validate_recipe_str(text: &str) -> Result<Recipe, RecipeValidationError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| RecipeValidationError::single("$", format!("invalid JSON: {err}")))?;
    validate_recipe(&value)
}

/// Pull the outermost JSON object out of a generated reply, tolerating code
/// fences and surrounding prose.
pub fn extract_json_object(text: &str) -> Result<Value, RecipeValidationError> {
    let unfenced = strip_code_fence(text.trim());
    let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) else {
        return Err(RecipeValidationError::single("$", "no JSON object found"));
    };
    if end < start {
        return Err(RecipeValidationError::single("$", "no JSON object found"));
    }

    serde_json::from_str(&unfenced[start..=end])
        .map_err(|err| RecipeValidationError::single("$", format!("invalid JSON: {err}")))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn theme_names() -> String {
    Theme::ALL
        .iter()
        .map(|theme| theme.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate_entry(index: usize, value: &Value, issues: &mut Vec<RecipeIssue>) -> Option<LayoutEntry> {
    let path = format!("layout[{index}]");
    let Some(object) = value.as_object() else {
        issues.push(RecipeIssue::new(path, "expected an object"));
        return None;
    };

    if object.contains_key("leftBlockId") || object.contains_key("rightBlockId") {
        validate_contrast_pair(&path, object, issues)
    } else {
        validate_layout_item(&path, object, issues)
    }
}

fn validate_layout_item(
    path: &str,
    object: &Map<String, Value>,
    issues: &mut Vec<RecipeIssue>,
) -> Option<LayoutEntry> {
    let before = issues.len();
    let block_id = required_string(path, object, "blockId", issues);

    let component = match object.get("component") {
        Some(Value::String(name)) => match Component::parse(name) {
            Some(component) => Some(component),
            None => {
                issues.push(RecipeIssue::new(
                    format!("{path}.component"),
                    format!("unknown component `{name}`"),
                ));
                None
            }
        },
        Some(_) => {
            issues.push(RecipeIssue::new(format!("{path}.component"), "expected a string"));
            None
        }
        None => {
            issues.push(RecipeIssue::new(format!("{path}.component"), "required"));
            None
        }
    };

    let variant = required_string(path, object, "variant", issues);

    match (block_id, component, variant) {
        (Some(block_id), Some(component), Some(variant)) if issues.len() == before => {
            Some(LayoutEntry::Block(LayoutItem {
                block_id,
                component,
                variant,
            }))
        }
        _ => None,
    }
}

fn validate_contrast_pair(
    path: &str,
    object: &Map<String, Value>,
    issues: &mut Vec<RecipeIssue>,
) -> Option<LayoutEntry> {
    let before = issues.len();
    let left_block_id = required_string(path, object, "leftBlockId", issues);
    let right_block_id = required_string(path, object, "rightBlockId", issues);

    match object.get("component") {
        Some(Value::String(name)) if name == Component::ContrastPair.as_str() => {}
        _ => issues.push(RecipeIssue::new(
            format!("{path}.component"),
            "expected \"contrastPair\"",
        )),
    }

    let variant = match object.get("variant") {
        Some(Value::String(name)) => ContrastVariant::parse(name),
        _ => None,
    };
    if variant.is_none() {
        issues.push(RecipeIssue::new(
            format!("{path}.variant"),
            "expected \"splitCards\" or \"splitMinimal\"",
        ));
    }

    let label_left = optional_string(path, object, "labelLeft", issues);
    let label_right = optional_string(path, object, "labelRight", issues);

    match (left_block_id, right_block_id, variant) {
        (Some(left_block_id), Some(right_block_id), Some(variant)) if issues.len() == before => {
            Some(LayoutEntry::ContrastPair(ContrastPairItem {
                left_block_id,
                right_block_id,
                variant,
                label_left,
                label_right,
            }))
        }
        _ => None,
    }
}

fn required_string(
    path: &str,
    object: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<RecipeIssue>,
) -> Option<String> {
    match object.get(key) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            issues.push(RecipeIssue::new(format!("{path}.{key}"), "expected a string"));
            None
        }
        None => {
            issues.push(RecipeIssue::new(format!("{path}.{key}"), "required"));
            None
        }
    }
}

fn optional_string(
    path: &str,
    object: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<RecipeIssue>,
) -> Option<String> {
    match object.get(key) {
        None => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            issues.push(RecipeIssue::new(format!("{path}.{key}"), "expected a string"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(error: &RecipeValidationError) -> Vec<&str> {
        error.issues.iter().map(|issue| issue.path.as_str()).collect()
    }

    #[test]
    fn accepts_minimal_recipe_with_defaults() {
        let recipe = validate_recipe(&json!({ "recipeVersion": "v1", "theme": "tech-neon" }))
            .expect("valid recipe");
        assert_eq!(recipe.theme, Theme::TechNeon);
        assert!(recipe.toc);
        assert!(recipe.layout.is_empty());
    }

    #[test]
    fn accepts_mixed_layout_and_ignores_unknown_keys() {
        let recipe = validate_recipe(&json!({
            "recipeVersion": "v1",
            "theme": "minimal-clean",
            "toc": false,
            "extra": 1,
            "layout": [
                { "blockId": "heading-0", "component": "sectionHeader", "variant": "shiny" },
                {
                    "component": "contrastPair",
                    "leftBlockId": "paragraph-1",
                    "rightBlockId": "paragraph-2",
                    "variant": "splitMinimal",
                    "labelLeft": "Before"
                }
            ]
        }))
        .expect("valid recipe");

        assert!(!recipe.toc);
        assert_eq!(recipe.layout.len(), 2);
        assert!(matches!(
            &recipe.layout[1],
            LayoutEntry::ContrastPair(ContrastPairItem { label_left: Some(label), label_right: None, .. }) if label == "Before"
        ));
    }

    #[test]
    fn non_object_root_is_one_issue() {
        let error = validate_recipe(&json!([1, 2])).expect_err("invalid");
        assert_eq!(paths(&error), ["$"]);
    }

    #[test]
    fn collects_every_issue_with_paths() {
        let error = validate_recipe(&json!({
            "recipeVersion": "v2",
            "theme": "neon",
            "toc": "yes",
            "layout": [
                "heading-0",
                { "blockId": "p", "component": "banner", "variant": 3 },
                { "leftBlockId": "a", "component": "contrastPair", "variant": "splitWide" }
            ]
        }))
        .expect_err("invalid");

        assert_eq!(
            paths(&error),
            [
                "recipeVersion",
                "theme",
                "toc",
                "layout[0]",
                "layout[1].component",
                "layout[1].variant",
                "layout[2].rightBlockId",
                "layout[2].variant",
            ]
        );
    }

    #[test]
    fn standard_item_may_name_contrast_pair() {
        let recipe = validate_recipe(&json!({
            "recipeVersion": "v1",
            "theme": "tech-neon",
            "layout": [{ "blockId": "paragraph-1", "component": "contrastPair", "variant": "splitCards" }]
        }))
        .expect("valid");
        assert_eq!(recipe.theme, Theme::TechNeon);
        assert!(matches!(
            &recipe.layout[0],
            LayoutEntry::Block(LayoutItem { block_id, component: Component::ContrastPair, .. })
                if block_id == "paragraph-1"
        ));
    }

    #[test]
    fn validate_str_reports_parse_failure_at_root() {
        let error = validate_recipe_str("{ not json").expect_err("invalid");
        assert_eq!(paths(&error), ["$"]);
        assert!(error.issues[0].message.starts_with("invalid JSON"));
    }

    #[test]
    fn extracts_object_from_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"recipeVersion\":\"v1\",\"theme\":\"tech-neon\"}\n```\nEnjoy.";
        let value = extract_json_object(reply).expect("object");
        assert_eq!(value["theme"], "tech-neon");
        assert!(validate_recipe(&value).is_ok());
    }

    #[test]
    fn extract_fails_without_braces() {
        assert!(extract_json_object("no json here").is_err());
        assert!(extract_json_object("} backwards {").is_err());
    }
}
