use article_render::application::recipe::{
    extract_json_object, generate_fallback_recipe, validate_recipe, validate_recipe_str,
};
use article_render::domain::recipe::{LayoutEntry, Theme};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("", Theme::MinimalClean)]
#[case("article-1", Theme::MinimalClean)]
#[case("article-2", Theme::TechNeon)]
#[case("c", Theme::TechNeon)]
#[case("article-3", Theme::EditorialBold)]
#[case("a/b", Theme::EditorialBold)]
#[case("post-42", Theme::EditorialBold)]
fn fallback_theme_is_stable(#[case] identity: &str, #[case] expected: Theme) {
    assert_eq!(generate_fallback_recipe(identity).theme, expected);
}

#[test]
fn fallback_recipe_passes_validation() {
    let recipe = generate_fallback_recipe("article-9");
    let value = serde_json::to_value(&recipe).expect("serialize");
    assert_eq!(validate_recipe(&value).expect("valid"), recipe);
}

#[test]
fn fixture_recipe_validates() {
    let recipe = validate_recipe_str(include_str!("fixtures/recipe_valid.json")).expect("valid");
    assert_eq!(recipe.theme, Theme::TechNeon);
    assert_eq!(recipe.layout.len(), 5);
    assert!(
        recipe
            .layout
            .iter()
            .all(|entry| matches!(entry, LayoutEntry::Block(_)))
    );
}

#[test]
fn invalid_fixture_reports_each_problem() {
    let err = validate_recipe_str(include_str!("fixtures/recipe_invalid.json"))
        .expect_err("invalid");
    let paths: Vec<&str> = err.issues.iter().map(|issue| issue.path.as_str()).collect();
    assert_eq!(paths, ["recipeVersion", "theme", "layout[0].component"]);
}

#[test]
fn reply_with_prose_and_fence_yields_recipe() {
    let reply = "Here you go:\n```json\n{\"recipeVersion\":\"v1\",\"theme\":\"minimal-clean\"}\n```";
    let value = extract_json_object(reply).expect("object");
    assert_eq!(value, json!({ "recipeVersion": "v1", "theme": "minimal-clean" }));
    assert!(validate_recipe(&value).is_ok());
}

#[test]
fn reply_without_object_is_rejected_at_root() {
    let err = extract_json_object("no recipe today").expect_err("missing object");
    assert_eq!(err.issues[0].path, "$");
}
