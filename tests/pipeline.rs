use std::collections::HashSet;

use article_render::application::recipe::generate_fallback_recipe;
use article_render::application::render::{
    ArticleRenderService, OutputFormat, RecipeSource, RenderError, RenderRequest, RenderService,
    extract_blocks, render_service,
};
use article_render::domain::blocks::BlockKind;
use article_render::domain::recipe::Theme;
use insta::assert_snapshot;
use serde_json::{Value, json};

const FIELD_GUIDE: &str = include_str!("fixtures/field_guide.md");
const RECIPE: &str = include_str!("fixtures/recipe_valid.json");

fn body_only(article_id: &str, content: &str) -> RenderRequest {
    RenderRequest::new(article_id, content).with_format(OutputFormat::BodyOnly)
}

fn supplied_recipe() -> Value {
    serde_json::from_str(RECIPE).expect("fixture recipe is json")
}

#[test]
fn field_guide_extracts_every_block_kind() {
    let blocks = extract_blocks(FIELD_GUIDE);
    let ids: Vec<&str> = blocks.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "heading-0",
            "paragraph-1",
            "heading-2",
            "list-3",
            "heading-4",
            "list-5",
            "quote-6",
            "heading-7",
            "table-8",
            "code-9",
            "hr-10",
            "image-11",
            "heading-12",
            "paragraph-13",
        ]
    );

    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    match &blocks[8].kind {
        BlockKind::Table { headers, rows } => {
            assert_eq!(headers, &["Style", "Hydration"]);
            assert_eq!(rows[1], ["Open crumb", "80%"]);
        }
        other => panic!("expected table, got {other:?}"),
    }
    match &blocks[9].kind {
        BlockKind::Code { language, code } => {
            assert_eq!(language.as_deref(), Some("bash"));
            assert_eq!(code, "echo \"bake at 250C\"");
        }
        other => panic!("expected code, got {other:?}"),
    }
}

#[test]
fn fallback_render_is_deterministic() {
    let request = body_only("field-guide", FIELD_GUIDE);
    let first = render_service().render(&request).expect("render");
    let second = render_service().render(&request).expect("render");

    assert_eq!(first, second);
    assert_eq!(first.recipe_source, RecipeSource::Fallback);
    assert_eq!(first.theme, generate_fallback_recipe("field-guide").theme);
    assert_eq!(first.blocks_rendered, 14);
}

#[test]
fn supplied_recipe_reorders_and_styles_blocks() {
    let request = body_only("field-guide", FIELD_GUIDE).with_recipe(supplied_recipe());
    let output = ArticleRenderService::default()
        .render(&request)
        .expect("render");

    assert_eq!(output.recipe_source, RecipeSource::Supplied);
    assert_eq!(output.theme, Theme::TechNeon);
    assert!(output.recipe_issues.is_empty());

    let html = &output.html;
    let steps = html.find("<div class=\"list-steps\">").expect("steps list");
    let takeaways = html.find("<div class=\"takeaways ").expect("takeaways");
    assert!(steps < takeaways, "list-5 takes the first list slot");
    assert!(html.contains("<h4>Key takeaways</h4><div class=\"list-cards\">"));
    assert!(html.contains("<div class=\"callout callout-tip "));
    assert!(html.contains("<div class=\"table-wrapper table-comparison\">"));
}

#[test]
fn dangling_block_ids_do_not_drop_content() {
    let request = body_only("field-guide", FIELD_GUIDE).with_recipe(supplied_recipe());
    let output = ArticleRenderService::default()
        .render(&request)
        .expect("render");

    assert_eq!(output.recipe_source, RecipeSource::Supplied);
    assert_eq!(output.html.matches("<div class=\"section-header ").count(), 5);
    assert!(!output.html.contains("ghost-99"));
}

#[test]
fn contrast_pair_renders_both_sides_once() {
    let recipe = json!({
        "recipeVersion": "v1",
        "theme": "minimal-clean",
        "toc": false,
        "layout": [{
            "component": "contrastPair",
            "leftBlockId": "paragraph-1",
            "rightBlockId": "quote-6",
            "variant": "splitMinimal",
            "labelLeft": "Myth",
            "labelRight": "Fact"
        }]
    });
    let output = ArticleRenderService::default()
        .render(&body_only("field-guide", FIELD_GUIDE).with_recipe(recipe))
        .expect("render");

    assert_eq!(output.recipe_source, RecipeSource::Supplied);
    assert_eq!(output.html.matches("contrast-pair-minimal").count(), 1);
    assert!(output.html.contains("<div class=\"label\">Myth</div>"));
    assert_eq!(output.html.matches("Temperature matters").count(), 1);
}

#[test]
fn standard_item_naming_contrast_pair_keeps_supplied_theme() {
    let recipe = json!({
        "recipeVersion": "v1",
        "theme": "tech-neon",
        "layout": [{ "blockId": "paragraph-1", "component": "contrastPair", "variant": "splitCards" }]
    });
    let output = ArticleRenderService::default()
        .render(&body_only("article-1", FIELD_GUIDE).with_recipe(recipe))
        .expect("render");

    assert_eq!(output.recipe_source, RecipeSource::Supplied);
    assert!(output.html.starts_with("<div class=\"article-content theme-tech-neon"));
    assert!(!output.html.contains("contrast-pair"));
    assert_eq!(output.html.matches("Temperature matters").count(), 1);
}

#[test]
fn toc_follows_recipe_flag() {
    let mut recipe = supplied_recipe();
    let with_toc = ArticleRenderService::default()
        .render(&body_only("field-guide", FIELD_GUIDE).with_recipe(recipe.clone()))
        .expect("render");
    assert!(with_toc.html.contains("<nav class=\"toc "));
    assert!(with_toc.html.contains("<a href=\"#troubleshooting-tips\">"));

    recipe["toc"] = json!(false);
    let without_toc = ArticleRenderService::default()
        .render(&body_only("field-guide", FIELD_GUIDE).with_recipe(recipe))
        .expect("render");
    assert!(!without_toc.html.contains("<nav"));
}

#[test]
fn toc_needs_three_headings() {
    let recipe = json!({ "recipeVersion": "v1", "theme": "editorial-bold", "toc": true, "layout": [] });
    let output = ArticleRenderService::default()
        .render(&body_only("short", "# One\n\n## Two\n\nBody").with_recipe(recipe))
        .expect("render");
    assert!(!output.html.contains("<nav"));
}

#[test]
fn text_is_always_escaped() {
    let output = render_service()
        .render(&body_only("escapes", "<p>Tom &amp; Jerry said &lt;hi&gt;</p>"))
        .expect("render");
    assert!(output.html.contains("Tom &amp; Jerry said &lt;hi&gt;"));
    assert!(!output.html.contains("<hi>"));
}

#[test]
fn markdown_emphasis_survives_rendering() {
    let recipe = json!({ "recipeVersion": "v1", "theme": "minimal-clean", "toc": false, "layout": [] });
    let output = render_service()
        .render(&body_only("hello", "# Title\n\nHello **world**.").with_recipe(recipe))
        .expect("render");

    assert_snapshot!(output.html, @r#"
    <div class="article-content theme-minimal-clean">
    <div class="section-header minimal"><h1 id="title" class="text-2xl font-semibold mb-3">Title</h1></div>
    <p class="text-lg text-gray-500 leading-relaxed mb-6 lead">Hello <strong>world</strong>.</p>
    </div>
    "#);
}

#[test]
fn unclosed_markup_still_produces_blocks() {
    let blocks = extract_blocks("<div><p>Open paragraph<div><h2>Inner");
    let texts: Vec<String> = blocks.iter().map(|block| block.plain_text()).collect();
    assert_eq!(texts, ["Open paragraph", "Inner"]);
}

#[test]
fn full_document_has_one_style_and_no_external_resources() {
    let output = render_service()
        .render(&RenderRequest::new("field-guide", FIELD_GUIDE).with_meta_description("Bread"))
        .expect("render");
    let html = &output.html;

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("<style").count(), 1);
    assert!(!html.contains("<script"));
    assert!(!html.contains("<link"));
    assert!(html.contains("<title>Field Guide to Sourdough</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"Bread\">"));
}

#[test]
fn whitespace_content_is_an_error() {
    let err = render_service()
        .render(&RenderRequest::new("blank", "\n\t "))
        .expect_err("blank content");
    assert_eq!(err, RenderError::EmptyContent);
}
