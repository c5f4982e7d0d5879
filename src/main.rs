use std::{path::Path, process};

use article_render::{
    application::{
        error::AppError,
        recipe::{extract_json_object, generate_fallback_recipe, validate_recipe_str},
        render::{
            RenderPipelineConfig, RenderRequest, RenderService, configure_render_service,
            render_service,
        },
    },
    config,
    infra::{error::InfraError, files, telemetry},
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    let log = || {
        error!(
            error = %error,
            chain = ?report.messages,
            caller_error = error.is_caller_error(),
            "application error"
        );
    };

    if dispatcher::has_been_set() {
        log();
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, log);
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;
    configure_render_service(RenderPipelineConfig::from(&settings))
        .map_err(|err| InfraError::configuration(err.to_string()))?;

    match cli_args.command {
        config::Command::Render(args) => run_render(args),
        config::Command::Extract(args) => run_extract(args),
        config::Command::Validate(args) => run_validate(args),
        config::Command::Fallback(args) => run_fallback(args),
    }
}

fn run_render(args: config::RenderArgs) -> Result<(), AppError> {
    let content = files::read_input(&args.content)?;
    let article_id = args
        .article_id
        .clone()
        .unwrap_or_else(|| default_article_id(&args.content));
    if article_id.trim().is_empty() {
        return Err(AppError::validation("article id must not be empty"));
    }

    let mut request = RenderRequest::new(article_id, content).with_format(args.format.into());
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(description) = args.meta_description {
        request = request.with_meta_description(description);
    }
    if let Some(path) = args.recipe.as_deref()
        && let Some(recipe) = load_recipe(path)?
    {
        request = request.with_recipe(recipe);
    }

    let output = render_service().render(&request)?;
    info!(
        target = "article_render::cli",
        article_id = %request.article_id,
        theme = %output.theme,
        recipe_source = %output.recipe_source,
        blocks = output.blocks_rendered,
        issues = output.recipe_issues.len(),
        "render complete"
    );

    files::write_output(args.output.as_deref(), &output.html)?;
    Ok(())
}

fn run_extract(args: config::ExtractArgs) -> Result<(), AppError> {
    let content = files::read_input(&args.content)?;
    let service = render_service();
    let blocks = service.extract(&content);

    let json = if args.summary {
        to_pretty_json(&service.summarize(&blocks))?
    } else {
        to_pretty_json(&blocks)?
    };
    files::write_output(None, &json)?;
    Ok(())
}

fn run_validate(args: config::ValidateArgs) -> Result<(), AppError> {
    let text = files::read_input(&args.recipe)?;
    match validate_recipe_str(&text) {
        Ok(recipe) => {
            files::write_output(None, &to_pretty_json(&recipe)?)?;
            Ok(())
        }
        Err(err) => {
            files::write_output(None, &to_pretty_json(&err.issues)?)?;
            Err(err.into())
        }
    }
}

fn run_fallback(args: config::FallbackArgs) -> Result<(), AppError> {
    let recipe = generate_fallback_recipe(&args.article_id);
    files::write_output(None, &to_pretty_json(&recipe)?)?;
    Ok(())
}

/// A recipe file that holds no JSON object is treated like a missing recipe.
fn load_recipe(path: &Path) -> Result<Option<serde_json::Value>, AppError> {
    let text = files::read_input(path)?;
    match extract_json_object(&text) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                target = "article_render::cli",
                path = %path.display(),
                error = %err,
                "recipe file unreadable, rendering with fallback"
            );
            Ok(None)
        }
    }
}

fn default_article_id(content: &Path) -> String {
    content
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| *stem != "-")
        .unwrap_or("stdin")
        .to_string()
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(InfraError::from)
        .map_err(AppError::from)
}
