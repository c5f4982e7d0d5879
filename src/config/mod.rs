//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{num::NonZeroUsize, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::render::SanitizeMode;

pub use cli::*;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "article-render";
const ENV_PREFIX: &str = "ARTICLE_RENDER";
pub(crate) const DEFAULT_SUMMARY_MAX_TEXT_LENGTH: usize = 240;
pub(crate) const DEFAULT_TOC_TITLE: &str = "Contents";
pub(crate) const DEFAULT_TAKEAWAYS_TITLE: &str = "Key takeaways";
pub(crate) const DEFAULT_DOCUMENT_LANG: &str = "en";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
    pub document: DocumentSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub sanitize_mode: SanitizeMode,
    pub summary_max_text_length: NonZeroUsize,
    pub toc_title: String,
    pub takeaways_title: String,
}

#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub lang: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);
    match &cli.command {
        Command::Render(args) => raw.apply_render_overrides(&args.overrides),
        Command::Extract(args) => raw.apply_extract_overrides(args),
        Command::Validate(_) | Command::Fallback(_) => {}
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
    document: RawDocumentSettings,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(mode) = overrides.sanitize_mode {
            self.render.sanitize_mode = Some(mode.as_str().to_string());
        }
        if let Some(title) = overrides.toc_title.as_ref() {
            self.render.toc_title = Some(title.clone());
        }
        if let Some(title) = overrides.takeaways_title.as_ref() {
            self.render.takeaways_title = Some(title.clone());
        }
        if let Some(lang) = overrides.lang.as_ref() {
            self.document.lang = Some(lang.clone());
        }
    }

    fn apply_extract_overrides(&mut self, args: &ExtractArgs) {
        self.apply_render_overrides(&args.overrides);
        if let Some(length) = args.max_text_length {
            self.render.summary_max_text_length = Some(length);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            render,
            document,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;
        let document = build_document_settings(document)?;

        Ok(Self {
            logging,
            render,
            document,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let sanitize_mode = match render.sanitize_mode {
        Some(mode) => SanitizeMode::from_str(&mode)
            .map_err(|reason| LoadError::invalid("render.sanitize_mode", reason))?,
        None => SanitizeMode::default(),
    };

    let length = render
        .summary_max_text_length
        .unwrap_or(DEFAULT_SUMMARY_MAX_TEXT_LENGTH);
    let summary_max_text_length = NonZeroUsize::new(length).ok_or_else(|| {
        LoadError::invalid("render.summary_max_text_length", "must be greater than zero")
    })?;

    let toc_title = non_blank(render.toc_title, DEFAULT_TOC_TITLE, "render.toc_title")?;
    let takeaways_title = non_blank(
        render.takeaways_title,
        DEFAULT_TAKEAWAYS_TITLE,
        "render.takeaways_title",
    )?;

    Ok(RenderSettings {
        sanitize_mode,
        summary_max_text_length,
        toc_title,
        takeaways_title,
    })
}

fn build_document_settings(document: RawDocumentSettings) -> Result<DocumentSettings, LoadError> {
    let lang = non_blank(document.lang, DEFAULT_DOCUMENT_LANG, "document.lang")?;
    if !lang
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    {
        return Err(LoadError::invalid(
            "document.lang",
            format!("`{lang}` is not a language tag"),
        ));
    }

    Ok(DocumentSettings { lang })
}

fn non_blank(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(LoadError::invalid(key, "must not be empty"));
            }
            Ok(trimmed.to_string())
        }
        None => Ok(default.to_string()),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    sanitize_mode: Option<String>,
    summary_max_text_length: Option<usize>,
    toc_title: Option<String>,
    takeaways_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDocumentSettings {
    lang: Option<String>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
