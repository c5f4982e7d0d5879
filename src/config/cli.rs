use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

use crate::application::render::{OutputFormat, SanitizeMode};

/// Command-line arguments for the article-render binary.
#[derive(Debug, Parser)]
#[command(
    name = "article-render",
    version,
    about = "Render articles into themed HTML through validated layout recipes"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "ARTICLE_RENDER_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render an article into HTML.
    Render(RenderArgs),
    /// Print the blocks extracted from an article as JSON.
    Extract(ExtractArgs),
    /// Validate a recipe document; exits with status 1 when it is invalid.
    Validate(ValidateArgs),
    /// Print the deterministic fallback recipe for an article identity.
    Fallback(FallbackArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the input sanitize mode (pattern|strict).
    #[arg(long = "sanitize-mode", value_name = "MODE")]
    pub sanitize_mode: Option<SanitizeMode>,

    /// Override the table of contents heading.
    #[arg(long = "toc-title", value_name = "TEXT")]
    pub toc_title: Option<String>,

    /// Override the takeaways heading.
    #[arg(long = "takeaways-title", value_name = "TEXT")]
    pub takeaways_title: Option<String>,

    /// Override the document language attribute.
    #[arg(long = "lang", value_name = "LANG")]
    pub lang: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Markdown or HTML input; `-` reads standard input.
    #[arg(value_name = "CONTENT", value_hint = ValueHint::FilePath)]
    pub content: PathBuf,

    /// Recipe JSON file. Invalid or missing recipes fall back deterministically.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub recipe: Option<PathBuf>,

    /// Article identity used for the fallback theme; defaults to the input file stem.
    #[arg(long = "article-id", value_name = "ID")]
    pub article_id: Option<String>,

    /// Document title; defaults to the first heading.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Description emitted into the document meta tags.
    #[arg(long = "meta-description", value_name = "TEXT")]
    pub meta_description: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Full)]
    pub format: FormatArg,

    /// Write the HTML here instead of standard output.
    #[arg(long, short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Complete HTML document with inlined styles.
    Full,
    /// Article fragment only.
    BodyOnly,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Full => OutputFormat::Full,
            FormatArg::BodyOnly => OutputFormat::BodyOnly,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ExtractArgs {
    /// Markdown or HTML input; `-` reads standard input.
    #[arg(value_name = "CONTENT", value_hint = ValueHint::FilePath)]
    pub content: PathBuf,

    /// Print compact block summaries instead of full blocks.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub summary: bool,

    /// Override the summary preview length in characters.
    #[arg(long = "max-text-length", value_name = "CHARS")]
    pub max_text_length: Option<usize>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct ValidateArgs {
    /// Recipe JSON file; `-` reads standard input.
    #[arg(value_name = "RECIPE", value_hint = ValueHint::FilePath)]
    pub recipe: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct FallbackArgs {
    /// Article identity keying the theme choice.
    #[arg(value_name = "ARTICLE_ID")]
    pub article_id: String,
}
