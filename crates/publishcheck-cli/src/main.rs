mod commands;
mod inputs;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use publishcheck_core::Error as CoreError;
use publishcheck_eval::EvalError;
use publishcheck_rules::ValidationReport;
use settings::{LogFormat, SettingsError, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("invalid validations: {0}")]
    Compile(ValidationReport),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "publishcheck", version, about = "Entry validation for content types")]
struct Cli {
    /// Settings file (TOML).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `publishcheck_eval=debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Log output format on stderr.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Honour `0` as a real `min`/`max` bound.
    #[arg(long, global = true, default_value_t = false)]
    strict_zero_bounds: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an entry once and print the verdict.
    Validate(ValidateArgs),
    /// List the rules compiled for each field.
    Rules(RulesArgs),
    /// Mount a sidebar and replay a script of value changes.
    Replay(ReplayArgs),
    /// Print the JSON Schema for content type documents.
    Schema,
}

#[derive(Args, Debug)]
struct EntryArgs {
    /// Content type document (JSON).
    #[arg(long, value_name = "PATH")]
    content_type: PathBuf,
    /// Entry document or flat map of field values (JSON).
    #[arg(long, value_name = "PATH")]
    entry: PathBuf,
    /// Unwrap localized values for this locale.
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    entry: EntryArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Content type document (JSON).
    #[arg(long, value_name = "PATH")]
    content_type: PathBuf,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    entry: EntryArgs,
    /// JSON lines of `{"field": ..., "value": ...}` changes.
    #[arg(long, value_name = "PATH")]
    changes: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

/// Exit code when the entry is not publishable.
const INVALID_EXIT: u8 = 2;

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    if let Some(format) = cli.log_format {
        settings.log_format = format;
    }
    if cli.strict_zero_bounds {
        settings.zero_bound_is_absent = false;
    }

    logging::init_logging(
        &settings.log_level,
        settings.log_format,
        cli.log_file.as_deref(),
    )
    .map_err(|err| CliError::Logging(err.to_string()))?;

    let options = settings.compile_options();
    tracing::debug!(
        event = "settings_loaded",
        zero_bound_is_absent = options.zero_bound_is_absent
    );

    let valid = match cli.command {
        Command::Validate(args) => commands::run_validate(args, &options)?,
        Command::Rules(args) => commands::run_rules(args, &options)?,
        Command::Replay(args) => commands::run_replay(args, &options)?,
        Command::Schema => commands::run_schema()?,
    };

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(INVALID_EXIT)
    })
}
