use std::io;
use std::path::Path;

use clap::ValueEnum;
use publishcheck_rules::CompileOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings read from `publishcheck.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Treat `min: 0` / `max: 0` as undeclared bounds.
    pub zero_bound_is_absent: bool,
    /// Compare an unset number as `0` under `range`.
    pub null_range_value_is_zero: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zero_bound_is_absent: true,
            null_range_value_is_zero: true,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            zero_bound_is_absent: self.zero_bound_is_absent,
            null_range_value_is_zero: self.null_range_value_is_zero,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Load settings from `path`, falling back to defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> SettingsResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse_settings("").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.compile_options(), CompileOptions::default());
    }

    #[test]
    fn reads_overrides() {
        let settings = parse_settings(
            r#"
zero_bound_is_absent = false
null_range_value_is_zero = false
log_format = "json"
"#,
        )
        .expect("parse settings");
        assert!(!settings.zero_bound_is_absent);
        assert!(!settings.compile_options().null_range_value_is_zero);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(matches!(
            parse_settings("log_format = \"xml\""),
            Err(SettingsError::TomlDecode(_))
        ));
    }
}
