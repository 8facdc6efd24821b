//! gpacalc configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Layout;
use crate::report::DEFAULT_REPORT_FILE;

/// Top-level gpacalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpacalcConfig {
    /// Layout for roster files that do not name one.
    #[serde(default)]
    pub default_layout: Layout,
    /// Directory reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name of the plain-text report.
    #[serde(default = "default_report_file_name")]
    pub report_file_name: String,
    /// Output format when `--format` is not given: text, html, json, all.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_report_file_name() -> String {
    DEFAULT_REPORT_FILE.to_string()
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for GpacalcConfig {
    fn default() -> Self {
        Self {
            default_layout: Layout::default(),
            output_dir: default_output_dir(),
            report_file_name: default_report_file_name(),
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gpacalc.toml` in the current directory
/// 2. `~/.config/gpacalc/config.toml`
///
/// Environment variable override: `GPACALC_OUTPUT_DIR`.
pub fn load_config() -> Result<GpacalcConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GpacalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gpacalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => GpacalcConfig::default(),
    };

    if let Ok(dir) = std::env::var("GPACALC_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

/// Parse a config from TOML text.
pub fn parse_config_str(content: &str) -> Result<GpacalcConfig> {
    let config: GpacalcConfig = toml::from_str(content)?;
    anyhow::ensure!(
        !config.report_file_name.trim().is_empty(),
        "report_file_name must not be empty"
    );
    let extension = Path::new(&config.report_file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    anyhow::ensure!(
        !matches!(extension.as_deref(), Some("html" | "json")),
        "report_file_name must not use the .html or .json extension (got {})",
        config.report_file_name
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gpacalc"))
}
