//! User configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::evaluator::EvaluatorOptions;
use crate::report::{OutputFormat, DEFAULT_PRECISION};

/// Highest number of decimals accepted for percentages.
pub const MAX_PRECISION: usize = 6;

/// Top-level gradecalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradecalcConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Decimals shown for the required percentage.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Treat a grade of 0 as "not yet received".
    #[serde(default = "default_true")]
    pub zero_grade_is_missing: bool,
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_true() -> bool {
    true
}

impl Default for GradecalcConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
            zero_grade_is_missing: true,
        }
    }
}

impl GradecalcConfig {
    pub fn evaluator_options(&self) -> EvaluatorOptions {
        EvaluatorOptions {
            zero_grade_is_missing: self.zero_grade_is_missing,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// Environment variable overrides: `GRADECALC_FORMAT`, `GRADECALC_PRECISION`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
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
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradecalcConfig::default(),
    };

    // Apply env var overrides
    if let Ok(format) = std::env::var("GRADECALC_FORMAT") {
        config.format = format
            .parse::<OutputFormat>()
            .map_err(|e: String| anyhow::anyhow!("GRADECALC_FORMAT: {e}"))?;
    }
    if let Ok(precision) = std::env::var("GRADECALC_PRECISION") {
        config.precision = precision
            .trim()
            .parse::<usize>()
            .with_context(|| format!("GRADECALC_PRECISION: not a number: {precision}"))?;
    }

    check_precision(config.precision)?;
    Ok(config)
}

/// Parse a config file body.
pub fn parse_config_str(content: &str) -> Result<GradecalcConfig> {
    let config: GradecalcConfig = toml::from_str(content)?;
    check_precision(config.precision)?;
    Ok(config)
}

/// Reject precision values that `format!` would happily print but nobody
/// wants to read.
pub fn check_precision(precision: usize) -> Result<()> {
    if precision > MAX_PRECISION {
        anyhow::bail!("precision must be at most {MAX_PRECISION}, got {precision}");
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}
