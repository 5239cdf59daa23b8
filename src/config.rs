//! Configuration module.
//!
//! Handles loading, validating, and merging `wallfit.toml`. Configuration is
//! layered: stock defaults are overridden by the config file, which is in
//! turn overridden by command-line flags.
//!
//! ```text
//! stock defaults  →  wallfit.toml  →  CLI flags  →  WallfitConfig::validate()
//! ```
//!
//! ## Config File Location
//!
//! `wallfit.toml` in the working directory is picked up when it exists.
//! `--config FILE` points somewhere else; an explicit path that does not
//! exist is an error.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! monitors = []             # [[width, height], ...] left to right
//! gaps = []                 # px between neighbouring monitors
//! alignment = "center"      # center|left|right|top|bottom|black-bars
//!
//! [output]
//! filter = "catmull-rom"    # nearest|triangle|catmull-rom|gaussian|lanczos3
//! quality = 90              # JPEG/AVIF quality (1-100)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. A file that only describes the desk is enough:
//!
//! ```toml
//! [layout]
//! monitors = [[1920, 1080], [2560, 1440]]
//! gaps = [120]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::align::Alignment;
use crate::error::ConfigurationError;
use crate::imaging::{Quality, ResizeFilter, RustBackend};
use crate::layout::{Monitor, MonitorLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "wallfit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid layout: {0}")]
    Layout(#[from] ConfigurationError),
}

/// Configuration loaded from `wallfit.toml` and the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallfitConfig {
    /// Monitor arrangement and alignment policy.
    pub layout: LayoutConfig,
    /// Resampling and encoding settings.
    pub output: OutputConfig,
}

/// Monitor arrangement, left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Monitor resolutions as `[width, height]` pairs.
    pub monitors: Vec<Monitor>,
    /// Gap in pixels after each monitor but the last.
    pub gaps: Vec<u32>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub filter: ResizeFilter,
    /// Lossy encoding quality (1-100).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filter: ResizeFilter::default(),
            quality: Quality::default().value(),
        }
    }
}

impl WallfitConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        self.monitor_layout()?;
        Ok(())
    }

    /// Build the validated monitor arrangement.
    pub fn monitor_layout(&self) -> Result<MonitorLayout, ConfigurationError> {
        MonitorLayout::new(self.layout.monitors.clone(), self.layout.gaps.clone())
    }

    /// Image backend carrying the configured filter and quality.
    pub fn backend(&self) -> RustBackend {
        RustBackend::new()
            .with_filter(self.output.filter)
            .with_quality(Quality::new(self.output.quality))
    }
}

/// Values given on the command line. `None` / empty means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub monitors: Vec<Monitor>,
    pub gaps: Option<Vec<u32>>,
    pub alignment: Option<Alignment>,
    pub filter: Option<ResizeFilter>,
    pub quality: Option<u32>,
}

impl Overrides {
    /// Sparse TOML overlay holding only the given values.
    ///
    /// Monitors given on the command line describe a new desk, so the file's
    /// gaps are dropped with them unless gaps were given too.
    pub fn to_toml(&self) -> toml::Value {
        let mut layout = toml::Table::new();
        if !self.monitors.is_empty() {
            let monitors = self
                .monitors
                .iter()
                .map(|m| {
                    toml::Value::Array(vec![
                        toml::Value::Integer(i64::from(m.width)),
                        toml::Value::Integer(i64::from(m.height)),
                    ])
                })
                .collect();
            layout.insert("monitors".into(), toml::Value::Array(monitors));
            layout.insert("gaps".into(), gaps_value(self.gaps.as_deref().unwrap_or(&[])));
        } else if let Some(gaps) = &self.gaps {
            layout.insert("gaps".into(), gaps_value(gaps));
        }
        if let Some(alignment) = self.alignment {
            layout.insert("alignment".into(), toml::Value::String(alignment.to_string()));
        }

        let mut output = toml::Table::new();
        if let Some(filter) = self.filter {
            output.insert("filter".into(), toml::Value::String(filter.to_string()));
        }
        if let Some(quality) = self.quality {
            output.insert("quality".into(), toml::Value::Integer(i64::from(quality)));
        }

        let mut root = toml::Table::new();
        if !layout.is_empty() {
            root.insert("layout".into(), toml::Value::Table(layout));
        }
        if !output.is_empty() {
            root.insert("output".into(), toml::Value::Table(output));
        }
        toml::Value::Table(root)
    }
}

fn gaps_value(gaps: &[u32]) -> toml::Value {
    toml::Value::Array(
        gaps.iter()
            .map(|&g| toml::Value::Integer(i64::from(g)))
            .collect(),
    )
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(WallfitConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<WallfitConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: WallfitConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration.
///
/// With `path = None` the default `wallfit.toml` is used when present. An
/// explicit path must exist. Command-line overrides are applied last.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<WallfitConfig, ConfigError> {
    let file = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", p.display()),
                )));
            }
            load_raw_config(p)?
        }
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    debug!(from_file = file.is_some(), "loading configuration");

    let base = stock_defaults_value()?;
    resolve_config(base, file.into_iter().chain([overrides.to_toml()]))
}

/// Returns a fully-commented stock `wallfit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# wallfit configuration
# =====================
#
# Describes the monitors a wallpaper is stretched across. Every key is
# optional; command-line flags override values set here.

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Monitor resolutions as [width, height], ordered left to right.
# Example: monitors = [[1920, 1080], [2560, 1440], [1920, 1080]]
monitors = []

# Physical gap in pixels between neighbouring monitors (bezels plus air).
# Gap N sits between monitor N and monitor N+1. At most one fewer gap than
# monitors; missing trailing gaps count as zero.
# Example: gaps = [120, 120]
gaps = []

# Which part of the image survives when its aspect ratio differs from the
# combined monitors:
#   "center"      crop evenly from both sides
#   "left"        keep the left edge (image wider than the desk)
#   "right"       keep the right edge (image wider than the desk)
#   "top"         keep the top edge (image taller than the desk)
#   "bottom"      keep the bottom edge (image taller than the desk)
#   "black-bars"  never crop, fill the remainder with black
alignment = "center"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Resampling filter used when scaling to the desk:
# "nearest", "triangle", "catmull-rom", "gaussian" or "lanczos3".
filter = "catmull-rom"

# Encoding quality for lossy formats (JPEG, AVIF), 1-100.
quality = 90
"##
}
