//! Configuration for the extraction and batching pipeline.
//!
//! Configuration can be loaded from environment variables or constructed
//! programmatically.

use anyhow::{Context as _, Result};
use css_batcher::{BatcherConfig, DEFAULT_BASELINE_WIDTH};
use css_cloner::PropertyRegistry;
use log::debug;
use std::env;
use std::fs::read_to_string;
use std::path::Path;

/// Environment variable naming a JSON fluid property file.
pub const PROPERTIES_VAR: &str = "FLUID_PROPERTIES";

/// Environment variable overriding the default baseline width in pixels.
pub const BASELINE_WIDTH_VAR: &str = "FLUID_BASELINE_WIDTH";

/// Settings for one extraction and batching run.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    /// Allowlist and shorthand tables used during extraction.
    pub registry: PropertyRegistry,
    /// Batching settings.
    pub batcher: BatcherConfig,
}

impl PipelineConfig {
    /// Construct a configuration from explicit parts.
    #[inline]
    #[must_use]
    pub const fn new(registry: PropertyRegistry, batcher: BatcherConfig) -> Self {
        Self { registry, batcher }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `FLUID_PROPERTIES`: path to a JSON fluid property file (default: built-in tables)
    /// - `FLUID_BASELINE_WIDTH`: default baseline width in pixels (default: 375)
    ///
    /// # Errors
    /// Returns an error when the property file cannot be read or is invalid, or
    /// when the baseline width is not a non-negative integer.
    #[inline]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which resolves variable names the way
    /// [`Self::from_env`] resolves them against the process environment.
    ///
    /// # Errors
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let registry = match lookup(PROPERTIES_VAR) {
            Some(path) if !path.trim().is_empty() => load_registry(Path::new(path.trim()))?,
            _ => PropertyRegistry::default(),
        };
        let default_baseline_width = match lookup(BASELINE_WIDTH_VAR) {
            Some(width) if !width.trim().is_empty() => parse_width(&width)
                .with_context(|| format!("invalid {BASELINE_WIDTH_VAR}"))?,
            _ => DEFAULT_BASELINE_WIDTH,
        };
        Ok(Self::new(
            registry,
            BatcherConfig {
                default_baseline_width,
            },
        ))
    }

    /// Replace the registry with the tables stored at `path`.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is invalid.
    pub fn with_properties_file(mut self, path: &Path) -> Result<Self> {
        self.registry = load_registry(path)?;
        Ok(self)
    }

    /// Replace the default baseline width.
    #[must_use]
    pub const fn with_baseline_width(mut self, width: u32) -> Self {
        self.batcher.default_baseline_width = width;
        self
    }
}

/// Read and validate a JSON fluid property file.
///
/// # Errors
/// Returns an error when the file cannot be read or is invalid.
pub fn load_registry(path: &Path) -> Result<PropertyRegistry> {
    let text = read_to_string(path)
        .with_context(|| format!("failed to read fluid properties from {}", path.display()))?;
    let registry = PropertyRegistry::from_json(&text)
        .with_context(|| format!("invalid fluid properties in {}", path.display()))?;
    debug!(
        "loaded {} fluid properties (version {}) from {}",
        registry.properties().len(),
        registry.version(),
        path.display()
    );
    Ok(registry)
}

/// Parse a width in whole pixels, with or without a `px` suffix.
///
/// # Errors
/// Returns an error when `text` is not a non-negative integer.
pub fn parse_width(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .with_context(|| format!("expected a width in whole pixels, got {text:?}"))
}
