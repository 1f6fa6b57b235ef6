//! # Generation Config
//!
//! Parameters for one generation run. Built in code or loaded once from a
//! TOML file:
//!
//! ```toml
//! width = 96
//! height = 48
//! fill_percent = 45
//! smoothing_iterations = 5
//! seed = "mossy-hollow"
//! use_random_seed = false
//! ```
//!
//! Missing keys take the defaults below; unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, CaveResult};

/// Largest grid the generator accepts, in cells (two buffers of this size
/// are live during smoothing).
pub const MAX_CELLS: u64 = 1 << 26;

/// Largest number of smoothing passes per run. Real maps settle within a
/// handful of passes.
pub const MAX_SMOOTHING_ITERATIONS: u32 = 1 << 12;

/// Default grid width.
pub const DEFAULT_WIDTH: u32 = 256;
/// Default grid height.
pub const DEFAULT_HEIGHT: u32 = 128;
/// Default initial wall density, in percent.
pub const DEFAULT_FILL_PERCENT: u8 = 40;
/// Default number of smoothing passes.
pub const DEFAULT_SMOOTHING_ITERATIONS: u32 = 5;

/// Immutable-per-run cave generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaveConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Chance (0-100) that an interior cell starts as a wall.
    pub fill_percent: u8,
    /// Number of smoothing passes.
    pub smoothing_iterations: u32,
    /// Seed text. Ignored when `use_random_seed` is set.
    pub seed: String,
    /// Derive a fresh seed from the wall clock on every run.
    pub use_random_seed: bool,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percent: DEFAULT_FILL_PERCENT,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            seed: String::new(),
            use_random_seed: false,
        }
    }
}

impl CaveConfig {
    /// Creates a config with the given size and defaults for everything else.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::default().with_size(width, height)
    }

    /// Sets the grid size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the initial wall density.
    #[must_use]
    pub fn with_fill_percent(mut self, fill_percent: u8) -> Self {
        self.fill_percent = fill_percent;
        self
    }

    /// Sets the number of smoothing passes.
    #[must_use]
    pub fn with_smoothing_iterations(mut self, iterations: u32) -> Self {
        self.smoothing_iterations = iterations;
        self
    }

    /// Sets a fixed seed and turns random seeding off.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self.use_random_seed = false;
        self
    }

    /// Turns wall-clock seeding on or off.
    #[must_use]
    pub fn with_random_seed(mut self, enabled: bool) -> Self {
        self.use_random_seed = enabled;
        self
    }

    /// Total number of cells this config asks for.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero dimensions, a fill percent
    /// above 100, a grid larger than [`MAX_CELLS`] or more than
    /// [`MAX_SMOOTHING_ITERATIONS`] passes.
    pub fn validate(&self) -> CaveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(CaveError::InvalidFillPercent(self.fill_percent));
        }
        if self.cell_count() > MAX_CELLS {
            return Err(CaveError::GridTooLarge {
                width: self.width,
                height: self.height,
                max_cells: MAX_CELLS,
            });
        }
        if self.smoothing_iterations > MAX_SMOOTHING_ITERATIONS {
            return Err(CaveError::TooManyIterations {
                requested: self.smoothing_iterations,
                max: MAX_SMOOTHING_ITERATIONS,
            });
        }
        Ok(())
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::ConfigParse`] for malformed TOML, unknown keys or
    /// values of the wrong type (negative sizes included), or any error from
    /// [`CaveConfig::validate`].
    pub fn from_toml_str(text: &str) -> CaveResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CaveError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`CaveConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> CaveResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CaveError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded cave config");
        Ok(config)
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::ConfigSerialize`] if serialization fails.
    pub fn to_toml_string(&self) -> CaveResult<String> {
        toml::to_string_pretty(self).map_err(|e| CaveError::ConfigSerialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CaveConfig::default();

        assert_eq!(config.width, 256);
        assert_eq!(config.height, 128);
        assert_eq!(config.fill_percent, 40);
        assert_eq!(config.smoothing_iterations, 5);
        assert!(config.seed.is_empty());
        assert!(!config.use_random_seed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CaveConfig::new(10, 20)
            .with_fill_percent(55)
            .with_smoothing_iterations(2)
            .with_random_seed(true)
            .with_seed("fixed");

        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.fill_percent, 55);
        assert_eq!(config.smoothing_iterations, 2);
        assert_eq!(config.seed, "fixed");
        assert!(!config.use_random_seed);
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        assert_eq!(
            CaveConfig::new(0, 5).validate(),
            Err(CaveError::InvalidDimensions { width: 0, height: 5 })
        );
        assert_eq!(
            CaveConfig::new(5, 0).validate(),
            Err(CaveError::InvalidDimensions { width: 5, height: 0 })
        );
    }

    #[test]
    fn test_validate_fill_percent_bounds() {
        assert!(CaveConfig::new(5, 5).with_fill_percent(0).validate().is_ok());
        assert!(CaveConfig::new(5, 5).with_fill_percent(100).validate().is_ok());
        assert_eq!(
            CaveConfig::new(5, 5).with_fill_percent(101).validate(),
            Err(CaveError::InvalidFillPercent(101))
        );
    }

    #[test]
    fn test_validate_rejects_huge_grids() {
        let err = CaveConfig::new(u32::MAX, u32::MAX).validate().unwrap_err();
        assert!(matches!(err, CaveError::GridTooLarge { .. }));

        assert!(CaveConfig::new(1 << 13, 1 << 13).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unbounded_iterations() {
        let config = CaveConfig::new(1, 1)
            .with_seed("p")
            .with_smoothing_iterations(u32::MAX);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            CaveError::TooManyIterations {
                requested: u32::MAX,
                max: MAX_SMOOTHING_ITERATIONS,
            }
        );
        assert!(err.is_config_error());

        let at_cap = config.with_smoothing_iterations(MAX_SMOOTHING_ITERATIONS);
        assert!(at_cap.validate().is_ok());

        let parsed = CaveConfig::from_toml_str("smoothing_iterations = 4294967295\n");
        assert!(matches!(parsed, Err(CaveError::TooManyIterations { .. })));
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let config = CaveConfig::from_toml_str("width = 64\nseed = \"abc\"\n").unwrap();

        assert_eq!(config.width, 64);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.seed, "abc");
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let negative = CaveConfig::from_toml_str("width = -3");
        assert!(matches!(negative, Err(CaveError::ConfigParse(_))));

        let negative_passes = CaveConfig::from_toml_str("smoothing_iterations = -1");
        assert!(matches!(negative_passes, Err(CaveError::ConfigParse(_))));

        let unknown = CaveConfig::from_toml_str("depth = 3");
        assert!(matches!(unknown, Err(CaveError::ConfigParse(_))));

        let too_full = CaveConfig::from_toml_str("fill_percent = 120");
        assert_eq!(too_full, Err(CaveError::InvalidFillPercent(120)));

        let zero = CaveConfig::from_toml_str("height = 0");
        assert!(matches!(zero, Err(CaveError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CaveConfig::new(33, 17).with_seed("round").with_fill_percent(48);
        let text = config.to_toml_string().unwrap();

        assert_eq!(CaveConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CaveConfig::from_toml_file("/definitely/not/here/cave.toml").unwrap_err();
        assert!(matches!(err, CaveError::ConfigIo { .. }));
    }
}
