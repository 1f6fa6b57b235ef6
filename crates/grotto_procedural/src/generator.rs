//! # Cave Generator
//!
//! Turns a [`CaveConfig`] into a finished [`CaveGrid`]:
//!
//! 1. validate the config (nothing is allocated for a bad config)
//! 2. resolve the seed (fixed text, or the wall clock when random seeding is on)
//! 3. random fill
//! 4. `smoothing_iterations` smoothing passes
//!
//! A run is a pure, bounded computation. The only thing a
//! [`CaveGenerator`] keeps between runs is its scratch buffer and, when
//! asked to via [`CaveGenerator::regenerate`], the last map it produced.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Instant, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use crate::cellular::{random_fill, smooth};
use crate::config::CaveConfig;
use crate::error::{CaveError, CaveResult};
use crate::grid::{CaveGrid, Tile};
use crate::rng::CaveRng;

/// Summary of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Seed text the run used (the wall-clock seed when random seeding is on).
    pub seed: String,
    /// Hashed seed that fed the random stream.
    pub seed_value: u64,
    /// Wall cells after the random fill.
    pub filled_walls: usize,
    /// Wall cells in the final map.
    pub final_walls: usize,
    /// Changed cells per smoothing pass.
    pub pass_changes: Vec<usize>,
    /// Time spent filling and smoothing.
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Returns true if the last smoothing pass changed nothing, meaning more
    /// passes would not alter the map.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.pass_changes.last().is_some_and(|&changed| changed == 0)
    }
}

/// Resolves the seed text for a run.
///
/// # Errors
///
/// Returns [`CaveError::SeedResolution`] if random seeding is on and the
/// system clock reads earlier than the Unix epoch.
pub fn resolve_seed(config: &CaveConfig) -> CaveResult<String> {
    if !config.use_random_seed {
        return Ok(config.seed.clone());
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| CaveError::SeedResolution(e.to_string()))?;
    Ok(now.as_nanos().to_string())
}

/// Reusable cave generator.
///
/// ## Example
///
/// ```rust
/// use grotto_procedural::{CaveConfig, CaveGenerator};
///
/// let config = CaveConfig::new(64, 32).with_seed("mossy");
/// let mut generator = CaveGenerator::new();
///
/// let map = generator.generate(&config).unwrap();
/// assert_eq!(map, generator.generate(&config).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct CaveGenerator {
    /// Second smoothing buffer, kept to reuse its allocation.
    scratch: CaveGrid,
    /// Map from the last [`CaveGenerator::regenerate`] call.
    last_map: Option<CaveGrid>,
}

impl CaveGenerator {
    /// Creates a generator with no retained map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a map.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid config, or
    /// [`CaveError::SeedResolution`] if a random seed cannot be derived.
    pub fn generate(&mut self, config: &CaveConfig) -> CaveResult<CaveGrid> {
        self.generate_with_report(config).map(|(map, _)| map)
    }

    /// Generates a map and reports how the run went.
    ///
    /// # Errors
    ///
    /// Same as [`CaveGenerator::generate`].
    pub fn generate_with_report(
        &mut self,
        config: &CaveConfig,
    ) -> CaveResult<(CaveGrid, GenerationReport)> {
        config.validate()?;
        let seed = resolve_seed(config)?;

        let start = Instant::now();
        let mut rng = CaveRng::new(&seed);
        let mut map = CaveGrid::new(config.width, config.height, Tile::WALL);
        random_fill(&mut map, &mut rng, config.fill_percent);
        let filled_walls = map.wall_count();

        let pass_changes = smooth(&mut map, &mut self.scratch, config.smoothing_iterations);

        let report = GenerationReport {
            seed,
            seed_value: rng.seed_value(),
            filled_walls,
            final_walls: map.wall_count(),
            pass_changes,
            elapsed: start.elapsed(),
        };
        tracing::debug!(
            width = config.width,
            height = config.height,
            seed = %report.seed,
            iterations = config.smoothing_iterations,
            walls = report.final_walls,
            elapsed = ?report.elapsed,
            "generated cave"
        );
        Ok((map, report))
    }

    /// Generates a map and keeps it as [`CaveGenerator::last_map`].
    ///
    /// On error the previously kept map is left as it was.
    ///
    /// # Errors
    ///
    /// Same as [`CaveGenerator::generate`].
    pub fn regenerate(&mut self, config: &CaveConfig) -> CaveResult<&CaveGrid> {
        let map = self.generate(config)?;
        Ok(self.last_map.insert(map))
    }

    /// The map kept by the last successful [`CaveGenerator::regenerate`].
    #[must_use]
    pub fn last_map(&self) -> Option<&CaveGrid> {
        self.last_map.as_ref()
    }
}

/// Generates a map with a throwaway [`CaveGenerator`].
///
/// # Errors
///
/// Same as [`CaveGenerator::generate`].
pub fn generate(config: &CaveConfig) -> CaveResult<CaveGrid> {
    CaveGenerator::new().generate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cellular::smooth_pass;

    fn config(seed: &str) -> CaveConfig {
        CaveConfig::new(48, 32)
            .with_seed(seed)
            .with_fill_percent(45)
            .with_smoothing_iterations(4)
    }

    #[test]
    fn test_determinism() {
        let a = generate(&config("stable")).unwrap();
        let b = generate(&config("stable")).unwrap();

        assert_eq!(a, b, "Same config should produce identical maps");
    }

    #[test]
    fn test_different_seeds_different_maps() {
        let a = generate(&config("left")).unwrap();
        let b = generate(&config("right")).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_generator_reuse_matches_fresh_generator() {
        let mut generator = CaveGenerator::new();
        let big = generator.generate(&CaveConfig::new(90, 70).with_seed("x")).unwrap();
        let small = generator.generate(&config("reuse")).unwrap();

        assert_eq!(big.width(), 90);
        assert_eq!(small, generate(&config("reuse")).unwrap());
    }

    #[test]
    fn test_zero_iterations_equals_fill() {
        let cfg = config("fill-only").with_smoothing_iterations(0);
        let (map, report) = CaveGenerator::new().generate_with_report(&cfg).unwrap();

        let mut expected = CaveGrid::new(cfg.width, cfg.height, Tile::WALL);
        random_fill(&mut expected, &mut CaveRng::new("fill-only"), cfg.fill_percent);

        assert_eq!(map, expected);
        assert!(report.pass_changes.is_empty());
        assert!(!report.converged());
        assert_eq!(report.filled_walls, report.final_walls);
    }

    #[test]
    fn test_iterations_compose() {
        let cfg = config("compose").with_smoothing_iterations(2);
        let two = generate(&cfg).unwrap();

        let one = generate(&cfg.clone().with_smoothing_iterations(1)).unwrap();
        let mut again = CaveGrid::default();
        smooth_pass(&one, &mut again);

        assert_eq!(two, again);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut generator = CaveGenerator::new();

        assert!(matches!(
            generator.generate(&CaveConfig::new(0, 10)),
            Err(CaveError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generator.generate(&CaveConfig::new(10, 10).with_fill_percent(200)),
            Err(CaveError::InvalidFillPercent(200))
        ));
        assert!(matches!(
            generator.generate(&CaveConfig::new(1, 1).with_smoothing_iterations(u32::MAX)),
            Err(CaveError::TooManyIterations { .. })
        ));
    }

    #[test]
    fn test_regenerate_keeps_last_map() {
        let mut generator = CaveGenerator::new();
        assert!(generator.last_map().is_none());

        let first = generator.regenerate(&config("one")).unwrap().clone();
        assert_eq!(generator.last_map(), Some(&first));

        assert!(generator.regenerate(&CaveConfig::new(0, 0)).is_err());
        assert_eq!(generator.last_map(), Some(&first), "Failed run keeps old map");

        generator.regenerate(&config("two")).unwrap();
        assert_ne!(generator.last_map(), Some(&first));
    }

    #[test]
    fn test_random_seed_resolution() {
        let cfg = config("ignored").with_random_seed(true);
        let seed = resolve_seed(&cfg).unwrap();

        assert_ne!(seed, "ignored");
        assert!(seed.parse::<u128>().is_ok());

        let fixed = config("kept");
        assert_eq!(resolve_seed(&fixed).unwrap(), "kept");
    }

    #[test]
    fn test_report_matches_map() {
        let (map, report) = CaveGenerator::new()
            .generate_with_report(&config("report"))
            .unwrap();

        assert_eq!(report.seed, "report");
        assert_eq!(report.seed_value, crate::rng::hash_seed("report"));
        assert_eq!(report.final_walls, map.wall_count());
        assert_eq!(report.pass_changes.len(), 4);
    }
}
