//! # GROTTO Procedural Generation
//!
//! Deterministic cave maps from seeded noise and cellular-automaton smoothing.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same config and seed always produce the same map
//! 2. **Enclosed**: The border of every map starts out solid
//! 3. **Double buffered**: A smoothing pass never reads its own output
//! 4. **Pure**: No I/O, no rendering, no global state
//!
//! ## Core Components
//!
//! - `CaveRng`: Text seed to reproducible bounded integers
//! - `CaveGrid`: Binary wall/open occupancy grid
//! - `cellular`: Random fill and the 3x3 majority smoothing rule
//! - `CaveGenerator`: Validates a `CaveConfig` and runs the pipeline
//!
//! ## Example
//!
//! ```rust
//! use grotto_procedural::{generate, CaveConfig};
//!
//! let config = CaveConfig::new(80, 40)
//!     .with_seed("mossy-hollow")
//!     .with_fill_percent(45)
//!     .with_smoothing_iterations(5);
//!
//! let map = generate(&config).unwrap();
//!
//! // One visual unit per wall.
//! for (x, y) in map.wall_positions() {
//!     assert!(map.is_wall(x.into(), y.into()));
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cellular;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod rng;

pub use cellular::{random_fill, smooth, smooth_pass, surrounding_wall_count};
pub use config::CaveConfig;
pub use error::{CaveError, CaveResult};
pub use generator::{generate, resolve_seed, CaveGenerator, GenerationReport};
pub use grid::{CaveGrid, Tile};
pub use rng::CaveRng;
