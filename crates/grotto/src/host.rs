//! # Headless Host
//!
//! Thin glue between a terminal and the generator: reads arguments, loads
//! the config once, prints each map as text and regenerates whenever a line
//! arrives on the input.
//!
//! ## Input Lines
//!
//! | line        | action      |
//! |-------------|-------------|
//! | empty / `r` | regenerate  |
//! | `q`         | quit        |
//!
//! Anything else is reported and ignored.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use grotto_procedural::{CaveConfig, CaveError, CaveGenerator, GenerationReport};
use thiserror::Error;

/// Usage text printed for `--help` and argument errors.
pub const USAGE: &str = "\
usage: grotto [CONFIG.toml] [--random] [--once]

  CONFIG.toml   cave parameters (defaults: 256x128, 40% fill, 5 passes)
  --random      derive a fresh seed from the clock on every run
  --once        print one map and exit
";

/// Errors surfaced by the host.
#[derive(Error, Debug)]
pub enum HostError {
    /// Unrecognized command-line flag.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// More than one config path given.
    #[error("only one config file may be given (got {first} and {second})")]
    DuplicateConfig {
        /// Path seen first.
        first: String,
        /// Path seen second.
        second: String,
    },

    /// Generation or config loading failed.
    #[error(transparent)]
    Cave(#[from] CaveError),

    /// Writing output or reading input failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostArgs {
    /// TOML config to load, defaults when absent.
    pub config_path: Option<PathBuf>,
    /// Force wall-clock seeding.
    pub random_seed: bool,
    /// Exit after the first map.
    pub once: bool,
    /// Print usage and exit.
    pub help: bool,
}

impl HostArgs {
    /// Parses arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownArgument`] for unknown flags and
    /// [`HostError::DuplicateConfig`] for a second positional path.
    pub fn parse<I>(args: I) -> Result<Self, HostError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut parsed = Self::default();
        for arg in args {
            let arg: String = arg.into();
            match arg.as_str() {
                "--random" => parsed.random_seed = true,
                "--once" => parsed.once = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') => {
                    return Err(HostError::UnknownArgument(flag.to_owned()));
                }
                _ => {
                    if let Some(first) = &parsed.config_path {
                        return Err(HostError::DuplicateConfig {
                            first: first.display().to_string(),
                            second: arg,
                        });
                    }
                    parsed.config_path = Some(PathBuf::from(arg));
                }
            }
        }
        Ok(parsed)
    }

    /// Loads the config named by the arguments and applies flag overrides.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Cave`] if the file cannot be read or is invalid.
    pub fn load_config(&self) -> Result<CaveConfig, HostError> {
        let mut config = match &self.config_path {
            Some(path) => {
                let config = CaveConfig::from_toml_file(path)?;
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            None => CaveConfig::default(),
        };
        if self.random_seed {
            config.use_random_seed = true;
        }
        Ok(config)
    }
}

/// What an input line asks the host to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Generate a new map.
    Regenerate,
    /// Stop.
    Quit,
    /// Not understood.
    Unknown,
}

impl Trigger {
    /// Interprets one input line.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        match line.trim() {
            "" | "r" | "R" => Self::Regenerate,
            "q" | "Q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// One-line summary of a run.
#[must_use]
pub fn describe(config: &CaveConfig, report: &GenerationReport) -> String {
    format!(
        "seed {:?} ({:#018x}) | {}x{} | fill {}% | {} passes | walls {} -> {} | {} | {:.2?}",
        report.seed,
        report.seed_value,
        config.width,
        config.height,
        config.fill_percent,
        report.pass_changes.len(),
        report.filled_walls,
        report.final_walls,
        if report.converged() { "stable" } else { "still changing" },
        report.elapsed,
    )
}

fn emit<W: Write>(
    generator: &mut CaveGenerator,
    config: &CaveConfig,
    out: &mut W,
) -> Result<(), HostError> {
    let (map, report) = generator.generate_with_report(config)?;
    tracing::info!(seed = %report.seed, walls = report.final_walls, "map generated");
    write!(out, "{map}")?;
    writeln!(out, "{}", describe(config, &report))?;
    Ok(())
}

/// Prints a map, then one more for every regenerate line until quit or end
/// of input. Returns how many maps were printed.
///
/// # Errors
///
/// Returns the first generation or I/O failure.
pub fn run<R: BufRead, W: Write>(
    config: &CaveConfig,
    input: R,
    mut out: W,
    once: bool,
) -> Result<usize, HostError> {
    let mut generator = CaveGenerator::new();
    emit(&mut generator, config, &mut out)?;
    let mut maps = 1;
    if once {
        return Ok(maps);
    }

    writeln!(out, "[enter] regenerate  [q] quit")?;
    out.flush()?;
    for line in input.lines() {
        match Trigger::from_line(&line?) {
            Trigger::Regenerate => {
                emit(&mut generator, config, &mut out)?;
                maps += 1;
            }
            Trigger::Quit => break,
            Trigger::Unknown => writeln!(out, "?  [enter] regenerate  [q] quit")?,
        }
        out.flush()?;
    }
    Ok(maps)
}
