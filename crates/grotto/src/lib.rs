//! # GROTTO
//!
//! Headless host for the cave generator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   CaveConfig   ┌─────────────────────┐   CaveGrid   ┌──────────┐
//! │ args + TOML  │───────────────>│  grotto_procedural  │─────────────>│  stdout  │
//! └──────────────┘                │  fill -> smooth xN  │              └──────────┘
//!        ^                        └─────────────────────┘                    │
//!        │                 "(re)generate now" (one stdin line)               │
//!        └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `host`: argument parsing, config loading and the regenerate loop

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod host;

/// Re-export of the generation crate.
pub use grotto_procedural as procedural;
