//! Configuration module for colhash
//!
//! Provides the CLI arguments and the engine settings derived from them.

mod settings;

pub use settings::*;
