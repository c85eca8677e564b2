//! Reward configuration for the Podium Engine.
//!
//! This module reads the rule files that decide which players receive which
//! prizes: the line-oriented `KEY: value` format used by tournament
//! organisers, and an equivalent YAML rule book.
//!
//! # Example
//!
//! ```no_run
//! use podium_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/palmares.txt").unwrap();
//! println!("Loaded {} rules", config.rules().len());
//! ```

mod loader;
mod parser;
mod types;

pub use loader::ConfigLoader;
pub use parser::ConfigParser;
pub use types::{
    ConfigKey, DEFAULT_ORDER, DEFAULT_TRUSTED_PREFIX, Diagnostic, DiagnosticKind, ParsedConfig,
    Rule, RuleDraft,
};
