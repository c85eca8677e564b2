//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading reward rules
//! and sources from disk.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::error::{EngineError, EngineResult};

use super::parser::ConfigParser;
use super::types::{Diagnostic, DiagnosticKind, ParsedConfig, Rule, RuleDraft};

/// A rule book already split into sources and rules, read from YAML.
///
/// ```yaml
/// sources:
///   - https://echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/65456/65456&Action=Cl
/// rules:
///   - category: Podium Cadets
///     rank: 1-3
///     prizes: [1er Cadet, 2ème Cadet, 3ème Cadet]
///     condition: category == "cad"
///     order: 1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
struct RuleBook {
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    rules: Vec<RuleDraft>,
}

/// Loads and provides access to a reward configuration.
///
/// Files ending in `.yaml` or `.yml` are read as a rule book; anything else
/// is read with the line-oriented [`ConfigParser`]. Both paths apply the same
/// validation: incomplete rules and untrusted sources are dropped with a
/// diagnostic, and a configuration without any trusted source is rejected.
///
/// # Example
///
/// ```no_run
/// use podium_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/palmares.txt")?;
/// println!("{} rules, {} sources", loader.rules().len(), loader.sources().len());
/// # Ok::<(), podium_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ParsedConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file with the default parser.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable
    /// - A YAML rule book is not valid YAML
    /// - No trusted source remains after validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::load_with_parser(path, &ConfigParser::new())
    }

    /// Loads configuration from the specified file with a custom parser.
    pub fn load_with_parser<P: AsRef<Path>>(path: P, parser: &ConfigParser) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| {
            error!(path = %path_str, "Configuration file not found");
            EngineError::ConfigNotFound {
                path: path_str.clone(),
            }
        })?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");

        let config = if is_yaml {
            Self::load_rule_book(&content, &path_str, parser)?
        } else {
            parser.parse(&content)?
        };

        info!(
            path = %path_str,
            sources = config.sources.len(),
            rules = config.rules.len(),
            "Configuration loaded"
        );

        Ok(Self { config })
    }

    /// Parses and validates a YAML rule book.
    ///
    /// Diagnostics carry the 1-based position of the offending entry in its
    /// list instead of a line number.
    fn load_rule_book(
        content: &str,
        path_str: &str,
        parser: &ConfigParser,
    ) -> EngineResult<ParsedConfig> {
        let book: RuleBook =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.to_string(),
                message: e.to_string(),
            })?;

        let mut config = ParsedConfig::default();

        for (index, source) in book.sources.iter().enumerate() {
            let source = source.trim();
            if parser.is_trusted(source) {
                config.sources.push(source.to_string());
            } else {
                warn!(entry = index + 1, source, "Untrusted source ignored");
                config.diagnostics.push(Diagnostic {
                    line: index + 1,
                    kind: DiagnosticKind::SourceRejected,
                    message: format!("untrusted source ignored: {}", source),
                });
            }
        }

        for (index, draft) in book.rules.into_iter().enumerate() {
            match draft.into_rule() {
                Ok(rule) => config.rules.push(rule),
                Err(missing) => {
                    error!(entry = index + 1, ?missing, "Rule ignored");
                    config.diagnostics.push(Diagnostic {
                        line: index + 1,
                        kind: DiagnosticKind::RuleValidation,
                        message: format!("rule ignored, missing keys: {}", missing.join(", ")),
                    });
                }
            }
        }

        if config.sources.is_empty() {
            error!(path = %path_str, "No valid source URL in the configuration");
            return Err(EngineError::NoSources);
        }

        Ok(config)
    }

    /// Returns the validated rules, in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.config.rules
    }

    /// Returns the trusted sources, in file order.
    pub fn sources(&self) -> &[String] {
        &self.config.sources
    }

    /// Returns the diagnostics recorded while loading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.config.diagnostics
    }

    /// Consumes the loader, returning the parsed configuration.
    pub fn into_config(self) -> ParsedConfig {
        self.config
    }
}
