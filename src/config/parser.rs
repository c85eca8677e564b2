//! Line-oriented configuration parser.
//!
//! A configuration file is a sequence of `KEY: value` lines. Rule keys are
//! grouped into blocks that end on a blank line, a `#` comment or the end of
//! the file; the `URLS` key may appear anywhere and feeds the source list.
//!
//! ```text
//! URLS: https://echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/65456/65456&Action=Cl
//!
//! CATEGORIE: Podium Petites Poussines
//! RANG: 1-3
//! PRIX: 1ère|2ème|3ème
//! CONDITION: category == "ppo" et genre == "f"
//! ORDRE: 2
//! ```
//!
//! Parsing is fail-soft: a bad line or an incomplete block is reported as a
//! [`Diagnostic`] and skipped. Only a configuration without any trusted
//! source is rejected as a whole.

use tracing::{error, info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{
    ConfigKey, DEFAULT_TRUSTED_PREFIX, Diagnostic, DiagnosticKind, ParsedConfig, RuleDraft,
};

/// Parses configuration text into rules and sources.
///
/// # Example
///
/// ```
/// use podium_engine::config::ConfigParser;
///
/// let text = "URLS: https://echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/1/1&Action=Cl\n\
///             \n\
///             CATEGORIE: Open\n\
///             RANG: 1-3\n\
///             PRIX: 1er|2e|3e\n";
///
/// let parsed = ConfigParser::new().parse(text).unwrap();
/// assert_eq!(parsed.sources.len(), 1);
/// assert_eq!(parsed.rules[0].prizes, vec!["1er", "2e", "3e"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigParser {
    trusted_prefix: String,
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the parser stands with respect to rule blocks.
enum BlockState {
    /// Between blocks.
    Idle,
    /// Inside a block that started on `start_line`.
    Accumulating { start_line: usize, draft: RuleDraft },
}

/// Mutable state for a single parse call.
struct ParseRun<'a> {
    parser: &'a ConfigParser,
    state: BlockState,
    parsed: ParsedConfig,
}

impl ConfigParser {
    /// Creates a parser trusting [`DEFAULT_TRUSTED_PREFIX`].
    pub fn new() -> Self {
        Self::with_trusted_prefix(DEFAULT_TRUSTED_PREFIX)
    }

    /// Creates a parser that only accepts sources starting with `prefix`.
    pub fn with_trusted_prefix(prefix: impl Into<String>) -> Self {
        Self {
            trusted_prefix: prefix.into(),
        }
    }

    /// Returns the trusted source prefix.
    pub fn trusted_prefix(&self) -> &str {
        &self.trusted_prefix
    }

    /// Returns true if `source` may be fetched.
    ///
    /// The prefix must end on a host or path boundary: after it comes the end
    /// of the URL, `/`, `?` or `#`, unless the prefix itself ends with `/`.
    /// `https://echecs.asso.fr.other.net/` and `https://echecs.asso.fr@other.net/`
    /// are therefore rejected.
    pub fn is_trusted(&self, source: &str) -> bool {
        source.strip_prefix(self.trusted_prefix.as_str()).is_some_and(|rest| {
            self.trusted_prefix.ends_with('/')
                || rest.is_empty()
                || rest.starts_with(['/', '?', '#'])
        })
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSources`] when no trusted source survives.
    /// A configuration without any valid rule is not an error.
    pub fn parse(&self, text: &str) -> EngineResult<ParsedConfig> {
        let parsed = self.parse_lenient(text);

        if parsed.sources.is_empty() {
            error!("No valid source URL in the configuration");
            return Err(EngineError::NoSources);
        }

        Ok(parsed)
    }

    /// Parses configuration text without requiring any source.
    ///
    /// Used when players are supplied directly instead of being fetched.
    pub fn parse_lenient(&self, text: &str) -> ParsedConfig {
        let mut run = ParseRun {
            parser: self,
            state: BlockState::Idle,
            parsed: ParsedConfig::default(),
        };

        for (index, raw_line) in text.lines().enumerate() {
            run.process_line(index + 1, raw_line);
        }
        run.flush();

        let parsed = run.parsed;
        info!(
            sources = parsed.sources.len(),
            rules = parsed.rules.len(),
            diagnostics = parsed.diagnostics.len(),
            "Configuration parsed"
        );
        parsed
    }
}

impl ParseRun<'_> {
    fn process_line(&mut self, line_number: usize, raw_line: &str) {
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            self.flush();
            return;
        }

        let Some((raw_key, value)) = line.split_once(':') else {
            self.record(
                line_number,
                DiagnosticKind::SyntaxError,
                format!("missing ':' separator in '{}'", line),
            );
            return;
        };

        let key_name = raw_key.trim().to_uppercase();
        let value = value.trim();

        let Some(key) = ConfigKey::from_name(&key_name) else {
            self.record(
                line_number,
                DiagnosticKind::UnknownKey,
                format!("unknown key '{}' ignored", key_name),
            );
            return;
        };

        match key {
            ConfigKey::Sources => self.collect_sources(line_number, value),
            ConfigKey::Order => match value.parse::<i64>() {
                Ok(order) => self.draft(line_number).order = Some(order),
                Err(_) => {
                    // The block still exists even though its order is unusable.
                    self.draft(line_number);
                    self.record(
                        line_number,
                        DiagnosticKind::InvalidOrder,
                        format!("ORDRE '{}' is not an integer, default order kept", value),
                    );
                }
            },
            ConfigKey::Category => self.draft(line_number).category = Some(value.to_string()),
            ConfigKey::Rank => self.draft(line_number).rank = Some(value.to_string()),
            ConfigKey::Prize => self.draft(line_number).set_prizes(value),
            ConfigKey::Condition => self.draft(line_number).condition = Some(value.to_string()),
        }
    }

    fn collect_sources(&mut self, line_number: usize, value: &str) {
        for source in value.split('|').map(str::trim).filter(|s| !s.is_empty()) {
            if self.parser.is_trusted(source) {
                self.parsed.sources.push(source.to_string());
            } else {
                self.record(
                    line_number,
                    DiagnosticKind::SourceRejected,
                    format!("untrusted source ignored: {}", source),
                );
            }
        }
    }

    /// Returns the open draft, opening a block on `line_number` if needed.
    fn draft(&mut self, line_number: usize) -> &mut RuleDraft {
        if matches!(self.state, BlockState::Idle) {
            self.state = BlockState::Accumulating {
                start_line: line_number,
                draft: RuleDraft::default(),
            };
        }

        match &mut self.state {
            BlockState::Accumulating { draft, .. } => draft,
            BlockState::Idle => unreachable!("block opened above"),
        }
    }

    /// Validates and closes the open block, if any.
    fn flush(&mut self) {
        let BlockState::Accumulating { start_line, draft } =
            std::mem::replace(&mut self.state, BlockState::Idle)
        else {
            return;
        };

        match draft.into_rule() {
            Ok(rule) => self.parsed.rules.push(rule),
            Err(missing) => self.record(
                start_line,
                DiagnosticKind::RuleValidation,
                format!("rule ignored, missing keys: {}", missing.join(", ")),
            ),
        }
    }

    fn record(&mut self, line: usize, kind: DiagnosticKind, message: String) {
        match kind {
            DiagnosticKind::SourceRejected | DiagnosticKind::InvalidOrder => {
                warn!(line, ?kind, "{}", message)
            }
            _ => error!(line, ?kind, "{}", message),
        }
        self.parsed.diagnostics.push(Diagnostic {
            line,
            kind,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ORDER;

    const URL: &str = "https://echecs.asso.fr/Resultats.aspx?URL=Tournois/Id/65456/65456&Action=Cl";

    fn parse(text: &str) -> ParsedConfig {
        ConfigParser::new().parse_lenient(text)
    }

    fn kinds(parsed: &ParsedConfig) -> Vec<DiagnosticKind> {
        parsed.diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_parses_example_configuration() {
        let text = format!(
            "URLS: {URL}\n\
             \n\
             CATEGORIE: Podium Petits Poussins\n\
             RANG: 1-3\n\
             PRIX: 1er Petit Poussin|2ème Petit Poussin|3ème Petit Poussin\n\
             CONDITION: category == \"ppo\"\n\
             ORDRE: 1\n\
             \n\
             CATEGORIE: Podium Petites Poussines\n\
             RANG: 1-3\n\
             PRIX: 1ère|2ème|3ème\n\
             CONDITION: category == \"ppo\" et genre == \"f\"\n\
             ORDRE: 2\n"
        );

        let parsed = ConfigParser::new().parse(&text).unwrap();
        assert_eq!(parsed.sources, vec![URL]);
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(parsed.rules[0].category, "Podium Petits Poussins");
        assert_eq!(parsed.rules[0].rank, "1-3");
        assert_eq!(parsed.rules[0].order, 1);
        assert_eq!(
            parsed.rules[1].condition.as_deref(),
            Some("category == \"ppo\" et genre == \"f\"")
        );
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_last_block_without_trailing_blank_line_is_flushed() {
        let parsed = parse("CATEGORIE: Open\nRANG: best\nPRIX: Vainqueur");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].order, DEFAULT_ORDER);
    }

    #[test]
    fn test_comment_terminates_block() {
        let parsed = parse("CATEGORIE: A\nRANG: 1\nPRIX: x\n# next\nCATEGORIE: B\nRANG: 1\nPRIX: y");
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(parsed.rules[1].category, "B");
    }

    #[test]
    fn test_line_without_separator_is_skipped() {
        let parsed = parse("CATEGORIE: A\nRANG 1-3\nRANG: 1-3\nPRIX: x");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::SyntaxError]);
        assert_eq!(parsed.diagnostics[0].line, 2);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let parsed = parse("CATEGORIE: A\nRANG: 1\nPRIX: x\nCOULEUR: bleu");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::UnknownKey]);
        assert!(parsed.diagnostics[0].message.contains("COULEUR"));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let parsed = parse("categorie: A\nRang: 1\nprix: x");
        assert_eq!(parsed.rules.len(), 1);
    }

    #[test]
    fn test_english_aliases_are_accepted() {
        let parsed = parse("CATEGORY: A\nRANK: 1-2\nPRIZE: x|y\nORDER: 4");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].order, 4);
    }

    #[test]
    fn test_incomplete_block_is_dropped_not_merged() {
        let parsed = parse("CATEGORIE: A\nRANG: 1\n\nPRIX: x\nCATEGORIE: B\nRANG: 2");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].category, "B");
        assert_eq!(parsed.rules[0].prizes, vec!["x"]);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::RuleValidation]);
        assert_eq!(parsed.diagnostics[0].line, 1);
        assert!(parsed.diagnostics[0].message.contains("PRIX"));
    }

    #[test]
    fn test_later_key_overwrites_earlier_in_block() {
        let parsed = parse("CATEGORIE: A\nRANG: 1\nRANG: 1-5\nPRIX: x");
        assert_eq!(parsed.rules[0].rank, "1-5");
    }

    #[test]
    fn test_sources_are_filtered_by_trusted_prefix() {
        let text = format!("URLS: {URL} | https://evil.example/x |  | {URL}2");
        let parsed = parse(&text);
        assert_eq!(parsed.sources, vec![URL.to_string(), format!("{URL}2")]);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::SourceRejected]);
    }

    #[test]
    fn test_trusted_prefix_stops_at_host_boundary() {
        let parser = ConfigParser::new();
        assert!(parser.is_trusted("https://echecs.asso.fr"));
        assert!(parser.is_trusted("https://echecs.asso.fr/Resultats.aspx"));
        assert!(parser.is_trusted("https://echecs.asso.fr?URL=x"));
        assert!(!parser.is_trusted("https://echecs.asso.fr.other.net/x"));
        assert!(!parser.is_trusted("https://echecs.asso.fr@other.net/x"));
        assert!(!parser.is_trusted("https://echecs.asso.france/x"));

        let with_path = ConfigParser::with_trusted_prefix("https://echecs.asso.fr/Resultats");
        assert!(with_path.is_trusted("https://echecs.asso.fr/Resultats.aspx?URL=x"));
    }

    #[test]
    fn test_sources_line_inside_block_does_not_open_or_close_it() {
        let text = format!("CATEGORIE: A\nURLS: {URL}\nRANG: 1\nPRIX: x");
        let parsed = parse(&text);
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.sources.len(), 1);
    }

    #[test]
    fn test_value_may_contain_colons() {
        let parsed = parse("CATEGORIE: Open: A\nRANG: 1\nPRIX: x");
        assert_eq!(parsed.rules[0].category, "Open: A");
    }

    #[test]
    fn test_invalid_order_keeps_default() {
        let parsed = parse("CATEGORIE: A\nRANG: 1\nPRIX: x\nORDRE: premier");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].order, DEFAULT_ORDER);
        assert_eq!(kinds(&parsed), vec![DiagnosticKind::InvalidOrder]);
    }

    #[test]
    fn test_no_sources_is_fatal() {
        let result = ConfigParser::new().parse("CATEGORIE: A\nRANG: 1\nPRIX: x");
        assert!(matches!(result, Err(EngineError::NoSources)));
    }

    #[test]
    fn test_only_untrusted_sources_is_fatal() {
        let result = ConfigParser::new().parse("URLS: http://echecs.asso.fr/x");
        assert!(matches!(result, Err(EngineError::NoSources)));
    }

    #[test]
    fn test_sources_without_rules_is_accepted() {
        let parsed = ConfigParser::new().parse(&format!("URLS: {URL}")).unwrap();
        assert!(parsed.rules.is_empty());
    }

    #[test]
    fn test_custom_trusted_prefix() {
        let parser = ConfigParser::with_trusted_prefix("https://results.example");
        let parsed = parser
            .parse(&format!("URLS: https://results.example/1|{URL}"))
            .unwrap();
        assert_eq!(parsed.sources, vec!["https://results.example/1"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("CATEGORIE: A\r\nRANG: 1\r\nPRIX: x\r\n\r\n");
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].prizes, vec!["x"]);
    }
}
