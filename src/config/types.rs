//! Configuration types for reward rules.
//!
//! This module contains the rule records produced by the configuration
//! parser, the in-progress [`RuleDraft`] the parser accumulates, and the
//! diagnostics it records for every line or block it had to skip.

use serde::{Deserialize, Deserializer, Serialize};

/// Display order given to rules that do not set one, so they sort last.
pub const DEFAULT_ORDER: i64 = 999;

/// Prefix every source URL must start with to be accepted.
pub const DEFAULT_TRUSTED_PREFIX: &str = "https://echecs.asso.fr";

fn default_order() -> i64 {
    DEFAULT_ORDER
}

/// A validated reward rule.
///
/// A rule always has a non-blank category, a non-blank rank specification
/// and at least one non-blank prize label. The rank specification is kept as written;
/// the assignment engine interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Category name, printed as the section header.
    pub category: String,
    /// Rank specification: `best`, `start-end` or a bare count.
    pub rank: String,
    /// Prize labels, one per awarded place; a blank label awards nothing.
    pub prizes: Vec<String>,
    /// Eligibility condition; `None` means every player is eligible.
    #[serde(default)]
    pub condition: Option<String>,
    /// Display order of the rule's section.
    #[serde(default = "default_order")]
    pub order: i64,
}

/// The recognized configuration keys.
///
/// The canonical vocabulary is French (`CATEGORIE`, `RANG`, `PRIX`, `ORDRE`);
/// the English spellings are accepted as aliases for older files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `URLS`: pipe-delimited list of results pages.
    Sources,
    /// `CATEGORIE` (alias `CATEGORY`).
    Category,
    /// `RANG` (alias `RANK`).
    Rank,
    /// `PRIX` (alias `PRIZE`).
    Prize,
    /// `CONDITION`.
    Condition,
    /// `ORDRE` (alias `ORDER`).
    Order,
}

impl ConfigKey {
    /// Resolves an uppercased key name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "URLS" => Some(ConfigKey::Sources),
            "CATEGORIE" | "CATEGORY" => Some(ConfigKey::Category),
            "RANG" | "RANK" => Some(ConfigKey::Rank),
            "PRIX" | "PRIZE" => Some(ConfigKey::Prize),
            "CONDITION" => Some(ConfigKey::Condition),
            "ORDRE" | "ORDER" => Some(ConfigKey::Order),
            _ => None,
        }
    }

    /// The canonical spelling of the key.
    pub fn canonical_name(self) -> &'static str {
        match self {
            ConfigKey::Sources => "URLS",
            ConfigKey::Category => "CATEGORIE",
            ConfigKey::Rank => "RANG",
            ConfigKey::Prize => "PRIX",
            ConfigKey::Condition => "CONDITION",
            ConfigKey::Order => "ORDRE",
        }
    }
}

/// A rule being accumulated from a configuration block.
///
/// Also the shape of one entry of the `rules` list in a YAML rule book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleDraft {
    /// Category name, if set.
    #[serde(default)]
    pub category: Option<String>,
    /// Raw rank specification, if set.
    #[serde(default, deserialize_with = "string_or_number")]
    pub rank: Option<String>,
    /// Prize labels, if set.
    #[serde(default)]
    pub prizes: Option<Vec<String>>,
    /// Condition expression, if set.
    #[serde(default)]
    pub condition: Option<String>,
    /// Display order, if set.
    #[serde(default)]
    pub order: Option<i64>,
}

impl RuleDraft {
    /// Sets the prize labels from a pipe-delimited value.
    ///
    /// Labels are trimmed. A blank label keeps its place so that the labels
    /// after it still pair with their own standing.
    pub fn set_prizes(&mut self, value: &str) {
        self.prizes = Some(split_prizes(value.split('|')));
    }

    /// Names of the required keys that are missing or blank.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.category.as_deref()) {
            missing.push(ConfigKey::Category.canonical_name());
        }
        if is_blank(self.rank.as_deref()) {
            missing.push(ConfigKey::Rank.canonical_name());
        }
        if self
            .prizes
            .as_ref()
            .is_none_or(|p| p.iter().all(|label| label.trim().is_empty()))
        {
            missing.push(ConfigKey::Prize.canonical_name());
        }
        missing
    }

    /// Validates the draft into a [`Rule`].
    ///
    /// On failure, returns the names of the missing required keys.
    pub fn into_rule(self) -> Result<Rule, Vec<&'static str>> {
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(missing);
        }

        let condition = self
            .condition
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("none"));

        Ok(Rule {
            category: self.category.unwrap_or_default().trim().to_string(),
            rank: self.rank.unwrap_or_default().trim().to_string(),
            prizes: split_prizes(self.prizes.unwrap_or_default().iter().map(String::as_str)),
            condition,
            order: self.order.unwrap_or(DEFAULT_ORDER),
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn split_prizes<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    labels.map(str::trim).map(str::to_string).collect()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// The kind of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A line without a `key: value` separator.
    SyntaxError,
    /// A key outside the recognized vocabulary.
    UnknownKey,
    /// A rule block missing a required key; the block was dropped.
    RuleValidation,
    /// A source URL outside the trusted prefix; the URL was dropped.
    SourceRejected,
    /// An `ORDRE` value that is not an integer; the default order was kept.
    InvalidOrder,
}

/// A problem found while reading a configuration, recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number (the block's first line for rule validation).
    pub line: usize,
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

/// The result of reading a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedConfig {
    /// Valid rules, in file order.
    pub rules: Vec<Rule>,
    /// Trusted source URLs, in file order.
    pub sources: Vec<String>,
    /// Everything that was skipped along the way.
    pub diagnostics: Vec<Diagnostic>,
}
