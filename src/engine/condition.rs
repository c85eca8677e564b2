//! Eligibility conditions.
//!
//! Conditions are a small language over player attributes:
//!
//! ```text
//! category == "cad"
//! elo < 1500
//! category == "ppo" et genre == "f"
//! category == "min" ou elo > 1000
//! ```
//!
//! An expression is split on one keyword only: `et` (AND) is looked for
//! first, then `ou` (OR). There are no parentheses and the two keywords
//! cannot be mixed in one expression. Anything that does not parse evaluates
//! to `false`.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::models::{AttributeValue, Player};

static CONJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+et\s+").expect("conjunction pattern is valid"));

static DISJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+ou\s+").expect("disjunction pattern is valid"));

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl NumericOp {
    fn apply(self, left: Decimal, right: Decimal) -> bool {
        match self {
            NumericOp::Lt => left < right,
            NumericOp::Le => left <= right,
            NumericOp::Gt => left > right,
            NumericOp::Ge => left >= right,
        }
    }
}

/// A single comparison against one player attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Case-insensitive string equality.
    Equals {
        /// Attribute name.
        key: String,
        /// Expected value, quotes stripped.
        value: String,
    },
    /// Numeric comparison; `value` is `None` when the literal is not a number.
    Numeric {
        /// Attribute name.
        key: String,
        /// Operator.
        op: NumericOp,
        /// Right-hand side.
        value: Option<Decimal>,
    },
    /// Text that matches neither form.
    Invalid,
}

/// A parsed condition expression.
///
/// # Example
///
/// ```
/// use podium_engine::engine::Condition;
/// use podium_engine::models::Player;
/// use rust_decimal::Decimal;
///
/// let player = Player::from_raw_category(5, "Durand Alice", "PpoF", Decimal::new(5, 0), "Club", 1180);
/// let condition = Condition::parse("category == \"ppo\" et genre == \"f\"");
/// assert!(condition.matches(&player));
/// assert!(!Condition::parse("elo >= 1200").matches(&player));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Empty or `none`: every player matches.
    Always,
    /// One comparison.
    Single(Comparison),
    /// Fragments joined by `et`.
    All(Vec<Comparison>),
    /// Fragments joined by `ou`.
    Any(Vec<Comparison>),
}

impl Condition {
    /// Parses a condition expression. Never fails.
    pub fn parse(expression: &str) -> Self {
        let expression = expression.trim();
        if expression.is_empty() || expression.eq_ignore_ascii_case("none") {
            return Condition::Always;
        }

        if CONJUNCTION.is_match(expression) {
            return Condition::All(split_comparisons(&CONJUNCTION, expression));
        }
        if DISJUNCTION.is_match(expression) {
            return Condition::Any(split_comparisons(&DISJUNCTION, expression));
        }

        Condition::Single(Comparison::parse(expression))
    }

    /// Returns true if `player` satisfies the condition.
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Condition::Always => true,
            Condition::Single(comparison) => comparison.matches(player),
            Condition::All(comparisons) => comparisons.iter().all(|c| c.matches(player)),
            Condition::Any(comparisons) => comparisons.iter().any(|c| c.matches(player)),
        }
    }
}

fn split_comparisons(keyword: &Regex, expression: &str) -> Vec<Comparison> {
    keyword.split(expression).map(Comparison::parse).collect()
}

fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'')
}

impl Comparison {
    /// Parses one comparison. `==` is recognized before `<`/`>`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Some((key, value)) = text.split_once("==") {
            return Comparison::Equals {
                key: strip_quotes(key).to_string(),
                value: strip_quotes(value).to_string(),
            };
        }

        let Some(position) = text.find(['<', '>']) else {
            return Comparison::Invalid;
        };

        let rest = &text[position + 1..];
        let (op, value) = match (&text[position..=position], rest.strip_prefix('=')) {
            ("<", Some(value)) => (NumericOp::Le, value),
            (">", Some(value)) => (NumericOp::Ge, value),
            ("<", None) => (NumericOp::Lt, rest),
            _ => (NumericOp::Gt, rest),
        };

        Comparison::Numeric {
            key: text[..position].trim().to_string(),
            op,
            value: Decimal::from_str(value.trim()).ok(),
        }
    }

    /// Returns true if `player` satisfies the comparison.
    ///
    /// `==` compares numeric attributes by value when the literal is a
    /// number (`points == 6` matches a score of `6.0`) and everything else
    /// as case-insensitive text. Missing attributes compare as the empty
    /// string for `==` and as zero for numeric operators; text attributes
    /// also count as zero.
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Comparison::Equals { key, value } => match player.attribute(key) {
                Some(AttributeValue::Number(actual)) => match Decimal::from_str(value) {
                    Ok(expected) => actual == expected,
                    Err(_) => actual.normalize().to_string() == value.to_uppercase(),
                },
                Some(attribute) => attribute.as_text().trim().to_uppercase() == value.to_uppercase(),
                None => value.is_empty(),
            },
            Comparison::Numeric { key, op, value } => {
                let Some(expected) = value else {
                    return false;
                };
                let actual = player
                    .attribute(key)
                    .as_ref()
                    .map_or(Decimal::ZERO, AttributeValue::as_number);
                op.apply(actual, *expected)
            }
            Comparison::Invalid => false,
        }
    }
}

/// Evaluates a condition expression against a player.
///
/// Shorthand for `Condition::parse(expression).matches(player)`.
pub fn evaluate(player: &Player, expression: &str) -> bool {
    Condition::parse(expression).matches(player)
}
