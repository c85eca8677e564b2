//! Award model.
//!
//! Awards are produced by the assignment engine only. They carry the owning
//! rule's display order and index so renderers can group them without going
//! back to the rule list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A prize given to one player under one rule.
///
/// # Example
///
/// ```
/// use podium_engine::models::Award;
/// use rust_decimal::Decimal;
///
/// let award = Award {
///     category: "Podium Cadets".to_string(),
///     prize: "1er Cadet".to_string(),
///     player: "Martin Paul".to_string(),
///     rank: 7,
///     points: Decimal::new(55, 1),
///     club: "Echiquier Nantais".to_string(),
///     order: 1,
///     rule_index: 0,
/// };
/// assert_eq!(award.display_key(), (1, 0, 7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// The rule's category name (section header in rendered output).
    pub category: String,
    /// The prize label for this place.
    pub prize: String,
    /// The winner's name.
    pub player: String,
    /// The winner's final standing in the tournament.
    pub rank: u32,
    /// The winner's score.
    pub points: Decimal,
    /// The winner's club.
    pub club: String,
    /// Display order of the owning rule.
    pub order: i64,
    /// Position of the owning rule in the rule list.
    pub rule_index: usize,
}

impl Award {
    /// Sort key used by renderers: display order, then rule, then standing.
    ///
    /// Including the rule index keeps two rules that share a display order in
    /// separate, contiguous sections.
    pub fn display_key(&self) -> (i64, usize, u32) {
        (self.order, self.rule_index, self.rank)
    }

    /// Whether this award opens a new section after `previous`.
    pub fn starts_section_after(&self, previous: Option<&Award>) -> bool {
        previous.is_none_or(|p| (p.order, p.rule_index) != (self.order, self.rule_index))
    }
}

/// Formats a score the way the palmarès prints it: at least one decimal.
///
/// ```
/// use podium_engine::models::format_points;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_points(Decimal::new(6, 0)), "6.0");
/// assert_eq!(format_points(Decimal::new(55, 1)), "5.5");
/// ```
pub fn format_points(points: Decimal) -> String {
    let normalized = points.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(order: i64, rule_index: usize, rank: u32) -> Award {
        Award {
            category: "C".to_string(),
            prize: "P".to_string(),
            player: "X".to_string(),
            rank,
            points: Decimal::new(5, 0),
            club: "Club".to_string(),
            order,
            rule_index,
        }
    }

    #[test]
    fn test_first_award_starts_section() {
        assert!(award(1, 0, 3).starts_section_after(None));
    }

    #[test]
    fn test_same_rule_does_not_start_section() {
        let first = award(1, 0, 3);
        assert!(!award(1, 0, 5).starts_section_after(Some(&first)));
    }

    #[test]
    fn test_same_order_different_rule_starts_section() {
        let first = award(999, 0, 3);
        assert!(award(999, 1, 5).starts_section_after(Some(&first)));
    }

    #[test]
    fn test_format_points_keeps_trailing_zero_once() {
        assert_eq!(format_points(Decimal::new(60, 1)), "6.0");
        assert_eq!(format_points(Decimal::new(0, 0)), "0.0");
        assert_eq!(format_points(Decimal::new(450, 2)), "4.5");
    }

    #[test]
    fn test_award_serializes_points_as_string() {
        let json = serde_json::to_value(award(1, 0, 1)).unwrap();
        assert_eq!(json["points"].as_str().unwrap(), "5");
        assert_eq!(json["rule_index"].as_u64().unwrap(), 0);
    }
}
