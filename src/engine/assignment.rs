//! Prize assignment.
//!
//! Rules are applied independently and in file order: a player may win a
//! prize under several rules. Within a rule, eligible players are ranked by
//! score (highest first) and, at equal score, by tournament standing.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::config::Rule;
use crate::models::{Award, Player};

use super::condition::Condition;
use super::rank_spec::RankSpec;

/// Orders players by descending score, then ascending standing.
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    b.points.cmp(&a.points).then(a.rank.cmp(&b.rank))
}

/// Assigns prizes to players according to `rules`.
///
/// For each rule, players not satisfying the condition are discarded; the
/// rest are ranked with [`compare_players`]. A `best` rule awards its first
/// prize to the top player; a top-N rule pairs the first N players with the
/// prize labels in order and stops when labels run out; a blank label
/// leaves its place without an award. Rules with no
/// eligible player produce nothing; rules with an invalid rank specification
/// are skipped with a warning.
///
/// # Example
///
/// ```
/// use podium_engine::config::Rule;
/// use podium_engine::engine::assign_rewards;
/// use podium_engine::models::Player;
/// use rust_decimal::Decimal;
///
/// let players = vec![
///     Player::from_raw_category(1, "A", "SenM", Decimal::new(60, 1), "Club", 1800),
///     Player::from_raw_category(2, "B", "SenM", Decimal::new(55, 1), "Club", 1700),
/// ];
/// let rules = vec![Rule {
///     category: "TEST".to_string(),
///     rank: "1-1".to_string(),
///     prizes: vec!["1er Test".to_string()],
///     condition: None,
///     order: 1,
/// }];
///
/// let awards = assign_rewards(&players, &rules);
/// assert_eq!(awards.len(), 1);
/// assert_eq!(awards[0].player, "A");
/// assert_eq!(awards[0].prize, "1er Test");
/// ```
pub fn assign_rewards(players: &[Player], rules: &[Rule]) -> Vec<Award> {
    let mut awards = Vec::new();

    for (rule_index, rule) in rules.iter().enumerate() {
        let condition = rule
            .condition
            .as_deref()
            .map_or(Condition::Always, Condition::parse);

        let mut eligible: Vec<&Player> = players.iter().filter(|p| condition.matches(p)).collect();
        if eligible.is_empty() {
            debug!(category = %rule.category, "No eligible player");
            continue;
        }
        eligible.sort_by(|a, b| compare_players(a, b));

        let spec = match RankSpec::parse(&rule.rank, &rule.category) {
            Ok(spec) => spec,
            Err(err) => {
                warn!(category = %rule.category, error = %err, "Rule skipped");
                continue;
            }
        };

        let before = awards.len();
        awards.extend(
            eligible
                .iter()
                .take(spec.places())
                .zip(&rule.prizes)
                .filter(|(_, prize)| !prize.is_empty())
                .map(|(player, prize)| make_award(rule, rule_index, prize, player)),
        );

        debug!(
            category = %rule.category,
            eligible = eligible.len(),
            awarded = awards.len() - before,
            "Rule applied"
        );
    }

    awards
}

fn make_award(rule: &Rule, rule_index: usize, prize: &str, player: &Player) -> Award {
    Award {
        category: rule.category.clone(),
        prize: prize.to_string(),
        player: player.name.clone(),
        rank: player.rank,
        points: player.points,
        club: player.club.clone(),
        order: rule.order,
        rule_index,
    }
}
