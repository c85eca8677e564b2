//! Player model and attribute lookup.
//!
//! A [`Player`] is one line of a tournament standings table, normalized by
//! the extraction step: category codes are uppercased and the trailing
//! gender letter is split off, so that conditions can compare attributes
//! without caring about how the page spelled them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Club label used when the standings table leaves the club cell blank.
pub const UNKNOWN_CLUB: &str = "Club inconnu";

fn default_club() -> String {
    UNKNOWN_CLUB.to_string()
}

/// Represents a player in a tournament standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Final standing in the tournament (1 is the winner).
    pub rank: u32,
    /// Player name as printed on the results page.
    pub name: String,
    /// Age category code, uppercased (e.g. "PPO", "CAD", "SEN").
    pub category: String,
    /// Gender tag split off the category code ('M' or 'F'), if any.
    #[serde(default)]
    pub genre: Option<char>,
    /// Tournament score; half points are represented exactly.
    pub points: Decimal,
    /// Club name.
    #[serde(default = "default_club")]
    pub club: String,
    /// Rating, 0 when the player has none.
    #[serde(default)]
    pub elo: u32,
}

/// A player attribute as seen by condition expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A textual attribute (name, category, gender, club).
    Text(String),
    /// A numeric attribute (rank, points, rating).
    Number(Decimal),
}

impl AttributeValue {
    /// Returns the attribute as text, the way it is compared by `==`.
    ///
    /// Numbers are normalized first, so a score read as `6` or `6.0` gives
    /// the same text.
    pub fn as_text(&self) -> String {
        match self {
            AttributeValue::Text(text) => text.clone(),
            AttributeValue::Number(number) => number.normalize().to_string(),
        }
    }

    /// Returns the numeric value; text attributes count as zero.
    pub fn as_number(&self) -> Decimal {
        match self {
            AttributeValue::Number(number) => *number,
            AttributeValue::Text(_) => Decimal::ZERO,
        }
    }
}

impl Player {
    /// Builds a player from a raw federation category code such as "PpoF".
    ///
    /// A trailing `M`/`F` (any case) is split off as the gender tag and the
    /// remaining code is uppercased. A blank club falls back to
    /// [`UNKNOWN_CLUB`].
    ///
    /// # Examples
    ///
    /// ```
    /// use podium_engine::models::Player;
    /// use rust_decimal::Decimal;
    ///
    /// let player = Player::from_raw_category(3, "Durand Alice", "PpoF", Decimal::new(45, 1), "", 1210);
    /// assert_eq!(player.category, "PPO");
    /// assert_eq!(player.genre, Some('F'));
    /// assert_eq!(player.club, "Club inconnu");
    /// ```
    pub fn from_raw_category(
        rank: u32,
        name: &str,
        raw_category: &str,
        points: Decimal,
        club: &str,
        elo: u32,
    ) -> Self {
        let raw_category = raw_category.trim();
        let (category, genre) = match raw_category.chars().last() {
            Some(last) if matches!(last, 'M' | 'F' | 'm' | 'f') => (
                &raw_category[..raw_category.len() - last.len_utf8()],
                Some(last.to_ascii_uppercase()),
            ),
            _ => (raw_category, None),
        };

        let club = club.trim();
        Self {
            rank,
            name: name.trim().to_string(),
            category: category.to_uppercase(),
            genre,
            points,
            club: if club.is_empty() {
                default_club()
            } else {
                club.to_string()
            },
            elo,
        }
    }

    /// Looks up an attribute by the name used in condition expressions.
    ///
    /// Names are case-sensitive. `gender`, `score` and `rating` are accepted
    /// as aliases of `genre`, `points` and `elo`. Returns `None` for unknown
    /// names and for an absent gender tag.
    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        match key {
            "rank" => Some(AttributeValue::Number(Decimal::from(self.rank))),
            "name" => Some(AttributeValue::Text(self.name.clone())),
            "category" => Some(AttributeValue::Text(self.category.clone())),
            "genre" | "gender" => self.genre.map(|g| AttributeValue::Text(g.to_string())),
            "points" | "score" => Some(AttributeValue::Number(self.points)),
            "club" => Some(AttributeValue::Text(self.club.clone())),
            "elo" | "rating" => Some(AttributeValue::Number(Decimal::from(self.elo))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_raw_category_with_female_suffix() {
        let player = Player::from_raw_category(1, "A", "PpoF", dec("6"), "Echiquier Nantais", 0);
        assert_eq!(player.category, "PPO");
        assert_eq!(player.genre, Some('F'));
    }

    #[test]
    fn test_raw_category_with_lowercase_male_suffix() {
        let player = Player::from_raw_category(1, "A", "cadm", dec("6"), "Club", 0);
        assert_eq!(player.category, "CAD");
        assert_eq!(player.genre, Some('M'));
    }

    #[test]
    fn test_raw_category_without_suffix() {
        let player = Player::from_raw_category(1, "A", "Vet", dec("6"), "Club", 0);
        assert_eq!(player.category, "VET");
        assert_eq!(player.genre, None);
    }

    #[test]
    fn test_blank_club_defaults_to_unknown() {
        let player = Player::from_raw_category(1, "A", "Sen", dec("6"), "   ", 0);
        assert_eq!(player.club, UNKNOWN_CLUB);
    }

    #[test]
    fn test_attribute_lookup_and_aliases() {
        let player = Player::from_raw_category(4, "A", "MinF", dec("5.5"), "Club", 1432);
        assert_eq!(
            player.attribute("elo"),
            Some(AttributeValue::Number(dec("1432")))
        );
        assert_eq!(player.attribute("rating"), player.attribute("elo"));
        assert_eq!(player.attribute("score"), player.attribute("points"));
        assert_eq!(
            player.attribute("gender"),
            Some(AttributeValue::Text("F".to_string()))
        );
        assert_eq!(player.attribute("Elo"), None);
    }

    #[test]
    fn test_absent_gender_is_no_attribute() {
        let player = Player::from_raw_category(1, "A", "Sen", dec("6"), "Club", 0);
        assert_eq!(player.attribute("genre"), None);
    }

    #[test]
    fn test_text_attribute_counts_as_zero() {
        assert_eq!(
            AttributeValue::Text("CAD".to_string()).as_number(),
            Decimal::ZERO
        );
        assert_eq!(AttributeValue::Number(dec("5.5")).as_text(), "5.5");
        assert_eq!(AttributeValue::Number(dec("6.0")).as_text(), "6");
        assert_eq!(AttributeValue::Number(dec("6")).as_text(), "6");
    }

    #[test]
    fn test_deserialize_player_with_defaults() {
        let json = r#"{
            "rank": 2,
            "name": "B",
            "category": "SEN",
            "points": "5.5"
        }"#;

        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.points, dec("5.5"));
        assert_eq!(player.club, UNKNOWN_CLUB);
        assert_eq!(player.elo, 0);
        assert_eq!(player.genre, None);
    }
}
