//! Rank specifications.
//!
//! A rule's `RANG` decides how many places it awards: `best` for a single
//! winner, or a count written either as `start-end` or as a bare integer.
//! Only the upper bound of a range matters: `1-3` and `3` both award the
//! top three eligible players.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How many places a rule awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSpec {
    /// A single award to the best eligible player.
    Best,
    /// Awards to the first `n` eligible players.
    Top(usize),
}

impl RankSpec {
    /// Parses a rank specification.
    ///
    /// `category` is only used to build the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium_engine::engine::RankSpec;
    ///
    /// assert_eq!(RankSpec::parse("Best", "Open").unwrap(), RankSpec::Best);
    /// assert_eq!(RankSpec::parse("1-3", "Open").unwrap(), RankSpec::Top(3));
    /// assert_eq!(RankSpec::parse("5", "Open").unwrap(), RankSpec::Top(5));
    /// assert!(RankSpec::parse("top 3", "Open").is_err());
    /// ```
    pub fn parse(spec: &str, category: &str) -> EngineResult<Self> {
        let normalized = spec.trim().to_lowercase();
        if normalized == "best" {
            return Ok(RankSpec::Best);
        }

        let parsed = match normalized.split_once('-') {
            Some((start, end)) => start
                .trim()
                .parse::<usize>()
                .and_then(|_| end.trim().parse::<usize>()),
            None => normalized.parse::<usize>(),
        };

        parsed.map(RankSpec::Top).map_err(|_| EngineError::InvalidRankSpec {
            category: category.to_string(),
            spec: spec.to_string(),
        })
    }

    /// The number of places awarded.
    pub fn places(self) -> usize {
        match self {
            RankSpec::Best => 1,
            RankSpec::Top(n) => n,
        }
    }
}
