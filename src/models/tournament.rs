//! Tournament models.
//!
//! [`Tournament`] is what the extraction step hands to the engine;
//! [`TournamentAwards`] is what the driver hands to the renderers.

use serde::{Deserialize, Serialize};

use super::{Award, Player};

/// Display name used when a results page has no title row.
pub const UNKNOWN_TOURNAMENT: &str = "Tournoi Inconnu";

/// A tournament's normalized standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament display name.
    pub name: String,
    /// Players ordered by final standing.
    pub players: Vec<Player>,
}

/// The awards computed for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentAwards {
    /// Tournament display name.
    pub name: String,
    /// The source identifier (results page URL).
    pub source: String,
    /// Awards in rule order; renderers sort them by [`Award::display_key`].
    pub awards: Vec<Award>,
}

impl TournamentAwards {
    /// Returns the awards sorted for display.
    pub fn sorted_awards(&self) -> Vec<&Award> {
        let mut awards: Vec<&Award> = self.awards.iter().collect();
        awards.sort_by_key(|a| a.display_key());
        awards
    }
}
