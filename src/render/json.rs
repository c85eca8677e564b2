//! JSON palmarès document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Award, TournamentAwards};

use super::sections;

/// The printable palmarès as a structured document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalmaresDocument {
    /// When the document was produced.
    pub generated_at: DateTime<Utc>,
    /// Tournaments in source order.
    pub tournaments: Vec<DocumentTournament>,
}

/// One tournament of a [`PalmaresDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTournament {
    /// Tournament display name.
    pub name: String,
    /// Results page the standings came from.
    pub source: String,
    /// Sections in display order.
    pub sections: Vec<DocumentSection>,
}

/// One category section of a [`DocumentTournament`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    /// Category header.
    pub category: String,
    /// Display order of the rule behind the section.
    pub order: i64,
    /// Awards by standing.
    pub awards: Vec<Award>,
}

impl PalmaresDocument {
    /// Builds the document for a batch run.
    pub fn build(tournaments: &[TournamentAwards], generated_at: DateTime<Utc>) -> Self {
        let tournaments = tournaments
            .iter()
            .map(|tournament| DocumentTournament {
                name: tournament.name.clone(),
                source: tournament.source.clone(),
                sections: sections(tournament)
                    .into_iter()
                    .map(|section| DocumentSection {
                        category: section.category.to_string(),
                        order: section.order,
                        awards: section.awards.into_iter().cloned().collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at,
            tournaments,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
