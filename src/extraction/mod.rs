//! Tournament extraction.
//!
//! The engine never fetches pages itself: it asks a [`TournamentSource`]
//! for the standings behind each source identifier. [`FfeSource`] reads the
//! French federation results pages over HTTP; [`StaticSource`] serves
//! standings that are already in memory.

mod ffe;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};
use crate::models::Tournament;

pub use ffe::{FfeSource, parse_results_page};

/// Provides the standings of a tournament given its source identifier.
#[async_trait]
pub trait TournamentSource: Send + Sync {
    /// Fetches and normalizes one tournament.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ExtractionFailed`] when the source cannot be
    /// read or understood. The driver skips that source and carries on.
    async fn fetch(&self, source: &str) -> EngineResult<Tournament>;
}

/// An in-memory [`TournamentSource`].
///
/// # Example
///
/// ```
/// use podium_engine::extraction::{StaticSource, TournamentSource};
/// use podium_engine::models::Tournament;
///
/// let source = StaticSource::new().with_tournament(
///     "https://echecs.asso.fr/t1",
///     Tournament { name: "Open".to_string(), players: vec![] },
/// );
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let tournament = runtime.block_on(source.fetch("https://echecs.asso.fr/t1")).unwrap();
/// assert_eq!(tournament.name, "Open");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tournaments: HashMap<String, Tournament>,
}

impl StaticSource {
    /// Creates an empty source; every fetch fails until tournaments are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the standings served for `source`.
    pub fn with_tournament(mut self, source: impl Into<String>, tournament: Tournament) -> Self {
        self.tournaments.insert(source.into(), tournament);
        self
    }
}

#[async_trait]
impl TournamentSource for StaticSource {
    async fn fetch(&self, source: &str) -> EngineResult<Tournament> {
        self.tournaments
            .get(source)
            .cloned()
            .ok_or_else(|| EngineError::ExtractionFailed {
                url: source.to_string(),
                message: "no standings available for this source".to_string(),
            })
    }
}
