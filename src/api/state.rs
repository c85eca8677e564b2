//! Application state for the Podium Engine API.

use std::sync::Arc;

use crate::config::ConfigParser;
use crate::extraction::TournamentSource;

/// Shared application state.
///
/// Holds the tournament source used by palmarès runs and the configuration
/// parser (with its trusted source prefix). Both are read-only; every
/// request performs its own independent run.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn TournamentSource>,
    parser: Arc<ConfigParser>,
}

impl AppState {
    /// Creates the state from a tournament source and a configuration parser.
    pub fn new(source: impl TournamentSource + 'static, parser: ConfigParser) -> Self {
        Self {
            source: Arc::new(source),
            parser: Arc::new(parser),
        }
    }

    /// Returns the tournament source.
    pub fn source(&self) -> &dyn TournamentSource {
        self.source.as_ref()
    }

    /// Returns the configuration parser.
    pub fn parser(&self) -> &ConfigParser {
        &self.parser
    }
}
