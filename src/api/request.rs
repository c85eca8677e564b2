//! Request types for the Podium Engine API.

use serde::{Deserialize, Serialize};

use crate::models::Player;

/// Request body for `POST /palmares`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalmaresRequest {
    /// Configuration text in the line DSL.
    pub config: String,
}

/// Request body for `POST /assign`.
///
/// Runs the assignment engine on the given standings. The configuration's
/// `URLS` line is not required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// Configuration text in the line DSL.
    pub config: String,
    /// Players ordered by final standing.
    pub players: Vec<Player>,
}
