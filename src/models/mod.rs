//! Core data models for the Podium Engine.
//!
//! This module contains the domain models shared by extraction, the
//! assignment engine and the renderers.

mod award;
mod player;
mod tournament;

pub use award::{Award, format_points};
pub use player::{AttributeValue, Player, UNKNOWN_CLUB};
pub use tournament::{Tournament, TournamentAwards, UNKNOWN_TOURNAMENT};
