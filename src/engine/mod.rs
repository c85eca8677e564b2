//! Reward engine for the Podium Engine.
//!
//! This module contains the condition language, rank specifications, the
//! prize assignment algorithm, and the batch driver that runs it over every
//! configured tournament.

mod assignment;
mod condition;
mod driver;
mod rank_spec;

pub use assignment::{assign_rewards, compare_players};
pub use condition::{Comparison, Condition, NumericOp, evaluate};
pub use driver::{RunOutcome, SourceFailure, run_palmares};
pub use rank_spec::RankSpec;
