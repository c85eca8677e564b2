//! Batch driver.
//!
//! Runs the assignment engine once per source. Sources are processed one at
//! a time, in configuration order, so the palmarès keeps the order of the
//! `URLS` line. A source whose extraction fails is logged and skipped; the
//! run fails only when no source at all could be processed.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Rule;
use crate::error::{EngineError, EngineResult};
use crate::extraction::TournamentSource;
use crate::models::TournamentAwards;

use super::assignment::assign_rewards;

/// A source that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    /// The source identifier.
    pub source: String,
    /// Why extraction failed.
    pub message: String,
}

/// The result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Awards per processed source, in source order.
    pub tournaments: Vec<TournamentAwards>,
    /// Sources that were skipped, in source order.
    pub failures: Vec<SourceFailure>,
}

/// Fetches every source and assigns prizes for each tournament.
///
/// # Errors
///
/// - [`EngineError::NoSources`] if `sources` is empty
/// - [`EngineError::AllSourcesFailed`] if no extraction succeeded
pub async fn run_palmares<S>(
    rules: &[Rule],
    sources: &[String],
    extractor: &S,
) -> EngineResult<RunOutcome>
where
    S: TournamentSource + ?Sized,
{
    if sources.is_empty() {
        return Err(EngineError::NoSources);
    }

    let total = sources.len();
    let mut outcome = RunOutcome::default();

    for (index, source) in sources.iter().enumerate() {
        info!(tournament = index + 1, total, source = %source, "Processing tournament");

        let tournament = match extractor.fetch(source).await {
            Ok(tournament) => tournament,
            Err(err) => {
                warn!(source = %source, error = %err, "Tournament skipped");
                outcome.failures.push(SourceFailure {
                    source: source.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let awards = assign_rewards(&tournament.players, rules);
        info!(
            name = %tournament.name,
            players = tournament.players.len(),
            awards = awards.len(),
            "Tournament processed"
        );

        outcome.tournaments.push(TournamentAwards {
            name: tournament.name,
            source: source.clone(),
            awards,
        });
    }

    if outcome.tournaments.is_empty() {
        error!(attempted = total, "No tournament processed successfully");
        return Err(EngineError::AllSourcesFailed { attempted: total });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::StaticSource;
    use crate::models::{Player, Tournament};
    use rust_decimal::Decimal;

    fn tournament(name: &str) -> Tournament {
        Tournament {
            name: name.to_string(),
            players: vec![
                Player::from_raw_category(1, "A", "Sen", Decimal::new(60, 1), "Club", 0),
                Player::from_raw_category(2, "B", "Sen", Decimal::new(55, 1), "Club", 0),
            ],
        }
    }

    fn rules() -> Vec<Rule> {
        vec![Rule {
            category: "TEST".to_string(),
            rank: "1-1".to_string(),
            prizes: vec!["1er Test".to_string()],
            condition: None,
            order: 1,
        }]
    }

    fn sources(n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| format!("https://echecs.asso.fr/t{}", i))
            .collect()
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_source_order() {
        let source = StaticSource::new()
            .with_tournament("https://echecs.asso.fr/t1", tournament("Open 1"))
            .with_tournament("https://echecs.asso.fr/t3", tournament("Open 3"));

        let outcome = run_palmares(&rules(), &sources(3), &source).await.unwrap();

        let names: Vec<&str> = outcome.tournaments.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Open 1", "Open 3"]);
        assert_eq!(outcome.tournaments[1].source, "https://echecs.asso.fr/t3");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].source, "https://echecs.asso.fr/t2");
    }

    #[tokio::test]
    async fn test_each_tournament_gets_its_awards() {
        let source = StaticSource::new()
            .with_tournament("https://echecs.asso.fr/t1", tournament("Open 1"))
            .with_tournament("https://echecs.asso.fr/t2", tournament("Open 2"));

        let outcome = run_palmares(&rules(), &sources(2), &source).await.unwrap();

        for result in &outcome.tournaments {
            assert_eq!(result.awards.len(), 1);
            assert_eq!(result.awards[0].player, "A");
        }
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_no_rules_gives_empty_award_lists() {
        let source = StaticSource::new().with_tournament("https://echecs.asso.fr/t1", tournament("Open"));
        let outcome = run_palmares(&[], &sources(1), &source).await.unwrap();
        assert_eq!(outcome.tournaments.len(), 1);
        assert!(outcome.tournaments[0].awards.is_empty());
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_an_error() {
        let result = run_palmares(&rules(), &sources(2), &StaticSource::new()).await;
        assert!(matches!(
            result,
            Err(EngineError::AllSourcesFailed { attempted: 2 })
        ));
    }

    #[tokio::test]
    async fn test_empty_source_list_is_an_error() {
        let result = run_palmares(&rules(), &[], &StaticSource::new()).await;
        assert!(matches!(result, Err(EngineError::NoSources)));
    }
}
