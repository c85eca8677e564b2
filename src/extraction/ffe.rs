//! French federation (FFE) results pages.
//!
//! The standings live in a `<table width="800">`: a `papi_titre` row holds
//! the tournament title and each player is a `papi_liste_f`/`papi_liste_c`
//! row of at least nine cells (rank, -, name, rating, category, -, -, club,
//! points). Rows that do not fit that shape are skipped.

use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Player, Tournament, UNKNOWN_TOURNAMENT};

use super::TournamentSource;

const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MIN_CELLS: usize = 9;

static RESULTS_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table[^>]*\bwidth\s*=\s*["']?800\b["']?[^>]*>(.*?)</table>"#)
        .expect("table pattern is valid")
});

static TITLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<tr[^>]*\bclass\s*=\s*["']?[^"'>]*papi_titre[^>]*>(.*?)</tr>"#)
        .expect("title pattern is valid")
});

static PLAYER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<tr[^>]*\bclass\s*=\s*["']?[^"'>]*papi_liste_[fc][^>]*>(.*?)</tr>"#)
        .expect("row pattern is valid")
});

static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("cell pattern is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static TITLE_CUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(Classement|ronde|Ronde|après|Résultats)").expect("title cut pattern is valid")
});

/// Reads FFE results pages over HTTP.
#[derive(Debug, Clone)]
pub struct FfeSource {
    client: reqwest::Client,
}

impl FfeSource {
    /// Creates a source with a 15 second request timeout.
    pub fn new() -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EngineError::ExtractionFailed {
                url: String::new(),
                message: format!("HTTP client unavailable: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TournamentSource for FfeSource {
    async fn fetch(&self, source: &str) -> EngineResult<Tournament> {
        let failed = |message: String| EngineError::ExtractionFailed {
            url: source.to_string(),
            message,
        };

        let response = self
            .client
            .get(source)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| failed(e.to_string()))?;

        let html = response.text().await.map_err(|e| failed(e.to_string()))?;
        debug!(source, bytes = html.len(), "Results page downloaded");

        parse_results_page(source, &html)
    }
}

/// Extracts the tournament name and standings from a results page.
///
/// # Errors
///
/// Returns [`EngineError::ExtractionFailed`] when the page has no results
/// table.
///
/// # Example
///
/// ```
/// use podium_engine::extraction::parse_results_page;
///
/// let html = r#"<table width="800">
///   <tr class="papi_titre"><td>Open de Nantes - Classement après la ronde 7</td></tr>
///   <tr class="papi_liste_f"><td>1</td><td></td><td><a>MARTIN Paul</a></td><td>1850</td>
///     <td>SenM</td><td></td><td></td><td>Echiquier Nantais</td><td>6&frac12;</td></tr>
/// </table>"#;
///
/// let tournament = parse_results_page("https://echecs.asso.fr/t1", html).unwrap();
/// assert_eq!(tournament.name, "Open de Nantes");
/// assert_eq!(tournament.players[0].points.to_string(), "6.5");
/// ```
pub fn parse_results_page(source: &str, html: &str) -> EngineResult<Tournament> {
    let table = RESULTS_TABLE
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| EngineError::ExtractionFailed {
            url: source.to_string(),
            message: "results table not found".to_string(),
        })?
        .as_str();

    let name = TITLE_ROW
        .captures(table)
        .and_then(|row| CELL.captures(row.get(1).map_or("", |m| m.as_str())))
        .map(|cell| tournament_name(&cell_text(&cell[1])))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_TOURNAMENT.to_string());

    let mut players: Vec<Player> = PLAYER_ROW
        .captures_iter(table)
        .filter_map(|row| parse_player_row(&row[1]))
        .collect();
    players.sort_by_key(|p| p.rank);

    info!(source, name = %name, players = players.len(), "Results page parsed");

    Ok(Tournament { name, players })
}

fn parse_player_row(row: &str) -> Option<Player> {
    let cells: Vec<String> = CELL.captures_iter(row).map(|c| cell_text(&c[1])).collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let rank = cells[0].parse::<u32>().ok()?;
    let points = parse_points(&cells[8])?;

    Some(Player::from_raw_category(
        rank,
        &cells[2],
        &cells[4],
        points,
        &cells[7],
        parse_rating(&cells[3]),
    ))
}

/// Cuts the round/standings suffix off a page title.
fn tournament_name(title: &str) -> String {
    let head = TITLE_CUT.split(title).next().unwrap_or_default();
    head.trim_end_matches([' ', '-', '–', '—']).trim().to_string()
}

/// Parses a score such as `5`, `4½` or `½`.
fn parse_points(text: &str) -> Option<Decimal> {
    let text = text.replace('½', ".5");
    let text = if text.starts_with('.') {
        format!("0{}", text)
    } else {
        text
    };
    Decimal::from_str(text.trim()).ok()
}

/// Reads the leading digits of a rating cell (`1520 F` → 1520), 0 if none.
fn parse_rating(text: &str) -> u32 {
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Visible text of a cell: tags dropped, entities decoded, whitespace collapsed.
fn cell_text(html: &str) -> String {
    let without_tags = TAG.replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
<html><body>
<table width="800" border="0">
  <tr class="papi_titre"><td colspan="9">Championnat 44 Jeunes - Classement après la ronde 7</td></tr>
  <tr class="papi_entete"><td>Pl</td><td></td><td>Nom</td><td>Elo</td><td>Cat</td><td>Fed</td><td>Ligue</td><td>Club</td><td>Pts</td></tr>
  <tr class="papi_liste_c"><td>2</td><td>&nbsp;</td><td><a href="#">DURAND Alice</a></td><td>1180 F</td><td>PpoF</td><td>FRA</td><td>PDL</td><td>Echiquier&nbsp;&nbsp;Nantais</td><td>5&frac12;</td></tr>
  <tr class="papi_liste_f"><td>1</td><td>&nbsp;</td><td><a href="#">MARTIN Paul</a></td><td>1250</td><td>Ppo</td><td>FRA</td><td>PDL</td><td>Cercle d&#39;&Eacute;checs</td><td>6</td></tr>
  <tr class="papi_liste_f"><td>3</td><td>&nbsp;</td><td>PETIT Léo</td><td></td><td>PouM</td><td>FRA</td><td>PDL</td><td> </td><td>½</td></tr>
  <tr class="papi_liste_c"><td>x</td><td></td><td>Broken</td><td></td><td>Sen</td><td></td><td></td><td>Club</td><td>1</td></tr>
  <tr class="papi_liste_c"><td>4</td><td>Short row</td></tr>
</table>
</body></html>"##;

    fn parsed() -> Tournament {
        parse_results_page("https://echecs.asso.fr/t1", PAGE).unwrap()
    }

    #[test]
    fn test_tournament_name_is_cut_before_standings_suffix() {
        assert_eq!(parsed().name, "Championnat 44 Jeunes");
    }

    #[test]
    fn test_players_are_sorted_by_rank_and_bad_rows_skipped() {
        let ranks: Vec<u32> = parsed().players.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_player_fields_are_normalized() {
        let tournament = parsed();
        let alice = &tournament.players[1];
        assert_eq!(alice.name, "DURAND Alice");
        assert_eq!(alice.category, "PPO");
        assert_eq!(alice.genre, Some('F'));
        assert_eq!(alice.elo, 1180);
        assert_eq!(alice.club, "Echiquier Nantais");
        assert_eq!(alice.points, Decimal::new(55, 1));

        let paul = &tournament.players[0];
        assert_eq!(paul.genre, None);
        assert_eq!(paul.club, "Cercle d'Échecs");
    }

    #[test]
    fn test_missing_values_fall_back_to_defaults() {
        let tournament = parsed();
        let leo = &tournament.players[2];
        assert_eq!(leo.elo, 0);
        assert_eq!(leo.club, "Club inconnu");
        assert_eq!(leo.points, Decimal::new(5, 1));
    }

    #[test]
    fn test_missing_title_gives_unknown_name() {
        let html = r#"<table width="800"><tr class="papi_liste_f"><td>1</td><td></td><td>A</td><td></td><td>Sen</td><td></td><td></td><td>C</td><td>1</td></tr></table>"#;
        let tournament = parse_results_page("s", html).unwrap();
        assert_eq!(tournament.name, UNKNOWN_TOURNAMENT);
        assert_eq!(tournament.players.len(), 1);
    }

    #[test]
    fn test_page_without_results_table_fails() {
        let result = parse_results_page("https://echecs.asso.fr/t1", "<html><p>Erreur</p></html>");
        assert!(matches!(result, Err(EngineError::ExtractionFailed { .. })));
    }

    #[test]
    fn test_title_cut_variants() {
        assert_eq!(tournament_name("Open d'été Résultats"), "Open d'été");
        assert_eq!(tournament_name("Rapide de Noël – ronde 3"), "Rapide de Noël");
        assert_eq!(tournament_name("Blitz"), "Blitz");
    }

    #[test]
    fn test_points_parsing() {
        assert_eq!(parse_points("4½"), Some(Decimal::new(45, 1)));
        assert_eq!(parse_points("7"), Some(Decimal::new(7, 0)));
        assert_eq!(parse_points("-"), None);
    }

    #[test]
    fn test_rating_parsing() {
        assert_eq!(parse_rating("1520 F"), 1520);
        assert_eq!(parse_rating("1999"), 1999);
        assert_eq!(parse_rating(""), 0);
        assert_eq!(parse_rating("NC"), 0);
    }

    #[test]
    fn test_unknown_entity_is_kept() {
        assert_eq!(cell_text("a&zzz;b"), "a&zzz;b");
    }

    #[test]
    fn test_named_and_numeric_entities_are_decoded() {
        assert_eq!(cell_text("&Egrave;cole &Ocirc;t&eacute;"), "Ècole Ôté");
        assert_eq!(cell_text("L&#39;&#xC9;chiquier"), "L'Échiquier");
        assert_eq!(cell_text("<b>5&frac12;</b>"), "5½");
    }
}
