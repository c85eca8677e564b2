//! Plain-text palmarès.

use std::fmt::Write;

use crate::models::{TournamentAwards, format_points};

use super::sections;

const RULE: &str = "==================================================";

/// Renders every tournament's palmarès as plain text.
///
/// Tournaments keep their input order and are separated by a
/// `FIN TOURNOI` banner. Within a tournament, each section opens with the
/// upper-cased category between brackets.
///
/// # Example
///
/// ```
/// use podium_engine::models::{Award, TournamentAwards};
/// use podium_engine::render::render_text;
/// use rust_decimal::Decimal;
///
/// let palmares = vec![TournamentAwards {
///     name: "Open de Nantes".to_string(),
///     source: "https://echecs.asso.fr/t1".to_string(),
///     awards: vec![Award {
///         category: "Test".to_string(),
///         prize: "1er Test".to_string(),
///         player: "A".to_string(),
///         rank: 1,
///         points: Decimal::new(60, 1),
///         club: "Club".to_string(),
///         order: 1,
///         rule_index: 0,
///     }],
/// }];
///
/// let text = render_text(&palmares);
/// assert!(text.contains("[TEST]\n  1er Test : A - Club - (Clt 1, 6.0 pts)\n"));
/// ```
pub fn render_text(tournaments: &[TournamentAwards]) -> String {
    let mut out = String::new();

    for (index, tournament) in tournaments.iter().enumerate() {
        if index > 0 {
            let _ = write!(out, "\n{} FIN TOURNOI {}\n\n", RULE, RULE);
        }

        let _ = writeln!(out, "=== {} ===", tournament.name);
        let _ = write!(out, "URL : {}\n\n", tournament.source);

        for section in sections(tournament) {
            let _ = write!(out, "\n[{}]\n", section.category.to_uppercase());
            for award in section.awards {
                let _ = writeln!(
                    out,
                    "  {} : {} - {} - (Clt {}, {} pts)",
                    award.prize,
                    award.player,
                    award.club,
                    award.rank,
                    format_points(award.points)
                );
            }
        }

        out.push_str("\n=== Fin du palmarès ===\n");
    }

    out
}
