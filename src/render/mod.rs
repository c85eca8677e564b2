//! Palmarès renderers.
//!
//! Renderers consume the driver's [`TournamentAwards`] in source order. Each
//! tournament's awards are sorted by [`Award::display_key`] and grouped into
//! one section per rule, headed by the rule's category. The same grouping
//! feeds the text, PDF and JSON outputs.

mod json;
mod pdf;
mod text;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Award, TournamentAwards};

pub use json::{DocumentSection, DocumentTournament, PalmaresDocument};
pub use pdf::render_pdf;
pub use text::render_text;

/// One category section of a tournament's palmarès.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Category header.
    pub category: &'a str,
    /// Display order of the rule behind the section.
    pub order: i64,
    /// Awards of the section, by standing.
    pub awards: Vec<&'a Award>,
}

/// Groups a tournament's awards into display sections.
pub fn sections(tournament: &TournamentAwards) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = Vec::new();
    let mut previous: Option<&Award> = None;

    for award in tournament.sorted_awards() {
        match sections.last_mut() {
            Some(section) if !award.starts_section_after(previous) => section.awards.push(award),
            _ => sections.push(Section {
                category: &award.category,
                order: award.order,
                awards: vec![award],
            }),
        }
        previous = Some(award);
    }

    sections
}

/// Writes the text palmarès to `path`.
pub fn write_text<P: AsRef<Path>>(path: P, tournaments: &[TournamentAwards]) -> EngineResult<()> {
    write_output(path.as_ref(), render_text(tournaments).as_bytes())
}

/// Writes the PDF palmarès to `path`.
pub fn write_pdf<P: AsRef<Path>>(path: P, tournaments: &[TournamentAwards]) -> EngineResult<()> {
    let path = path.as_ref();
    let content = render_pdf(tournaments).map_err(|e| EngineError::RenderError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_output(path, &content)
}

/// Writes the JSON palmarès document to `path`.
pub fn write_json<P: AsRef<Path>>(path: P, document: &PalmaresDocument) -> EngineResult<()> {
    let path = path.as_ref();
    let content = document.to_json().map_err(|e| EngineError::RenderError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_output(path, content.as_bytes())
}

fn write_output(path: &Path, content: &[u8]) -> EngineResult<()> {
    fs::write(path, content).map_err(|e| EngineError::RenderError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), bytes = content.len(), "Palmarès written");
    Ok(())
}
