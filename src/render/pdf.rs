//! Printable PDF palmarès.
//!
//! One A4 page per tournament (more when a tournament overflows): the
//! tournament name, its results page, a "Palmarès des Récompenses" heading,
//! then each section's category in bold followed by its award lines.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::models::{TournamentAwards, format_points};

use super::sections;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LAYER: &str = "Palmarès";

/// Renders every tournament's palmarès as a PDF document.
///
/// # Errors
///
/// Returns the PDF library's error if a font cannot be registered or the
/// document cannot be serialized.
pub fn render_pdf(tournaments: &[TournamentAwards]) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page, layer) =
        PdfDocument::new("Palmarès", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    };
    let first_layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter::new(&doc, first_layer);

    for (index, tournament) in tournaments.iter().enumerate() {
        if index > 0 {
            writer.new_page();
        }

        writer.line(&tournament.name, 16.0, 8.0, &fonts.bold);
        writer.line(&format!("URL : {}", tournament.source), 9.0, 8.0, &fonts.italic);
        writer.line("Palmarès des Récompenses", 18.0, 12.0, &fonts.bold);

        for section in sections(tournament) {
            writer.gap(3.0);
            writer.line(&section.category.to_uppercase(), 13.0, 7.0, &fonts.bold);
            for award in section.awards {
                let text = format!(
                    "{} : {} - {} - (Clt {}, {} pts)",
                    award.prize,
                    award.player,
                    award.club,
                    award.rank,
                    format_points(award.points)
                );
                writer.line(&text, 11.0, 6.0, &fonts.regular);
            }
        }
    }

    doc.save_to_bytes()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Writes lines top to bottom, opening a new page when the current one is full.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn line(&mut self, text: &str, size: f32, height: f32, font: &IndirectFontRef) {
        if self.cursor - height < MARGIN {
            self.new_page();
        }
        self.cursor -= height;
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.cursor), font);
    }
}
