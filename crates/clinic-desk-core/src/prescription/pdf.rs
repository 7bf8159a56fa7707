//! Single-page PDF layout for prescriptions.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::{Prescription, PrescriptionError, PrescriptionResult, TITLE};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 10.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;

/// Rough Helvetica advance per character at `FONT_SIZE`, in mm.
const CHAR_WIDTH: f32 = 2.1;

pub(super) fn render(rx: &Prescription) -> PrescriptionResult<Vec<u8>> {
    let (doc, page1, layer1) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PrescriptionError::Pdf(format!("font error: {e}")))?;

    let mut y = Mm(PAGE_HEIGHT - 2.0 * LINE_HEIGHT);
    for (i, line) in rx.lines().iter().enumerate() {
        let x = if i == 0 { centred_x(line) } else { LEFT_MARGIN };
        if !line.is_empty() {
            layer.use_text(line.as_str(), FONT_SIZE, Mm(x), y, &font);
        }
        y -= Mm(LINE_HEIGHT);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| PrescriptionError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| PrescriptionError::Pdf(format!("buffer error: {e}")))
}

fn centred_x(text: &str) -> f32 {
    let width = text.chars().count() as f32 * CHAR_WIDTH;
    ((PAGE_WIDTH - width) / 2.0).max(LEFT_MARGIN)
}
