// src/infrastructure/export/pdf.rs
use super::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, layout_case};
use super::metrics::Face;
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::export::CaseDocumentRenderer,
};
use crate::domain::case::Case;
use crate::domain::checklist::{ChecklistItem, ChecklistState};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt,
};

const LAYER_NAME: &str = "contenido";

/// Renders case summaries with the PDF base-14 Helvetica faces, so no font
/// files are embedded.
#[derive(Debug, Default, Clone)]
pub struct PrintPdfRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }
}

fn pdf_error(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::infrastructure(format!("pdf rendering failed: {err}"))
}

fn point(x: f32, y: f32) -> Point {
    Point::new(Mm::from(Pt(x)), Mm::from(Pt(y)))
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                face,
                size,
                text,
            } => layer.use_text(
                text.as_str(),
                *size,
                Mm::from(Pt(*x)),
                Mm::from(Pt(*y)),
                fonts.get(*face),
            ),
            DrawOp::Line { from, to } => layer.add_line(Line {
                points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
                is_closed: false,
            }),
        }
    }
}

impl CaseDocumentRenderer for PrintPdfRenderer {
    fn render(
        &self,
        case: &Case,
        catalog: &[ChecklistItem],
        state: &ChecklistState,
    ) -> ApplicationResult<Vec<u8>> {
        let pages = layout_case(case, catalog, state);

        let width = Mm::from(Pt(PAGE_WIDTH));
        let height = Mm::from(Pt(PAGE_HEIGHT));
        let (doc, first_page, first_layer) =
            PdfDocument::new(format!("Expediente {}", case.code()), width, height, LAYER_NAME);

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        for (idx, page) in pages.iter().enumerate() {
            let layer = if idx == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) = doc.add_page(width, height, LAYER_NAME);
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            draw_page(&layer, page, &fonts);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}
