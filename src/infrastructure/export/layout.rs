// src/infrastructure/export/layout.rs
//! Page layout of the case summary, expressed as positioned draw operations
//! in PDF points with the origin at the bottom-left corner.

use super::metrics::{Face, text_width};
use crate::domain::case::Case;
use crate::domain::checklist::{ChecklistItem, ChecklistState, ChecklistStatus};

/// US Letter.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const CM: f32 = 28.3465;
const MARGIN: f32 = 2.0 * CM;
const PAGE_BREAK_BELOW: f32 = 5.0 * CM;
const BODY_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 11.0;
const NOTICE_LINE_HEIGHT: f32 = 11.0;
const MAX_LABEL_CHARS: usize = 95;

pub const PRIVACY_NOTICE: &str = "Nombre de la Dependencia: Protección Civil. Es responsable de recabar sus datos personales, del uso \
que se le dé a los mismos y de su protección. Los datos personales que se solicitan, serán utilizados \
para proveer los servicios que haya solicitado, pero ello, se requiere obtener los siguientes datos \
personales: nombre, dirección, teléfono, credencial de elector, comprobante de domicilio, curp, firma y \
otros, es mismo dominio que en cualquier momento usted tendrá acceso, rectificación, cancelación y oposición \
al tratamiento de los mismos, utilizando los medios que para tal efecto se han implementado en esta Dependencia \
y/o unidad administrativa. Si usted, no manifiesta en su oposición para el uso y/o tratamiento de su información \
personal, se entenderá que ha otorgado consentimiento para ello.";

pub const CONTACT_LINE: &str =
    "C. Beltran 315, Zona Centro, 20920 Jesús María, Ags. Tel: 449 963 9921";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        face: Face,
        size: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Concatenated text of the page, in drawing order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Line { .. } => None,
            })
            .collect()
    }
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn current(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, x: f32, face: Face, size: f32, text: impl Into<String>) {
        let y = self.y;
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.current().ops.push(DrawOp::Text {
            x,
            y,
            face,
            size,
            text,
        });
    }

    fn rule(&mut self, from_x: f32, to_x: f32) {
        let y = self.y;
        self.current().ops.push(DrawOp::Line {
            from: (from_x, y),
            to: (to_x, y),
        });
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn break_if_low(&mut self) {
        if self.y < PAGE_BREAK_BELOW {
            self.pages.push(Page::default());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Greedy word wrap: words are added to a line while it fits `max_width`.
/// A single word wider than the line is placed on a line of its own.
pub fn wrap_words(text: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if text_width(face, &candidate, size) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn field_rows(case: &Case) -> [(&'static str, String); 9] {
    let fields = &case.fields;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        ("EXPEDIENTE", fields.code.to_string()),
        ("NOMBRE DEL INMUEBLE", fields.property_name.to_string()),
        ("REPRESENTANTE LEGAL", text(&fields.legal_representative)),
        ("APODERADOS", text(&fields.agents)),
        ("DOMICILIO DE LA INSPECCION", text(&fields.inspection_address)),
        ("TELEFONO", text(&fields.phone)),
        ("QUIEN SOLICITA", fields.requested_by.to_string()),
        (
            "ARCHIVO FISICO",
            fields
                .archive_location
                .map(|location| location.to_string())
                .unwrap_or_default(),
        ),
        ("VERIFICACIONES/AVISOS", case.visit_count.to_string()),
    ]
}

/// Lay out the printable summary of `case`.
pub fn layout_case(case: &Case, catalog: &[ChecklistItem], state: &ChecklistState) -> Vec<Page> {
    let mut cursor = Cursor::new();

    let title = format!(
        "EXPEDIENTE {} DEPARTAMENTO DE PROTECCION CIVIL",
        case.created_year()
    );
    let title_x = (PAGE_WIDTH - text_width(Face::Bold, &title, TITLE_SIZE)) / 2.0;
    cursor.text(title_x, Face::Bold, TITLE_SIZE, title);
    cursor.advance(1.2 * CM);

    for (label, value) in field_rows(case) {
        cursor.text(MARGIN, Face::Bold, BODY_SIZE, format!("{label}:"));
        cursor.text(MARGIN + 6.2 * CM, Face::Regular, BODY_SIZE, value);
        cursor.advance(0.55 * CM);
    }

    cursor.advance(0.6 * CM);
    cursor.text(MARGIN, Face::Bold, BODY_SIZE, "CONTENIDO DEL EXPEDIENTE");
    cursor.text(PAGE_WIDTH - 6.0 * CM, Face::Bold, BODY_SIZE, "PRESENTA");
    cursor.text(PAGE_WIDTH - 3.2 * CM, Face::Bold, BODY_SIZE, "NO PRESENTA");
    cursor.advance(0.45 * CM);
    cursor.rule(MARGIN, PAGE_WIDTH - MARGIN);
    cursor.advance(0.35 * CM);

    for item in catalog {
        cursor.break_if_low();
        cursor.text(
            MARGIN,
            Face::Regular,
            BODY_SIZE,
            truncate_chars(&item.label, MAX_LABEL_CHARS),
        );
        match state.status_of(item.id) {
            Some(ChecklistStatus::Present) => {
                cursor.text(PAGE_WIDTH - 5.2 * CM, Face::Regular, BODY_SIZE, "X")
            }
            Some(ChecklistStatus::Absent) => {
                cursor.text(PAGE_WIDTH - 2.4 * CM, Face::Regular, BODY_SIZE, "X")
            }
            None => {}
        }
        cursor.advance(0.45 * CM);
    }

    cursor.advance(0.5 * CM);
    cursor.break_if_low();
    cursor.text(MARGIN, Face::Bold, BODY_SIZE, "AVISO DE PRIVACIDAD");
    cursor.advance(0.6 * CM);

    for line in wrap_words(
        PRIVACY_NOTICE,
        Face::Regular,
        BODY_SIZE,
        PAGE_WIDTH - 2.0 * MARGIN,
    ) {
        cursor.break_if_low();
        cursor.text(MARGIN, Face::Regular, BODY_SIZE, line);
        cursor.advance(NOTICE_LINE_HEIGHT);
    }

    cursor.advance(0.6 * CM);
    cursor.break_if_low();
    cursor.text(MARGIN, Face::Regular, BODY_SIZE, CONTACT_LINE);

    cursor.finish()
}
