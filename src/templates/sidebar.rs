//! Two-column page: contact details and education on the left, everything else on the right.

use genpdf::style::Color;

use crate::blocks::{DocumentBlock, TableBlock, TableStyle};
use crate::model::ResumeData;
use crate::richtext::escape_markup;
use crate::styles;

use super::sections::{self, SectionStyles};

/// Relative widths of the left and right column.
pub const COLUMN_WEIGHTS: [usize; 2] = [5, 9];

const COLUMN_GAP_MM: f64 = 4.2;
const CELL_PADDING_MM: f64 = 3.5;
const LEFT_TINT: Color = Color::Rgb(0xD3, 0xD3, 0xD3);
const RIGHT_TINT: Color = Color::Rgb(0xF5, 0xF5, 0xF5);

const STYLES: SectionStyles = SectionStyles {
    heading: styles::CUSTOM_SUB_HEADING,
    body: styles::CUSTOM_BODY,
};

fn contact(label: &str, value: &str) -> DocumentBlock {
    DocumentBlock::paragraph(
        format!("{}: {}", label, escape_markup(value)),
        styles::CUSTOM_BODY,
    )
}

pub fn left_column(data: &ResumeData) -> Vec<DocumentBlock> {
    let info = &data.personal_info;
    let mut blocks = super::picture_blocks(data, COLUMN_GAP_MM);
    blocks.push(DocumentBlock::heading(
        escape_markup(&info.full_name()),
        styles::CUSTOM_HEADING,
    ));
    blocks.push(contact("Email", &info.email));
    blocks.push(contact("Phone", &info.phone));
    blocks.push(contact("Location", &info.location));
    if let Some(linkedin) = info.linkedin() {
        blocks.push(contact("LinkedIn", linkedin));
    }
    blocks.push(DocumentBlock::spacer(COLUMN_GAP_MM));
    blocks.extend(sections::education(data, STYLES));
    blocks
}

pub fn right_column(data: &ResumeData) -> Vec<DocumentBlock> {
    let mut blocks = sections::summary(data, STYLES);
    blocks.extend(sections::experience(data, STYLES));
    blocks.extend(sections::skills(data, STYLES));
    blocks
}

pub fn layout(data: &ResumeData) -> Vec<DocumentBlock> {
    let table = TableBlock::new(COLUMN_WEIGHTS.to_vec())
        .with_row(vec![left_column(data), right_column(data)])
        .with_style(TableStyle {
            border: true,
            padding_mm: CELL_PADDING_MM,
            column_tints: vec![Some(LEFT_TINT), Some(RIGHT_TINT)],
            text_color: None,
        });
    vec![DocumentBlock::Table(table)]
}
