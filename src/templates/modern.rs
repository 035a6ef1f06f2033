//! Title header with the contact details in a 2x2 grid.

use genpdf::style::Color;

use crate::blocks::{DocumentBlock, TableBlock, TableStyle};
use crate::model::ResumeData;
use crate::richtext::escape_markup;
use crate::styles;

use super::sections::{self, SectionStyles, SECTION_GAP_MM};

const STYLES: SectionStyles = SectionStyles {
    heading: styles::CUSTOM_SUB_HEADING,
    body: styles::NORMAL,
};

fn labelled(label: &str, value: &str) -> Vec<DocumentBlock> {
    vec![DocumentBlock::paragraph(
        format!("**{}:** {}", label, escape_markup(value)),
        styles::NORMAL,
    )]
}

/// Email and phone on the first row, location and LinkedIn on the second.
///
/// The LinkedIn cell is left empty when no profile is set.
pub fn contact_grid(data: &ResumeData) -> TableBlock {
    let info = &data.personal_info;
    let linkedin = info
        .linkedin()
        .map(|value| labelled("LinkedIn", value))
        .unwrap_or_default();

    TableBlock::new(vec![1, 1])
        .with_row(vec![
            labelled("Email", &info.email),
            labelled("Phone", &info.phone),
        ])
        .with_row(vec![labelled("Location", &info.location), linkedin])
        .with_style(TableStyle {
            text_color: Some(Color::Rgb(0, 0, 0)),
            ..TableStyle::default()
        })
}

pub fn layout(data: &ResumeData) -> Vec<DocumentBlock> {
    let mut blocks = super::picture_blocks(data, sections::ENTRY_GAP_MM);
    blocks.push(DocumentBlock::heading(
        escape_markup(&data.personal_info.full_name()),
        styles::TITLE,
    ));
    blocks.push(DocumentBlock::Table(contact_grid(data)));
    blocks.push(DocumentBlock::spacer(SECTION_GAP_MM));
    blocks.extend(sections::body(data, STYLES));
    blocks
}
