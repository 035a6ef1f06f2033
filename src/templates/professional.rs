//! Single-column layout with the contact details on one line.

use crate::blocks::DocumentBlock;
use crate::model::ResumeData;
use crate::richtext::escape_markup;
use crate::styles;

use super::sections::{self, SectionStyles, SECTION_GAP_MM};

/// Separator between the contact details.
pub const CONTACT_SEPARATOR: &str = " | ";

const STYLES: SectionStyles = SectionStyles {
    heading: styles::CUSTOM_SUB_HEADING,
    body: styles::NORMAL,
};

/// Builds the contact line: email, phone, location and, when present, LinkedIn.
pub fn contact_line(data: &ResumeData) -> String {
    let info = &data.personal_info;
    let mut parts = vec![info.email.as_str(), info.phone.as_str(), info.location.as_str()];
    if let Some(linkedin) = info.linkedin() {
        parts.push(linkedin);
    }
    parts.join(CONTACT_SEPARATOR)
}

pub fn layout(data: &ResumeData) -> Vec<DocumentBlock> {
    let mut blocks = super::picture_blocks(data, sections::ENTRY_GAP_MM);
    blocks.push(DocumentBlock::heading(
        escape_markup(&data.personal_info.full_name()),
        styles::CUSTOM_HEADING,
    ));
    blocks.push(DocumentBlock::paragraph(
        escape_markup(&contact_line(data)),
        styles::NORMAL,
    ));
    blocks.push(DocumentBlock::spacer(SECTION_GAP_MM));
    blocks.extend(sections::body(data, STYLES));
    blocks
}
