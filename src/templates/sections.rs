//! Section builders shared by every template.
//!
//! Templates differ only in how they arrange the header; the summary, experience, education and
//! skills sections are always produced here so their structure cannot drift apart.

use crate::blocks::DocumentBlock;
use crate::model::ResumeData;
use crate::richtext::escape_markup;

/// Gap between an entry and the next one in millimetres.
pub const ENTRY_GAP_MM: f64 = 3.5;

/// Gap after the header and the summary in millimetres.
pub const SECTION_GAP_MM: f64 = 7.0;

/// Style names used for section headings and section bodies.
#[derive(Clone, Copy, Debug)]
pub struct SectionStyles {
    pub heading: &'static str,
    pub body: &'static str,
}

pub fn summary(data: &ResumeData, styles: SectionStyles) -> Vec<DocumentBlock> {
    vec![
        DocumentBlock::heading("Professional Summary", styles.heading),
        DocumentBlock::paragraph(escape_markup(&data.summary), styles.body),
        DocumentBlock::spacer(SECTION_GAP_MM),
    ]
}

/// Experience heading followed by one group per entry; only the heading when there are none.
pub fn experience(data: &ResumeData, styles: SectionStyles) -> Vec<DocumentBlock> {
    let mut blocks = vec![DocumentBlock::heading("Experience", styles.heading)];
    for entry in &data.experiences {
        blocks.push(DocumentBlock::paragraph(
            format!(
                "**{}** at {}",
                escape_markup(&entry.position),
                escape_markup(&entry.company)
            ),
            styles.body,
        ));
        blocks.push(DocumentBlock::paragraph(
            format!("{} - {}", entry.start_date, entry.end_date),
            styles.body,
        ));
        blocks.push(DocumentBlock::paragraph(
            escape_markup(&entry.description),
            styles.body,
        ));
        blocks.push(DocumentBlock::spacer(ENTRY_GAP_MM));
    }
    blocks
}

pub fn education(data: &ResumeData, styles: SectionStyles) -> Vec<DocumentBlock> {
    let mut blocks = vec![DocumentBlock::heading("Education", styles.heading)];
    for entry in &data.education {
        blocks.push(DocumentBlock::paragraph(
            format!(
                "**{}** - {}",
                escape_markup(&entry.degree),
                escape_markup(&entry.institution)
            ),
            styles.body,
        ));
        blocks.push(DocumentBlock::paragraph(
            format!("Graduated: {}", entry.graduation_date),
            styles.body,
        ));
        blocks.push(DocumentBlock::spacer(ENTRY_GAP_MM));
    }
    blocks
}

pub fn skills(data: &ResumeData, styles: SectionStyles) -> Vec<DocumentBlock> {
    vec![
        DocumentBlock::heading("Skills", styles.heading),
        DocumentBlock::paragraph(escape_markup(&data.joined_skills()), styles.body),
    ]
}

/// Summary, experience, education and skills in that order.
pub fn body(data: &ResumeData, styles: SectionStyles) -> Vec<DocumentBlock> {
    let mut blocks = summary(data, styles);
    blocks.extend(experience(data, styles));
    blocks.extend(education(data, styles));
    blocks.extend(skills(data, styles));
    blocks
}
