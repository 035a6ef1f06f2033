//! Template selection and the layout strategies behind each template.
//!
//! A layout strategy is a pure function from [`ResumeData`] to an ordered block sequence.  All
//! strategies build their sections through [`sections`] and only differ in how the header (and,
//! for [`Template::Sidebar`], the page) is arranged.

use std::fmt;
use std::str::FromStr;

use crate::blocks::{DocumentBlock, ImageBlock};
use crate::error::RenderError;
use crate::model::ResumeData;

pub mod modern;
pub mod professional;
pub mod sections;
pub mod sidebar;

/// Edge length of the square portrait in millimetres.
pub const PICTURE_SIZE_MM: f64 = 38.1;

/// Signature shared by every layout strategy.
pub type LayoutStrategy = fn(&ResumeData) -> Vec<DocumentBlock>;

/// The named resume templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Template {
    /// Single column with a one-line contact header.
    #[default]
    Professional,
    /// Large title with a 2x2 contact grid above a single-column body.
    Modern,
    /// Whole page split into a tinted contact/education column and a content column.
    Sidebar,
}

impl Template {
    /// Every template in presentation order.
    pub const ALL: [Template; 3] = [Template::Professional, Template::Modern, Template::Sidebar];

    /// Returns the identifier accepted by [`Template::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Template::Professional => "Professional",
            Template::Modern => "Modern",
            Template::Sidebar => "Sidebar",
        }
    }

    /// Returns the layout strategy implementing this template.
    pub fn strategy(self) -> LayoutStrategy {
        match self {
            Template::Professional => professional::layout,
            Template::Modern => modern::layout,
            Template::Sidebar => sidebar::layout,
        }
    }

    /// Runs the layout strategy for `data`.
    pub fn layout(self, data: &ResumeData) -> Vec<DocumentBlock> {
        (self.strategy())(data)
    }
}

impl FromStr for Template {
    type Err = RenderError;

    /// Parses a template identifier, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Template::ALL
            .into_iter()
            .find(|template| template.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RenderError::InvalidTemplate(value.to_string()))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Portrait block followed by a small gap, or nothing when there is no picture.
pub(crate) fn picture_blocks(data: &ResumeData, gap_mm: f64) -> Vec<DocumentBlock> {
    match data.personal_info.picture() {
        Some(bytes) => vec![
            DocumentBlock::Image(ImageBlock::new(bytes, PICTURE_SIZE_MM, PICTURE_SIZE_MM)),
            DocumentBlock::spacer(gap_mm),
        ],
        None => Vec::new(),
    }
}
