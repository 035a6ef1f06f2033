//! Top-level render operations.
//!
//! [`Renderer`] owns the loaded font family and the page configuration; every call to
//! [`Renderer::render`] builds its own style sheet, block sequence and PDF document, so a renderer
//! can be shared between threads.

use std::path::PathBuf;

use genpdf::fonts::{FontData, FontFamily};
use genpdf::{PaperSize, Size};
use log::{debug, info};

use crate::blocks::DocumentBlock;
use crate::builder::{DocumentBuilder, DEFAULT_MARGIN_MM};
use crate::elements::ImageLimits;
use crate::error::{RenderError, Result};
use crate::fonts;
use crate::model::ResumeData;
use crate::styles::StyleSheet;
use crate::templates::Template;

/// File name suggested for downloads of a rendered resume.
pub const RESUME_FILE_NAME: &str = "resume.pdf";

/// Media type of a rendered resume.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Page and resource configuration applied to every render call.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub paper_size: Size,
    /// Margin on every side of every page in millimetres.
    pub margins_mm: f64,
    pub image_limits: ImageLimits,
    /// Directory searched for the bundled font family before the default locations.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter.into(),
            margins_mm: DEFAULT_MARGIN_MM,
            image_limits: ImageLimits::default(),
            fonts_dir: None,
        }
    }
}

impl RenderOptions {
    /// Sets the paper size and returns the updated options.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins and returns the updated options.
    pub fn with_margins_mm(mut self, margins_mm: f64) -> Self {
        self.margins_mm = margins_mm;
        self
    }

    /// Sets the picture limits and returns the updated options.
    pub fn with_image_limits(mut self, image_limits: ImageLimits) -> Self {
        self.image_limits = image_limits;
        self
    }

    /// Sets the font directory override and returns the updated options.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(fonts_dir.into());
        self
    }
}

/// A finished PDF document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedResume {
    pub bytes: Vec<u8>,
}

impl RenderedResume {
    /// File name to offer when the document is downloaded.
    pub fn file_name(&self) -> &'static str {
        RESUME_FILE_NAME
    }

    /// Media type of the document.
    pub fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    /// Consumes the document and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Renders resumes with a fixed configuration and font family.
pub struct Renderer {
    options: RenderOptions,
    font_family: FontFamily<FontData>,
}

impl Renderer {
    /// Loads the font family and creates a renderer.
    pub fn new(options: RenderOptions) -> Result<Self> {
        let font_family =
            fonts::load_font_family(options.fonts_dir.as_deref()).map_err(RenderError::FontLoad)?;
        Ok(Self::with_font_family(options, font_family))
    }

    /// Creates a renderer around an already loaded font family.
    pub fn with_font_family(options: RenderOptions, font_family: FontFamily<FontData>) -> Self {
        Self {
            options,
            font_family,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `data` with `template`.
    ///
    /// Either a complete document is returned or an error; no partial output is ever produced.
    pub fn render(&self, data: &ResumeData, template: Template) -> Result<RenderedResume> {
        let blocks = layout(data, template)?;
        let sheet = StyleSheet::resume();
        debug!(
            "Laid out {} blocks with the {} template",
            blocks.len(),
            template
        );

        let bytes = DocumentBuilder::new(self.font_family.clone())
            .with_paper_size(self.options.paper_size)
            .with_margins_mm(self.options.margins_mm)
            .with_image_limits(self.options.image_limits)
            .with_title(data.personal_info.full_name())
            .build(&blocks, &sheet)?;

        info!(
            "Rendered {} resume ({} bytes)",
            template.name(),
            bytes.len()
        );
        Ok(RenderedResume { bytes })
    }

    /// Parses `template_id` and renders `data` with the matching template.
    pub fn render_named(&self, data: &ResumeData, template_id: &str) -> Result<RenderedResume> {
        let template = template_id.parse::<Template>()?;
        self.render(data, template)
    }
}

/// Validates `data` and returns the block sequence `template` produces for it.
pub fn layout(data: &ResumeData, template: Template) -> Result<Vec<DocumentBlock>> {
    data.validate()?;
    Ok(template.layout(data))
}

/// Renders `data` with the template named `template_id` using the default options.
///
/// The template identifier and the data are checked before any font is loaded.
pub fn render(data: &ResumeData, template_id: &str) -> Result<Vec<u8>> {
    let template = template_id.parse::<Template>()?;
    data.validate()?;
    let renderer = Renderer::new(RenderOptions::default())?;
    renderer.render(data, template).map(RenderedResume::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Experience, PersonalInfo, MAX_EXPERIENCES};
    use chrono::NaiveDate;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn renderer_can_be_shared_between_threads() {
        assert_send_sync::<Renderer>();
    }

    #[test]
    fn default_options_use_letter_paper() {
        let options = RenderOptions::default();
        let letter = Size::from(PaperSize::Letter);
        assert!(options.paper_size.width == letter.width);
        assert!(options.paper_size.height == letter.height);
        assert_eq!(options.margins_mm, DEFAULT_MARGIN_MM);
        assert!(options.fonts_dir.is_none());
    }

    #[test]
    fn rendered_resume_describes_download() {
        let rendered = RenderedResume {
            bytes: b"%PDF-1.3".to_vec(),
        };
        assert_eq!(rendered.file_name(), "resume.pdf");
        assert_eq!(rendered.content_type(), "application/pdf");
    }

    #[test]
    fn unknown_template_is_rejected_before_fonts_load() {
        let data = ResumeData::new(PersonalInfo::new("Ada", "Lovelace"));
        let err = render(&data, "Nonexistent").unwrap_err();
        assert!(matches!(err, RenderError::InvalidTemplate(id) if id == "Nonexistent"));
    }

    #[test]
    fn layout_validates_input() {
        let date = NaiveDate::from_ymd_opt(1843, 1, 1).expect("valid date");
        let mut data = ResumeData::new(PersonalInfo::new("Ada", "Lovelace"));
        for _ in 0..=MAX_EXPERIENCES {
            data = data.with_experience(Experience::new("Engine", "Analyst", date, date));
        }
        let err = layout(&data, Template::Modern).unwrap_err();
        assert!(matches!(err, RenderError::Validation(_)));
    }
}
