//! Error types for the resume renderer.

use thiserror::Error;

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures surfaced by a render call.
///
/// Rendering is all-or-nothing: whenever one of these is returned no bytes were produced.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A resume field is missing or malformed at the data boundary.
    #[error("Invalid resume data: {0}")]
    Validation(String),

    /// The requested template identifier is not one of the known templates.
    #[error("Unknown template '{0}'; expected one of: Professional, Modern, Sidebar")]
    InvalidTemplate(String),

    /// The picture bytes could not be decoded or exceed the configured limits.
    #[error("Picture could not be used: {0}")]
    ImageDecode(String),

    /// A block referenced a style that the style sheet does not define.
    #[error("Style '{0}' is not defined in the style sheet")]
    UnknownStyle(String),

    /// No usable font family could be loaded.
    #[error("Failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),

    /// Pagination or serialization of the document failed.
    #[error("Failed to build document: {0}")]
    DocumentBuild(String),
}

impl RenderError {
    /// Returns whether the failure was caused by the caller's input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidTemplate(_) | Self::ImageDecode(_)
        )
    }
}

impl From<genpdf::error::Error> for RenderError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::DocumentBuild(err.to_string())
    }
}
