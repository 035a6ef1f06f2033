//! Core entry point for the resume_render crate.
//!
//! Resume data is turned into an ordered sequence of [`blocks::DocumentBlock`]s by one of the
//! [`templates`], and the sequence is laid out on pages by [`builder::DocumentBuilder`].

pub mod blocks;
pub mod builder;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod form;
pub mod model;
pub mod normalize;
pub mod render;
pub mod richtext;
pub mod styles;
pub mod templates;

pub use error::{RenderError, Result};
pub use form::ResumeForm;
pub use model::{Education, Experience, PersonalInfo, ResumeData};
pub use render::{layout, render, RenderOptions, RenderedResume, Renderer};
pub use templates::Template;
