//! Named text presets shared by the layout strategies and the document builder.

use std::collections::BTreeMap;

use genpdf::style::{Color, Style};

use crate::error::{RenderError, Result};

/// Large name line used by the modern template.
pub const TITLE: &str = "Title";
/// Name line of the professional and sidebar templates.
pub const CUSTOM_HEADING: &str = "CustomHeading";
/// Section headings.
pub const CUSTOM_SUB_HEADING: &str = "CustomSubHeading";
/// Body text inside the sidebar columns.
pub const CUSTOM_BODY: &str = "CustomBody";
/// Compact body text.
pub const NORMAL: &str = "Normal";

/// Formatting attributes of a single named style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: u8,
    /// Vertical gap after the element in millimetres.
    pub space_after_mm: f64,
    pub color: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    /// Creates a regular style with the given font size and no spacing.
    pub fn new(font_size: u8) -> Self {
        Self {
            font_size,
            space_after_mm: 0.0,
            color: None,
            bold: false,
        }
    }

    /// Sets the spacing after the element and returns the updated style.
    pub fn with_space_after(mut self, space_after_mm: f64) -> Self {
        self.space_after_mm = space_after_mm;
        self
    }

    /// Sets the text color and returns the updated style.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Marks the style as bold and returns it.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Converts the preset to a `genpdf` style.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new().with_font_size(self.font_size);
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        style
    }
}

/// Mapping from style names to [`TextStyle`] presets.
///
/// A sheet is built for every render call and is not modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    styles: BTreeMap<String, TextStyle>,
}

impl StyleSheet {
    /// Creates an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the sheet used by every resume template.
    pub fn resume() -> Self {
        Self::new()
            .with_style(
                TITLE,
                TextStyle::new(24)
                    .with_space_after(6.0)
                    .with_color(Color::Rgb(0x1F, 0x29, 0x33))
                    .bold(),
            )
            .with_style(
                CUSTOM_HEADING,
                TextStyle::new(16)
                    .with_space_after(7.0)
                    .with_color(Color::Rgb(0x4B, 0x8B, 0xBE))
                    .bold(),
            )
            .with_style(
                CUSTOM_SUB_HEADING,
                TextStyle::new(14)
                    .with_space_after(3.5)
                    .with_color(Color::Rgb(0x30, 0x69, 0x98))
                    .bold(),
            )
            .with_style(CUSTOM_BODY, TextStyle::new(12).with_space_after(3.5))
            .with_style(NORMAL, TextStyle::new(10).with_space_after(1.5))
    }

    /// Adds or replaces a named style and returns the updated sheet.
    pub fn with_style(mut self, name: impl Into<String>, style: TextStyle) -> Self {
        self.styles.insert(name.into(), style);
        self
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Result<&TextStyle> {
        self.styles
            .get(name)
            .ok_or_else(|| RenderError::UnknownStyle(name.to_string()))
    }

    /// Returns whether the sheet defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}
