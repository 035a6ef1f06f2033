//! Element implementations built on top of `genpdf` primitives.
//!
//! This module adds the pieces the upstream crate does not ship with: a fixed-height spacer,
//! picture decoding with size limits and exact (non aspect-preserving) scaling, and a table cell
//! wrapper that pads, frames and tints its content.

use std::io::Cursor;

use image::GenericImageView;
use log::debug;

use genpdf::elements::{Image, PaddedElement};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Margins, Mm, Position, RenderResult, Scale, Size};

use crate::error::{RenderError, Result};

const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const TINT_STROKE_SPACING_MM: f64 = 0.3;
const FRAME_COLOR: Color = Color::Rgb(0, 0, 0);

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Upper bounds applied to pictures before they are decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLimits {
    /// Largest accepted encoded size in bytes.
    pub max_bytes: usize,
    /// Largest accepted width or height in pixels.
    pub max_dimension: u32,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_dimension: 4096,
        }
    }
}

/// Decodes picture bytes after checking them against `limits`.
///
/// The pixel dimensions are read from the image header first so oversized pictures are rejected
/// without allocating their full pixel buffer.
pub fn decode_image(bytes: &[u8], limits: ImageLimits) -> Result<image::DynamicImage> {
    if bytes.len() > limits.max_bytes {
        return Err(RenderError::ImageDecode(format!(
            "picture is {} bytes, the limit is {} bytes",
            bytes.len(),
            limits.max_bytes
        )));
    }

    let reader = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| RenderError::ImageDecode(format!("unable to read picture: {err}")))?;
    if reader.format().is_none() {
        return Err(RenderError::ImageDecode(
            "unrecognized picture format".to_string(),
        ));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| RenderError::ImageDecode(format!("unable to read picture header: {err}")))?;
    if width > limits.max_dimension || height > limits.max_dimension {
        return Err(RenderError::ImageDecode(format!(
            "picture is {}x{} pixels, the limit is {} pixels per side",
            width, height, limits.max_dimension
        )));
    }

    image::load_from_memory(bytes)
        .map_err(|err| RenderError::ImageDecode(format!("failed to decode picture: {err}")))
}

fn natural_size(image: &image::DynamicImage) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    (
        MM_PER_INCH * f64::from(px_width) / IMAGE_DPI,
        MM_PER_INCH * f64::from(px_height) / IMAGE_DPI,
    )
}

/// Builds a `genpdf` image drawn at exactly `width_mm` x `height_mm`.
///
/// Transparency is flattened because the PDF writer cannot embed alpha channels.
pub fn sized_image(image: image::DynamicImage, width_mm: f64, height_mm: f64) -> Result<Image> {
    let (natural_width, natural_height) = natural_size(&image);
    if natural_width <= f64::EPSILON || natural_height <= f64::EPSILON {
        return Err(RenderError::ImageDecode("picture has no pixels".to_string()));
    }

    let opaque = image::DynamicImage::ImageRgb8(image.to_rgb8());
    let mut element = Image::from_dynamic_image(opaque)
        .map_err(|err| RenderError::ImageDecode(err.to_string()))?;
    element.set_scale(Scale::new(
        width_mm / natural_width,
        height_mm / natural_height,
    ));
    debug!(
        "Scaled picture from {:.1}x{:.1} mm to {:.1}x{:.1} mm",
        natural_width, natural_height, width_mm, height_mm
    );
    Ok(element)
}

/// Empty element occupying a fixed vertical distance.
///
/// At the bottom of a page the spacer shrinks to the remaining space instead of pushing content
/// onto the next page.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm_from_f64(height_mm.max(0.0)),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Table cell content with padding, an optional background tint and an optional frame.
///
/// The tint is hatched before the content is rendered so the text stays on top.  A tinted cell
/// fills the remaining page height, so a single-row table reads as full-height columns on every
/// page it spans.
pub struct ColumnCell<E: Element> {
    inner: PaddedElement<E>,
    tint: Option<Color>,
    border: bool,
}

impl<E: Element> ColumnCell<E> {
    pub fn new(element: E, padding_mm: f64, tint: Option<Color>, border: bool) -> Self {
        let padding = mm_from_f64(padding_mm.max(0.0));
        Self {
            inner: element.padded(Margins::trbl(padding, padding, padding, padding)),
            tint,
            border,
        }
    }
}

/// Vertical offsets of the strokes hatching a tint of `height_mm`.
fn hatch_offsets(height_mm: f64) -> Vec<f64> {
    let strokes = (height_mm.max(0.0) / TINT_STROKE_SPACING_MM).floor() as usize;
    (0..=strokes)
        .map(|index| index as f64 * TINT_STROKE_SPACING_MM)
        .collect()
}

fn hatch(area: &render::Area<'_>, color: Color) {
    let width = area.size().width;
    let stroke = Style::new().with_color(color);
    for offset in hatch_offsets(mm_to_f64(area.size().height)) {
        let y = mm_from_f64(offset);
        area.draw_line(vec![Position::new(0, y), Position::new(width, y)], stroke);
    }
}

fn frame(area: &render::Area<'_>, height: Mm) {
    let width = area.size().width;
    area.draw_line(
        vec![
            Position::new(0, 0),
            Position::new(width, 0),
            Position::new(width, height),
            Position::new(0, height),
            Position::new(0, 0),
        ],
        Style::new().with_color(FRAME_COLOR),
    );
}

impl<E: Element> Element for ColumnCell<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        if let Some(color) = self.tint {
            hatch(&area, color);
        }

        let mut result = self.inner.render(context, area.clone(), style)?;
        if self.tint.is_some() {
            result.size.height = area.size().height;
        }

        if self.border {
            frame(&area, result.size.height);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgba};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_valid_png() {
        let image = decode_image(&png(12, 8), ImageLimits::default()).expect("decodes");
        assert_eq!(image.dimensions(), (12, 8));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = decode_image(b"definitely not an image", ImageLimits::default()).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(_)));
    }

    #[test]
    fn rejects_truncated_png() {
        let bytes = png(16, 16);
        let err = decode_image(&bytes[..bytes.len() / 2], ImageLimits::default()).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(_)));
    }

    #[test]
    fn rejects_pictures_over_the_byte_limit() {
        let limits = ImageLimits {
            max_bytes: 16,
            ..ImageLimits::default()
        };
        let err = decode_image(&png(4, 4), limits).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(message) if message.contains("limit")));
    }

    #[test]
    fn rejects_pictures_over_the_dimension_limit() {
        let limits = ImageLimits {
            max_dimension: 10,
            ..ImageLimits::default()
        };
        let err = decode_image(&png(11, 4), limits).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(message) if message.contains("pixels")));
    }

    #[test]
    fn sized_image_accepts_transparent_pictures() {
        let image = decode_image(&png(30, 60), ImageLimits::default()).expect("decodes");
        assert!(sized_image(image, 38.1, 38.1).is_ok());
    }

    #[test]
    fn hatching_covers_the_whole_height() {
        let offsets = hatch_offsets(3.0);
        assert_eq!(offsets.first().copied(), Some(0.0));
        assert_eq!(offsets.len(), 11);
        let last = offsets.last().copied().unwrap_or_default();
        assert!((last - 3.0).abs() < 1e-9);
        assert!(offsets
            .windows(2)
            .all(|pair| (pair[1] - pair[0] - TINT_STROKE_SPACING_MM).abs() < 1e-9));
    }

    #[test]
    fn empty_area_gets_a_single_stroke() {
        assert_eq!(hatch_offsets(0.0), vec![0.0]);
        assert_eq!(hatch_offsets(-1.0), vec![0.0]);
    }

    #[test]
    fn millimetre_helpers_round_trip() {
        assert!((mm_to_f64(mm_from_f64(38.1)) - 38.1).abs() < 1e-9);
    }
}
