//! Conversion of block sequences into paginated PDF documents.

use genpdf::elements::{Image, LinearLayout, PaddedElement, Paragraph, StyledElement, TableLayout};
use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{self, render, Element, Margins, PaperSize, RenderResult, SimplePageDecorator, Size};
use log::debug;

use crate::blocks::{DocumentBlock, ImageBlock, TableBlock};
use crate::elements::{self, mm_from_f64, ColumnCell, ImageLimits, Spacer};
use crate::error::{RenderError, Result};
use crate::normalize;
use crate::richtext;
use crate::styles::StyleSheet;

/// Default page margin in millimetres.
pub const DEFAULT_MARGIN_MM: f64 = 18.0;

/// A block converted into its `genpdf` element.
///
/// Conversion happens for the whole sequence before anything is rendered, so style lookups and
/// picture decoding fail before a single page is produced.
enum BuiltElement {
    Text(PaddedElement<StyledElement<Paragraph>>),
    Spacer(Spacer),
    Table(TableLayout),
    Image(Image),
}

impl Element for BuiltElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        match self {
            Self::Text(element) => element.render(context, area, style),
            Self::Spacer(element) => element.render(context, area, style),
            Self::Table(element) => element.render(context, area, style),
            Self::Image(element) => element.render(context, area, style),
        }
    }
}

/// Builder for resume documents pre-configured with the crate defaults.
pub struct DocumentBuilder {
    font_family: FontFamily<FontData>,
    paper_size: Size,
    margins_mm: f64,
    title: Option<String>,
    image_limits: ImageLimits,
}

impl DocumentBuilder {
    /// Creates a builder using US Letter paper and the default margins.
    pub fn new(font_family: FontFamily<FontData>) -> Self {
        Self {
            font_family,
            paper_size: PaperSize::Letter.into(),
            margins_mm: DEFAULT_MARGIN_MM,
            title: None,
            image_limits: ImageLimits::default(),
        }
    }

    /// Sets the paper size used for the document.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the margin applied on every side of every page.
    pub fn with_margins_mm(mut self, margins_mm: f64) -> Self {
        self.margins_mm = margins_mm;
        self
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<Option<String>>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the limits applied to embedded pictures.
    pub fn with_image_limits(mut self, image_limits: ImageLimits) -> Self {
        self.image_limits = image_limits;
        self
    }

    /// Lays out `blocks` on pages and returns the serialized document.
    pub fn build(self, blocks: &[DocumentBlock], sheet: &StyleSheet) -> Result<Vec<u8>> {
        let elements = blocks
            .iter()
            .map(|block| self.convert(block, sheet))
            .collect::<Result<Vec<_>>>()?;

        let mut document = genpdf::Document::new(self.font_family);
        if let Some(title) = self.title {
            document.set_title(title);
        }
        document.set_minimal_conformance();
        document.set_paper_size(self.paper_size);

        let mut decorator = SimplePageDecorator::new();
        let margin = mm_from_f64(self.margins_mm);
        decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
        document.set_page_decorator(decorator);

        for element in elements {
            document.push(element);
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        debug!("Rendered {} bytes before normalization", bytes.len());

        normalize::pin_metadata(&bytes)
    }

    fn convert(&self, block: &DocumentBlock, sheet: &StyleSheet) -> Result<BuiltElement> {
        match block {
            DocumentBlock::Heading { text, style } | DocumentBlock::Paragraph { text, style } => {
                text_element(text, style, sheet).map(BuiltElement::Text)
            }
            DocumentBlock::Spacer { height_mm } => Ok(BuiltElement::Spacer(Spacer::new(*height_mm))),
            DocumentBlock::Table(table) => self.table_element(table, sheet).map(BuiltElement::Table),
            DocumentBlock::Image(image) => self.image_element(image).map(BuiltElement::Image),
        }
    }

    fn table_element(&self, table: &TableBlock, sheet: &StyleSheet) -> Result<TableLayout> {
        let columns = table.columns();
        if columns == 0 {
            return Err(RenderError::DocumentBuild(
                "table has no columns".to_string(),
            ));
        }

        let mut layout = TableLayout::new(table.column_weights.clone());

        let mut cell_style = Style::new();
        if let Some(color) = table.style.text_color {
            cell_style.set_color(color);
        }

        for (index, row) in table.rows.iter().enumerate() {
            if row.len() != columns {
                return Err(RenderError::DocumentBuild(format!(
                    "table row {} has {} cells, expected {}",
                    index + 1,
                    row.len(),
                    columns
                )));
            }

            let mut table_row = layout.row();
            for (column_index, cell) in row.iter().enumerate() {
                let mut column = LinearLayout::vertical();
                for block in cell {
                    column.push(self.convert(block, sheet)?);
                }
                table_row = table_row.element(ColumnCell::new(
                    column.styled(cell_style),
                    table.style.padding_mm,
                    table.style.tint(column_index),
                    table.style.border,
                ));
            }
            table_row.push()?;
        }

        Ok(layout)
    }

    fn image_element(&self, image: &ImageBlock) -> Result<Image> {
        let decoded = elements::decode_image(&image.bytes, self.image_limits)?;
        elements::sized_image(decoded, image.width_mm, image.height_mm)
    }
}

fn text_element(
    markup: &str,
    style_name: &str,
    sheet: &StyleSheet,
) -> Result<PaddedElement<StyledElement<Paragraph>>> {
    let preset = sheet.get(style_name)?;
    let base = preset.to_style();
    let spans = richtext::parse_markup(markup).map_err(|err| {
        RenderError::DocumentBuild(format!("malformed markup in '{style_name}' block: {err}"))
    })?;

    let mut paragraph = Paragraph::default();
    for span in &spans {
        paragraph.push(span.to_styled_string(base));
    }

    let space_after = mm_from_f64(preset.space_after_mm);
    Ok(paragraph
        .styled(base)
        .padded(Margins::trbl(0, 0, space_after, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles;

    #[test]
    fn unknown_style_fails_before_rendering() {
        let sheet = StyleSheet::resume();
        let err = text_element("Hello", "Heading9", &sheet).err().expect("unknown style");
        assert!(matches!(err, RenderError::UnknownStyle(name) if name == "Heading9"));
    }

    #[test]
    fn malformed_markup_is_a_build_error() {
        let sheet = StyleSheet::resume();
        let err = text_element("**unterminated", styles::NORMAL, &sheet)
            .err()
            .expect("malformed markup");
        assert!(matches!(err, RenderError::DocumentBuild(_)));
    }

    #[test]
    fn escaped_user_text_converts() {
        let sheet = StyleSheet::resume();
        let markup = richtext::escape_markup("5 * 3 [x] {y}");
        assert!(text_element(&markup, styles::NORMAL, &sheet).is_ok());
    }
}
