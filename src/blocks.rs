//! Document blocks produced by the layout strategies.
//!
//! A strategy turns resume data into an ordered `Vec<DocumentBlock>`; the
//! [`DocumentBuilder`](crate::builder::DocumentBuilder) consumes that sequence in order.  Tables
//! hold a block sequence per cell, so multi-column layouts are expressed by nesting rather than by
//! special cases in the builder.

use genpdf::style::Color;

use crate::richtext;

/// Cell formatting applied to every cell of a [`TableBlock`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableStyle {
    /// Draw a frame around every cell.
    pub border: bool,
    /// Inner padding of every cell in millimetres.
    pub padding_mm: f64,
    /// Background tint per column; missing entries mean no tint.
    pub column_tints: Vec<Option<Color>>,
    /// Text color forced onto the cell contents.
    pub text_color: Option<Color>,
}

impl TableStyle {
    /// Returns the tint configured for `column`, if any.
    pub fn tint(&self, column: usize) -> Option<Color> {
        self.column_tints.get(column).copied().flatten()
    }
}

/// A table whose cells are block sequences laid out independently.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    /// Rows of cells; each cell is an ordered block sequence.
    pub rows: Vec<Vec<Vec<DocumentBlock>>>,
    /// Relative column widths.
    pub column_weights: Vec<usize>,
    pub style: TableStyle,
}

impl TableBlock {
    /// Creates an empty table with the given relative column widths.
    pub fn new(column_weights: impl Into<Vec<usize>>) -> Self {
        Self {
            rows: Vec::new(),
            column_weights: column_weights.into(),
            style: TableStyle::default(),
        }
    }

    /// Appends a row and returns the updated table.
    pub fn with_row(mut self, cells: Vec<Vec<DocumentBlock>>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Sets the cell style and returns the updated table.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.column_weights.len()
    }
}

/// An encoded image drawn at a fixed size.
///
/// The requested width and height are used as-is; the aspect ratio of the source is not
/// preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    pub bytes: Vec<u8>,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl ImageBlock {
    pub fn new(bytes: impl Into<Vec<u8>>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            bytes: bytes.into(),
            width_mm,
            height_mm,
        }
    }
}

/// The smallest unit consumed by the document builder.
///
/// Heading and paragraph text is inline markup, see [`crate::richtext`].
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentBlock {
    Heading { text: String, style: String },
    Paragraph { text: String, style: String },
    Spacer { height_mm: f64 },
    Table(TableBlock),
    Image(ImageBlock),
}

impl DocumentBlock {
    /// Convenience helper for building a heading block.
    pub fn heading(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self::Heading {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Convenience helper for building a paragraph block.
    pub fn paragraph(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Convenience helper for building a spacer block.
    pub fn spacer(height_mm: f64) -> Self {
        Self::Spacer { height_mm }
    }

    /// Calls `visit` for this block and, for tables, every nested block in row-major order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a DocumentBlock)) {
        visit(self);
        if let Self::Table(table) = self {
            for cell in table.rows.iter().flatten() {
                for block in cell {
                    block.walk(visit);
                }
            }
        }
    }

    /// Returns the text printed by this block and its nested blocks, one line per text block.
    ///
    /// Markup is stripped; text that does not parse as markup is returned as written.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.walk(&mut |block| match block {
            Self::Heading { text, .. } | Self::Paragraph { text, .. } => {
                lines.push(richtext::plain_text(text).unwrap_or_else(|_| text.clone()));
            }
            Self::Spacer { .. } | Self::Table(_) | Self::Image(_) => {}
        });
        lines.join("\n")
    }
}

/// Returns the text content of a whole block sequence.
pub fn text_content(blocks: &[DocumentBlock]) -> String {
    blocks
        .iter()
        .map(DocumentBlock::text_content)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Counts the image blocks in a sequence, including those nested in tables.
pub fn image_count(blocks: &[DocumentBlock]) -> usize {
    let mut count = 0;
    for block in blocks {
        block.walk(&mut |nested| {
            if matches!(nested, DocumentBlock::Image(_)) {
                count += 1;
            }
        });
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_descends_into_table_cells() {
        let table = TableBlock::new(vec![1, 1]).with_row(vec![
            vec![DocumentBlock::paragraph("**Email:** a@b.c", "Normal")],
            vec![
                DocumentBlock::spacer(2.0),
                DocumentBlock::paragraph("Phone: 1", "Normal"),
            ],
        ]);
        let blocks = vec![
            DocumentBlock::heading("Name", "Title"),
            DocumentBlock::Table(table),
        ];

        assert_eq!(text_content(&blocks), "Name\nEmail: a@b.c\nPhone: 1");
    }

    #[test]
    fn image_count_includes_nested_images() {
        let image = DocumentBlock::Image(ImageBlock::new(vec![1, 2, 3], 10.0, 10.0));
        let table = TableBlock::new(vec![1]).with_row(vec![vec![image.clone()]]);
        let blocks = vec![image, DocumentBlock::Table(table)];
        assert_eq!(image_count(&blocks), 2);
    }

    #[test]
    fn missing_tint_entries_mean_no_tint() {
        let style = TableStyle {
            column_tints: vec![Some(Color::Rgb(1, 2, 3))],
            ..TableStyle::default()
        };
        assert_eq!(style.tint(0), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(style.tint(1), None);
    }
}
