//! PDF backend built on `printpdf`.

use std::fmt::Display;

use log::trace;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use super::{CellAlign, DocumentBackend, Error, FontWeight, Table, TextStyle};
use crate::config::DocumentConfig;

/// Courier glyphs are 0.6 em wide.
const CHAR_WIDTH_EM: f32 = 0.6;
const LINE_SPACING: f32 = 1.25;

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn backend_error(err: impl Display) -> Error {
    Error::Backend(err.to_string())
}

/// A [`DocumentBackend`] writing A4 (or configured) PDF pages.
///
/// Text is set in Courier and Courier-Bold so columns line up the same way
/// they do in the text encodings. A new page starts whenever the next line
/// would cross the bottom margin.
pub struct PdfBackend {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    config: DocumentConfig,
    /// Baseline of the next line, in points from the bottom edge.
    cursor: f32,
    pages: usize,
}

impl PdfBackend {
    /// Starts a document with one empty page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if the built-in fonts cannot be added.
    pub fn new(title: &str, config: &DocumentConfig) -> Result<Self, Error> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            mm(config.page_width()),
            mm(config.page_height()),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(backend_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::CourierBold)
            .map_err(backend_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: config.page_height() - config.margin(),
            config: config.clone(),
            pages: 1,
        })
    }

    fn font(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Moves the cursor down one line of `size`, breaking the page first
    /// when the line would not fit.
    fn advance(&mut self, size: f32) {
        let height = size * LINE_SPACING;
        if self.cursor - height < self.config.margin() {
            let (page, layer) = self.doc.add_page(
                mm(self.config.page_width()),
                mm(self.config.page_height()),
                "Layer 1",
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = self.config.page_height() - self.config.margin();
            self.pages += 1;
        }
        self.cursor -= height;
    }

    fn usable_width(&self, indent: f32) -> f32 {
        self.config.page_width() - 2.0 * self.config.margin() - indent
    }

    fn put(&self, text: &str, style: &TextStyle, x: f32) {
        self.layer.use_text(
            text,
            style.size,
            mm(x),
            mm(self.cursor),
            self.font(style.weight),
        );
    }
}

impl DocumentBackend for PdfBackend {
    fn paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), Error> {
        let char_width = style.size * CHAR_WIDTH_EM;
        let per_line = ((self.usable_width(style.indent) / char_width).floor() as usize).max(1);

        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            self.advance(style.size);
        }
        for chunk in chars.chunks(per_line) {
            self.advance(style.size);
            let line: String = chunk.iter().collect();
            self.put(&line, style, self.config.margin() + style.indent);
        }
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<(), Error> {
        let style = table.style;
        let left = self.config.margin() + style.indent;
        let usable = self.usable_width(style.indent);
        let char_width = style.size * CHAR_WIDTH_EM;

        for row in &table.rows {
            self.advance(style.size);
            let mut x = left;
            for (cell, column) in row.iter().zip(&table.columns) {
                let width = usable * column.width_percent / 100.0;
                let start = match column.align {
                    CellAlign::Left => x,
                    CellAlign::Right => x + width - cell.chars().count() as f32 * char_width,
                };
                self.put(cell, &style, start);
                x += width;
            }
        }
        Ok(())
    }

    fn spacer(&mut self, points: f32) -> Result<(), Error> {
        if self.cursor - points < self.config.margin() {
            // The next line starts a fresh page anyway
            self.cursor = self.config.margin();
        } else {
            self.cursor -= points;
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, Error> {
        trace!(pages = self.pages; "Finished PDF document");
        self.doc.save_to_bytes().map_err(backend_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_bytes() {
        let config = DocumentConfig::default();
        let mut backend = Box::new(PdfBackend::new("Demo", &config).unwrap());
        backend
            .paragraph("Element: Linear", &TextStyle::bold(10.0))
            .unwrap();

        let bytes = backend.finish().unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_page_break() {
        let config = DocumentConfig::default();
        let mut backend = PdfBackend::new("Demo", &config).unwrap();
        for _ in 0..200 {
            backend.paragraph("line", &TextStyle::regular(9.0)).unwrap();
        }

        assert!(backend.pages > 1);
    }
}
