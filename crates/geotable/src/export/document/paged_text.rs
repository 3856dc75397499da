//! Plain-text pages separated by form feeds.

use log::trace;

use super::{CellAlign, DocumentBackend, Error, Table, TextStyle};
use crate::config::DocumentConfig;

/// Points of horizontal space taken by one character.
const POINTS_PER_CHAR: f32 = 6.0;
/// Points of vertical space taken by one line.
const POINTS_PER_LINE: f32 = 12.0;
const FORM_FEED: char = '\u{000C}';

/// A [`DocumentBackend`] producing fixed-width text.
///
/// Paragraphs longer than the line width wrap; table cells never do, so a
/// value is always printed whole. Fonts are not representable and are
/// ignored.
#[derive(Debug)]
pub struct PagedTextBackend {
    line_width: usize,
    lines_per_page: usize,
    out: String,
    lines_on_page: usize,
    pages: usize,
}

impl PagedTextBackend {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            line_width: config.line_width(),
            lines_per_page: config.lines_per_page(),
            out: String::new(),
            lines_on_page: 0,
            pages: 1,
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.lines_on_page == self.lines_per_page {
            self.out.push(FORM_FEED);
            self.lines_on_page = 0;
            self.pages += 1;
        }
        self.out.push_str(line.trim_end());
        self.out.push('\n');
        self.lines_on_page += 1;
    }
}

fn indent_chars(style: &TextStyle) -> usize {
    (style.indent / POINTS_PER_CHAR).round().max(0.0) as usize
}

impl DocumentBackend for PagedTextBackend {
    fn paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), Error> {
        let indent = " ".repeat(indent_chars(style));
        let width = self.line_width.saturating_sub(indent.len()).max(1);

        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            self.push_line("");
        }
        for chunk in chars.chunks(width) {
            let line: String = chunk.iter().collect();
            self.push_line(&format!("{indent}{line}"));
        }
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<(), Error> {
        let indent = indent_chars(&table.style);
        let usable = self.line_width.saturating_sub(indent) as f32;

        for row in &table.rows {
            let mut line = " ".repeat(indent);
            for (cell, column) in row.iter().zip(&table.columns) {
                let width = (usable * column.width_percent / 100.0).floor() as usize;
                match column.align {
                    CellAlign::Left => line.push_str(&format!("{cell:<width$}")),
                    CellAlign::Right => line.push_str(&format!("{cell:>width$}")),
                }
            }
            self.push_line(&line);
        }
        Ok(())
    }

    fn spacer(&mut self, points: f32) -> Result<(), Error> {
        let lines = (points / POINTS_PER_LINE).ceil().max(1.0) as usize;
        for _ in 0..lines {
            self.push_line("");
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, Error> {
        trace!(pages = self.pages; "Finished paged text document");
        Ok(self.out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::Column;

    fn backend(lines_per_page: usize) -> PagedTextBackend {
        let config: DocumentConfig =
            toml::from_str(&format!("lines_per_page = {lines_per_page}\nline_width = 40")).unwrap();
        PagedTextBackend::new(&config)
    }

    #[test]
    fn test_form_feed_between_pages() {
        let mut backend = backend(2);
        for text in ["one", "two", "three"] {
            backend.paragraph(text, &TextStyle::regular(9.0)).unwrap();
        }

        let text = String::from_utf8(Box::new(backend).finish().unwrap()).unwrap();

        assert_eq!(text, "one\ntwo\n\u{000C}three\n");
    }

    #[test]
    fn test_long_paragraph_wraps() {
        let mut backend = backend(60);
        backend
            .paragraph(&"x".repeat(50), &TextStyle::regular(9.0))
            .unwrap();

        let text = String::from_utf8(Box::new(backend).finish().unwrap()).unwrap();

        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_table_alignment() {
        let mut backend = backend(60);
        backend
            .table(&Table {
                columns: vec![
                    Column {
                        width_percent: 25.0,
                        align: CellAlign::Left,
                    },
                    Column {
                        width_percent: 75.0,
                        align: CellAlign::Right,
                    },
                ],
                rows: vec![vec!["PC".to_string(), "12+50.00".to_string()]],
                style: TextStyle::regular(9.0),
            })
            .unwrap();

        let text = String::from_utf8(Box::new(backend).finish().unwrap()).unwrap();

        assert_eq!(text, format!("{:<10}{:>30}\n", "PC", "12+50.00"));
    }

    #[test]
    fn test_indent() {
        let mut backend = backend(60);
        backend
            .paragraph("Radius", &TextStyle::regular(9.0).indented(12.0))
            .unwrap();

        let text = String::from_utf8(Box::new(backend).finish().unwrap()).unwrap();

        assert_eq!(text, "  Radius\n");
    }
}
