//! MarkupRenderer - the entry point for markup to HTML conversion.
//!
//! Runs the passes in order: code fences, tables, then line classification.
//! The resulting [`Document`] is handed to the HTML emitter.

use mdflip_core::{to_html, Document, HtmlOptions};

use crate::block::classify_line;
use crate::fence::{split_fences, Segment};
use crate::table::{extract_tables, Piece};

/// Parse markup into a document
pub fn parse_markup(input: &str) -> Document {
    if input.is_empty() {
        return Document::default();
    }

    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut blocks = Vec::with_capacity(lines.len());
    for segment in split_fences(&lines) {
        match segment {
            Segment::Code(block) => blocks.push(block),
            Segment::Lines(run) => {
                for piece in extract_tables(&run) {
                    match piece {
                        Piece::Table(table) => blocks.push(table),
                        Piece::Line(line) => blocks.push(classify_line(line)),
                    }
                }
            }
        }
    }

    tracing::trace!(lines = lines.len(), blocks = blocks.len(), "parsed markup");
    Document::new(blocks)
}

/// The service for converting markup to HTML
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    options: HtmlOptions,
}

impl MarkupRenderer {
    /// Create a new MarkupRenderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkupRenderer with custom options
    pub fn with_options(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Parse markup without rendering it
    pub fn parse(&self, markup: &str) -> Document {
        parse_markup(markup)
    }

    /// Convert markup to HTML
    pub fn render(&self, markup: &str) -> String {
        to_html(&self.parse(markup), &self.options)
    }

    /// Get the current options
    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut HtmlOptions {
        &mut self.options
    }
}
