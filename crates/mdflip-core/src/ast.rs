//! Document Abstract Syntax Tree
//!
//! This module defines the nodes shared by both conversion directions.
//! Markup parsing and HTML reduction both produce a [`Document`]; the HTML
//! and markup emitters both consume one.

/// An ordered sequence of blocks. Blocks are never reordered or merged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A block-level node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Inline> },

    /// Thematic break (horizontal rule)
    Rule,

    /// Unordered list item
    ListItem(Vec<Inline>),

    /// Ordered list item, keeping the number it was written with
    OrderedListItem { number: u32, content: Vec<Inline> },

    /// Block quote line
    Quote(Vec<Inline>),

    /// Empty line
    Blank,

    /// Fenced code block. `code` is raw and never parsed as markup.
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Table with header cells and body rows.
    ///
    /// Header and row widths are independent; nothing pads or truncates them.
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),
}

/// An inline node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Strong emphasis (bold)
    Strong(Vec<Inline>),

    /// Emphasis (italic)
    Emphasis(Vec<Inline>),

    /// Strikethrough
    Strikethrough(Vec<Inline>),

    /// Inline code
    Code(String),

    /// Link with text, URL, and optional title
    Link {
        content: Vec<Inline>,
        url: String,
        title: Option<String>,
    },

    /// Image with alt text, URL, and optional title
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },

    /// Hard line break
    LineBreak,
}

impl Block {
    /// Check if this block carries no visible content
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Heading { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::Rule => false,
            Block::ListItem(inlines) | Block::Quote(inlines) | Block::Paragraph(inlines) => {
                inlines.iter().all(|i| i.is_blank())
            }
            Block::OrderedListItem { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::Blank => true,
            Block::CodeBlock { .. } => false,
            Block::Table { headers, rows } => {
                headers.iter().all(|h| h.iter().all(|i| i.is_blank()))
                    && rows
                        .iter()
                        .all(|r| r.iter().all(|c| c.iter().all(|i| i.is_blank())))
            }
        }
    }

    /// Whether this block is a list item of either kind
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem(_) | Block::OrderedListItem { .. })
    }
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Strong(inlines) | Inline::Emphasis(inlines) | Inline::Strikethrough(inlines) => {
                inlines.iter().all(|i| i.is_blank())
            }
            Inline::Code(code) => code.is_empty(),
            Inline::Link { content, .. } => content.iter().all(|i| i.is_blank()),
            Inline::Image { .. } => false,
            Inline::LineBreak => false,
        }
    }

    /// Get the rendered markup length of this inline (for table column widths)
    pub fn text_len(&self) -> usize {
        match self {
            Inline::Text(text) => text.chars().count(),
            Inline::Strong(inlines) | Inline::Strikethrough(inlines) => {
                inlines_text_len(inlines) + 4 // ** or ~~
            }
            Inline::Emphasis(inlines) => inlines_text_len(inlines) + 2,
            Inline::Code(code) => code.chars().count() + 2, // backticks
            Inline::Link { content, url, .. } => {
                inlines_text_len(content) + url.chars().count() + 4 // []()
            }
            Inline::Image { alt, url, .. } => alt.chars().count() + url.chars().count() + 5, // ![]()
            Inline::LineBreak => 0,
        }
    }

    /// Append the plain text of this inline, dropping all formatting
    pub fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(inlines)
            | Inline::Emphasis(inlines)
            | Inline::Strikethrough(inlines)
            | Inline::Link {
                content: inlines, ..
            } => {
                for inline in inlines {
                    inline.push_plain_text(out);
                }
            }
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push(' '),
        }
    }
}

/// Helper to calculate text length of inline vec
pub fn inlines_text_len(inlines: &[Inline]) -> usize {
    inlines.iter().map(|i| i.text_len()).sum()
}

/// Flatten inline content to plain text
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        inline.push_plain_text(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_blocks() {
        assert!(Block::Blank.is_blank());
        assert!(Block::Paragraph(vec![Inline::text("  ")]).is_blank());
        assert!(!Block::Rule.is_blank());
        assert!(!Block::CodeBlock {
            language: None,
            code: String::new(),
        }
        .is_blank());
    }

    #[test]
    fn test_plain_text_strips_formatting() {
        let inlines = vec![
            Inline::text("a "),
            Inline::Strong(vec![Inline::Emphasis(vec![Inline::text("b")])]),
            Inline::Link {
                content: vec![Inline::text(" c")],
                url: "u".to_string(),
                title: None,
            },
        ];
        assert_eq!(plain_text(&inlines), "a b c");
    }

    #[test]
    fn test_text_len_counts_delimiters() {
        let strong = Inline::Strong(vec![Inline::text("ab")]);
        assert_eq!(strong.text_len(), 6);
        assert_eq!(Inline::text("héllo").text_len(), 5);
    }
}
