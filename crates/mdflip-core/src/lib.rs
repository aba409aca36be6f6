//! mdflip-core - Document AST and emitters
//!
//! This crate provides the data structures shared by both conversion
//! directions of `mdflip`, plus the two emitters that turn a document into
//! text.
//!
//! # Architecture
//!
//! ```text
//! Markup String ──parse──▶ ┌──────────┐ ──to_html───▶ HTML String
//!                          │ Document │
//! HTML String ──reduce───▶ └──────────┘ ──serialize─▶ Markup String
//! ```
//!
//! # Example
//!
//! ```rust
//! use mdflip_core::{serialize, to_html, Block, Document, HtmlOptions, Inline, MarkupOptions};
//!
//! let document = Document::new(vec![
//!     Block::Heading {
//!         level: 1,
//!         content: vec![Inline::Text("Hello World".to_string())],
//!     },
//!     Block::Paragraph(vec![
//!         Inline::Text("This is ".to_string()),
//!         Inline::Strong(vec![Inline::Text("bold".to_string())]),
//!         Inline::Text(" text.".to_string()),
//!     ]),
//! ]);
//!
//! let html = to_html(&document, &HtmlOptions::default());
//! assert_eq!(html, "<h1>Hello World</h1>\n<p>This is <strong>bold</strong> text.</p>");
//!
//! let markup = serialize(&document, &MarkupOptions::default());
//! assert_eq!(markup, "# Hello World\nThis is **bold** text.");
//! ```

mod ast;
mod html;
mod options;
mod serialize;

pub use ast::{inlines_text_len, plain_text, Block, Document, Inline};
pub use html::{render_inlines, to_html};
pub use options::{
    single_char, CodeBlockStyle, HeadingStyle, HtmlOptions, MarkupOptions, OptionError,
};
pub use serialize::{collapse_and_trim, serialize};
