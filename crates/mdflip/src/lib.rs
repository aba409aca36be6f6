//! # mdflip
//!
//! Convert a lightweight markup dialect to HTML, and HTML back to markup.
//!
//! ## Design
//!
//! Both directions go through the [`Document`] AST from `mdflip-core`:
//!
//! - **Markup to HTML**: code fences are extracted first, then pipe tables,
//!   then every remaining line is classified into exactly one block. Inline
//!   spans are parsed with a single forward scan per line.
//! - **HTML to markup**: the HTML is parsed with `scraper`, reduced to a
//!   document and serialized. Unknown tags are dropped, their text kept.
//!
//! Conversions are pure functions of their input. They never fail and never
//! panic; malformed input degrades to some best-effort output.
//!
//! Known limitations: one block per line (adjacent lines are not merged
//! into one paragraph), no nested lists, and table header/body cell counts
//! are left as written.
//!
//! ## Example (markup to HTML)
//!
//! ```rust
//! let html = mdflip::render_markup_to_html("# Title\n**bold** and *italic*");
//! assert_eq!(html, "<h1>Title</h1>\n<p><strong>bold</strong> and <em>italic</em></p>");
//! ```
//!
//! ## Example (HTML to markup)
//!
//! ```rust
//! let markup = mdflip::reduce_html_to_markup("<h2>Hi</h2><p>some <b>bold</b></p>");
//! assert_eq!(markup, "## Hi\nsome **bold**");
//! ```

mod block;
mod config;
pub mod fence;
mod html;
mod inline;
mod reduce;
mod render;
pub mod table;
mod utilities;

pub use block::classify_line;
pub use config::{apply_html_option, apply_markup_option, parse_flag};
pub use html::{parse_html, parse_html_with};
pub use inline::parse_inlines;
pub use mdflip_core::{
    Block, CodeBlockStyle, Document, HeadingStyle, HtmlOptions, Inline, MarkupOptions,
    OptionError,
};
pub use reduce::{HtmlReducer, ReduceOptions};
pub use render::{parse_markup, MarkupRenderer};
pub use utilities::*;

/// Convert markup to HTML with default options
pub fn render_markup_to_html(input: &str) -> String {
    MarkupRenderer::new().render(input)
}

/// Convert HTML to markup with default options
pub fn reduce_html_to_markup(input: &str) -> String {
    HtmlReducer::new().reduce(input)
}

/// Error type for option handling. Conversions themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value for {key}: {value:?} (expected true or false)")]
    InvalidFlag { key: String, value: String },

    #[error(transparent)]
    InvalidValue(#[from] OptionError),
}

pub type Result<T> = std::result::Result<T, Error>;
