//! HtmlReducer - the entry point for HTML to markup conversion.

use mdflip_core::{serialize, Document, MarkupOptions};

use crate::config::apply_markup_option;
use crate::html::parse_html_with;
use crate::Result;

/// Options for HtmlReducer
#[derive(Debug, Clone, Default)]
pub struct ReduceOptions {
    /// How the markup is written
    pub markup: MarkupOptions,

    /// Escape markup special characters found in HTML text
    pub escape_text: bool,
}

impl ReduceOptions {
    /// Set one option from its string form, as sent by a UI layer.
    ///
    /// Accepts every [`MarkupOptions`] key plus `escapeText`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "escapeText" => {
                self.escape_text = crate::config::parse_flag(key, value)?;
                Ok(())
            }
            _ => apply_markup_option(&mut self.markup, key, value),
        }
    }
}

/// The service for converting HTML to markup
#[derive(Debug, Clone, Default)]
pub struct HtmlReducer {
    options: ReduceOptions,
}

impl HtmlReducer {
    /// Create a new HtmlReducer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an HtmlReducer with custom options
    pub fn with_options(options: ReduceOptions) -> Self {
        Self { options }
    }

    /// Parse HTML into a document without serializing it
    pub fn parse(&self, html: &str) -> Document {
        parse_html_with(html, self.options.escape_text)
    }

    /// Convert HTML to markup. Never fails; unknown tags are dropped and
    /// their text kept.
    pub fn reduce(&self, html: &str) -> String {
        serialize(&self.parse(html), &self.options.markup)
    }

    /// Get the current options
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ReduceOptions {
        &mut self.options
    }
}
