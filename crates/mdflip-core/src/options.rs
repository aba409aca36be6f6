//! Configuration options for the HTML and markup emitters

use std::str::FromStr;

/// Error raised when an option value given as a string cannot be understood
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("unknown {option} value: {value:?}")]
    UnknownValue { option: &'static str, value: String },

    #[error("{option} must not be empty")]
    Empty { option: &'static str },
}

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
    /// Use setext-style headings (underlined with = or -)
    /// Only works for h1 and h2, falls back to ATX for h3-h6
    Setext,
}

impl FromStr for HeadingStyle {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atx" => Ok(HeadingStyle::Atx),
            "setext" => Ok(HeadingStyle::Setext),
            _ => Err(OptionError::UnknownValue {
                option: "headingStyle",
                value: s.to_string(),
            }),
        }
    }
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Use fenced code blocks (```)
    #[default]
    Fenced,
    /// Use indented code blocks (4 spaces)
    Indented,
}

impl FromStr for CodeBlockStyle {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fenced" => Ok(CodeBlockStyle::Fenced),
            "indented" => Ok(CodeBlockStyle::Indented),
            _ => Err(OptionError::UnknownValue {
                option: "codeBlockStyle",
                value: s.to_string(),
            }),
        }
    }
}

/// Take the first character of a single-character option
pub fn single_char(option: &'static str, value: &str) -> Result<char, OptionError> {
    value.chars().next().ok_or(OptionError::Empty { option })
}

/// Options for markup serialization
#[derive(Debug, Clone)]
pub struct MarkupOptions {
    /// Heading style (atx or setext)
    pub heading_style: HeadingStyle,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Text written for a hard line break
    pub line_break: String,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            hr: "---".to_string(),
            bullet_list_marker: '-',
            code_block_style: CodeBlockStyle::Fenced,
            fence: "```".to_string(),
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            line_break: "\n".to_string(),
        }
    }
}

/// Options for HTML emission
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Open links in a new browsing context (`target="_blank" rel="noopener noreferrer"`)
    pub link_target_blank: bool,

    /// Class prefix put in front of a code block's language tag
    pub code_class_prefix: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            link_target_blank: true,
            code_class_prefix: "language-".to_string(),
        }
    }
}
