//! Code fence extraction
//!
//! Fenced regions are pulled out of the line stream before any other pass
//! looks at it, so nothing inside a fence is ever read as markup.

use mdflip_core::Block;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening delimiter: three backticks, optionally followed directly by a language tag
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```([^\s`]*)").expect("FENCE_OPEN: hardcoded regex is valid"));

const FENCE_CLOSE: &str = "```";

/// A fenced region over line indices `[start, end)`, delimiters included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFence {
    pub start: usize,
    pub end: usize,
    pub language: Option<String>,
    /// Whether a closing delimiter was found before the end of input
    pub terminated: bool,
}

impl CodeFence {
    /// Lines strictly inside the delimiters
    pub fn content<'a, 'b>(&self, lines: &'b [&'a str]) -> &'b [&'a str] {
        let inner_end = if self.terminated { self.end - 1 } else { self.end };
        &lines[self.start + 1..inner_end]
    }

    pub fn into_block(self, lines: &[&str]) -> Block {
        let code = self.content(lines).join("\n");
        Block::CodeBlock {
            language: self.language,
            code,
        }
    }
}

/// A piece of the input after fence extraction
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// A fenced code block, already converted
    Code(Block),
    /// A run of ordinary lines for the table and block passes
    Lines(Vec<&'a str>),
}

/// Locate every fenced region. An unterminated fence runs to the end of input.
pub fn locate_fences(lines: &[&str]) -> Vec<CodeFence> {
    let mut fences = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(captures) = FENCE_OPEN.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let language = captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string);

        let close = lines[i + 1..]
            .iter()
            .position(|line| line.trim() == FENCE_CLOSE)
            .map(|offset| i + 1 + offset);

        let fence = match close {
            Some(close) => CodeFence {
                start: i,
                end: close + 1,
                language,
                terminated: true,
            },
            None => {
                tracing::debug!(line = i + 1, "code fence left open, running to end of input");
                CodeFence {
                    start: i,
                    end: lines.len(),
                    language,
                    terminated: false,
                }
            }
        };

        i = fence.end;
        fences.push(fence);
    }

    fences
}

/// Split lines into fenced code blocks and runs of ordinary lines, in order
pub fn split_fences<'a>(lines: &[&'a str]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for fence in locate_fences(lines) {
        if fence.start > cursor {
            segments.push(Segment::Lines(lines[cursor..fence.start].to_vec()));
        }
        cursor = fence.end;
        segments.push(Segment::Code(fence.into_block(lines)));
    }

    if cursor < lines.len() {
        segments.push(Segment::Lines(lines[cursor..].to_vec()));
    }

    segments
}
