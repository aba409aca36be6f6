//! Markup serialization
//!
//! Converts a [`Document`] into markup text.

use crate::ast::{inlines_text_len, Block, Document, Inline};
use crate::options::{CodeBlockStyle, HeadingStyle, MarkupOptions};

/// Serialize a document to a markup string.
///
/// Every block ends with a newline, so each lands on its own line. A
/// [`Block::Blank`] writes nothing and leaves an empty line behind.
pub fn serialize(document: &Document, options: &MarkupOptions) -> String {
    let mut output = String::with_capacity(1024);
    let mut previous: Option<&Block> = None;

    for block in document.blocks.iter().filter(|b| is_written(b)) {
        if let Some(prev) = previous {
            out_separator(prev, block, &mut output);
        }
        serialize_block(block, options, &mut output);
        previous = Some(block);
    }

    // Post-process: collapse multiple newlines and trim
    collapse_and_trim(&mut output);
    output
}

/// Headings and blank lines are always written; other blocks only with content
fn is_written(block: &Block) -> bool {
    matches!(block, Block::Heading { .. } | Block::Blank) || !block.is_blank()
}

/// Adjacent tables need an empty line or they read back as one table
fn out_separator(prev: &Block, next: &Block, out: &mut String) {
    let both_tables = matches!(prev, Block::Table { .. }) && matches!(next, Block::Table { .. });
    out.push_str(if both_tables { "\n\n" } else { "\n" });
}

fn serialize_block(block: &Block, options: &MarkupOptions, out: &mut String) {
    match block {
        Block::Heading { level, content } => serialize_heading(*level, content, options, out),

        Block::Rule => out.push_str(&options.hr),

        Block::ListItem(inlines) => {
            out.push(options.bullet_list_marker);
            out.push(' ');
            push_trimmed(inlines, options, out);
        }

        Block::OrderedListItem { number, content } => {
            out.push_str(&number.to_string());
            out.push_str(". ");
            push_trimmed(content, options, out);
        }

        Block::Quote(inlines) => {
            let mut content = String::new();
            push_trimmed(inlines, options, &mut content);
            for (i, line) in content.lines().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push('>');
                if !line.is_empty() {
                    out.push(' ');
                    out.push_str(line);
                }
            }
        }

        Block::Blank => {}

        Block::CodeBlock { language, code } => {
            serialize_code_block(language.as_deref(), code, options, out)
        }

        Block::Table { headers, rows } => serialize_table(headers, rows, options, out),

        Block::Paragraph(inlines) => push_trimmed(inlines, options, out),
    }
}

fn push_trimmed(inlines: &[Inline], options: &MarkupOptions, out: &mut String) {
    let mut content = String::new();
    serialize_inlines(inlines, options, &mut content);
    out.push_str(content.trim());
}

fn serialize_heading(level: u8, content: &[Inline], options: &MarkupOptions, out: &mut String) {
    let mut text = String::new();
    serialize_inlines(content, options, &mut text);
    let text = text.trim();

    match options.heading_style {
        HeadingStyle::Setext if level <= 2 && !text.is_empty() => {
            out.push_str(text);
            out.push('\n');
            let underline = if level == 1 { '=' } else { '-' };
            for _ in 0..text.chars().count() {
                out.push(underline);
            }
        }
        _ => {
            for _ in 0..level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(text);
        }
    }
}

fn serialize_code_block(
    language: Option<&str>,
    code: &str,
    options: &MarkupOptions,
    out: &mut String,
) {
    match options.code_block_style {
        CodeBlockStyle::Fenced => {
            out.push_str(&options.fence);
            out.push_str(language.unwrap_or(""));
            out.push('\n');
            out.push_str(code);
            out.push('\n');
            out.push_str(&options.fence);
        }
        CodeBlockStyle::Indented => {
            for (i, line) in code.lines().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str("    ");
                out.push_str(line);
            }
        }
    }
}

fn serialize_table(
    headers: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
    options: &MarkupOptions,
    out: &mut String,
) {
    if headers.is_empty() {
        return;
    }

    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| inlines_text_len(h)).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(inlines_text_len(cell));
            }
        }
    }

    // Minimum width of 3 for separator
    for w in &mut widths {
        *w = (*w).max(3);
    }

    serialize_table_row(headers, &widths, options, out);

    // Separator row
    out.push('\n');
    out.push('|');
    for &width in &widths {
        out.push(' ');
        for _ in 0..width {
            out.push('-');
        }
        out.push_str(" |");
    }

    for row in rows {
        out.push('\n');
        serialize_table_row(row, &widths, options, out);
    }
}

fn serialize_table_row(
    cells: &[Vec<Inline>],
    widths: &[usize],
    options: &MarkupOptions,
    out: &mut String,
) {
    out.push('|');
    for (i, cell) in cells.iter().enumerate() {
        let mut text = String::new();
        serialize_inlines(cell, options, &mut text);
        let text = text.replace('\n', " ");
        out.push(' ');
        out.push_str(text.trim());
        let width = widths.get(i).copied().unwrap_or(3);
        let padding = width.saturating_sub(text.trim().chars().count());
        for _ in 0..padding {
            out.push(' ');
        }
        out.push_str(" |");
    }
}

fn serialize_inlines(inlines: &[Inline], options: &MarkupOptions, out: &mut String) {
    for inline in inlines {
        serialize_inline(inline, options, out);
    }
}

/// Wrap whatever `content` serializes to in `open`/`close`, dropping it when blank
fn serialize_wrapped(
    content: &[Inline],
    open: &str,
    close: &str,
    options: &MarkupOptions,
    out: &mut String,
) {
    let start = out.len();
    serialize_inlines(content, options, out);
    if out[start..].trim().is_empty() {
        out.truncate(start);
    } else {
        let inner = out[start..].to_string();
        out.truncate(start);
        out.push_str(open);
        out.push_str(&inner);
        out.push_str(close);
    }
}

fn serialize_inline(inline: &Inline, options: &MarkupOptions, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),

        Inline::Strong(content) => serialize_wrapped(
            content,
            &options.strong_delimiter,
            &options.strong_delimiter,
            options,
            out,
        ),

        Inline::Emphasis(content) => {
            let delimiter = options.em_delimiter.to_string();
            serialize_wrapped(content, &delimiter, &delimiter, options, out)
        }

        Inline::Strikethrough(content) => serialize_wrapped(content, "~~", "~~", options, out),

        Inline::Code(code) => {
            if !code.is_empty() {
                let backticks = if code.contains('`') { "``" } else { "`" };
                let space = if code.starts_with('`') || code.ends_with('`') {
                    " "
                } else {
                    ""
                };
                out.push_str(backticks);
                out.push_str(space);
                out.push_str(code);
                out.push_str(space);
                out.push_str(backticks);
            }
        }

        Inline::Link {
            content,
            url,
            title,
        } => {
            out.push('[');
            serialize_inlines(content, options, out);
            out.push_str("](");
            out.push_str(url);
            push_title(title.as_deref(), out);
            out.push(')');
        }

        Inline::Image { alt, url, title } => {
            out.push_str("![");
            out.push_str(alt);
            out.push_str("](");
            out.push_str(url);
            push_title(title.as_deref(), out);
            out.push(')');
        }

        Inline::LineBreak => out.push_str(&options.line_break),
    }
}

fn push_title(title: Option<&str>, out: &mut String) {
    if let Some(t) = title {
        out.push_str(" \"");
        out.push_str(t);
        out.push('"');
    }
}

/// Collapse runs of three or more newlines into exactly two and trim
/// leading/trailing newlines, in place
pub fn collapse_and_trim(s: &mut String) {
    let trimmed = s.trim_matches('\n');
    let mut result = String::with_capacity(trimmed.len());
    let mut newline_count = 0;

    for c in trimmed.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    *s = result;
}
