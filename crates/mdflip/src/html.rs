//! HTML parsing support.
//!
//! Parses an HTML string with `scraper` and reduces the element tree to a
//! [`Document`]. html5ever repairs unbalanced or malformed markup and decodes
//! entities, so every input yields a tree. Tags without a rule are removed
//! and their content kept.
//!
//! html5ever builds trees of any depth. Past a fixed nesting depth the walk
//! stops recursing and keeps only the text of the subtree.

use mdflip_core::{plain_text, Block, Document, Inline};
use scraper::{ElementRef, Html, Node};

use crate::utilities::{
    clean_attribute, collapse_whitespace, escape_markdown, is_block, is_dropped,
    language_from_class,
};

/// Element nesting depth below which content is flattened to text
const MAX_DEPTH: usize = 100;

/// Parse an HTML string into a document.
///
/// # Example
///
/// ```rust
/// use mdflip::{parse_html, Block, Inline};
///
/// let document = parse_html("<h2>Hello <em>World</em></h2>");
/// assert_eq!(
///     document.blocks,
///     vec![Block::Heading {
///         level: 2,
///         content: vec![Inline::Text("Hello World".to_string())],
///     }]
/// );
/// ```
pub fn parse_html(html: &str) -> Document {
    parse_html_with(html, false)
}

/// Parse an HTML string, optionally escaping markup characters in text
pub fn parse_html_with(html: &str, escape_text: bool) -> Document {
    let fragment = Html::parse_fragment(html);
    let mut builder = DocumentBuilder::new(escape_text);
    builder.visit_children(fragment.root_element(), 0);
    let blocks = builder.finish();

    tracing::trace!(blocks = blocks.len(), "reduced html");
    Document::new(blocks)
}

/// Walks block-level content, gathering loose inline content into paragraphs
struct DocumentBuilder {
    escape_text: bool,
    blocks: Vec<Block>,
    pending: Vec<Inline>,
}

impl DocumentBuilder {
    fn new(escape_text: bool) -> Self {
        Self {
            escape_text,
            blocks: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }

    /// Turn any loose inline content into a paragraph
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.iter().all(|i| i.is_blank()) {
            self.blocks.push(Block::Paragraph(pending));
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush();
        self.blocks.push(block);
    }

    fn visit_children(&mut self, element: ElementRef, depth: usize) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    if !self.pending.is_empty() || !text.trim().is_empty() {
                        let text = self.text(&collapse_whitespace(text));
                        push_text(&mut self.pending, &text);
                    }
                }
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.visit_element(child_element, depth + 1);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_element(&mut self, element: ElementRef, depth: usize) {
        let tag = element.value().name().to_ascii_lowercase();

        if depth >= MAX_DEPTH {
            let text = self.flat_text(element);
            push_text(&mut self.pending, &text);
            return;
        }

        match tag.as_str() {
            "p" => {
                let inlines = self.collect_inlines(element, depth);
                self.push_block(Block::Paragraph(inlines));
            }

            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse().unwrap_or(1);
                // Headings keep only their text; nested tags are stripped
                let inlines = self.collect_inlines(element, depth);
                let text = collapse_whitespace(&plain_text(&inlines)).trim().to_string();
                self.push_block(Block::Heading {
                    level,
                    content: vec![Inline::Text(text)],
                });
            }

            "blockquote" => {
                let inlines = self.collect_inlines(element, depth);
                self.push_block(Block::Quote(inlines));
            }

            "li" => {
                let inlines = self.collect_inlines(element, depth);
                self.push_block(Block::ListItem(inlines));
            }

            "pre" => {
                let block = code_block(element);
                self.push_block(block);
            }

            "hr" => self.push_block(Block::Rule),

            "br" => {
                if self.pending.iter().all(|i| i.is_blank()) {
                    self.push_block(Block::Blank);
                } else {
                    push_break(&mut self.pending);
                }
            }

            "table" => {
                let block = self.table(element, depth);
                if let Some(block) = block {
                    self.push_block(block);
                }
            }

            _ if is_dropped(&tag) => {}

            _ if is_block(&tag) => {
                // Containers (ul, ol, div, section, ...) are transparent
                self.flush();
                self.visit_children(element, depth);
                self.flush();
            }

            _ => {
                let mut pending = std::mem::take(&mut self.pending);
                self.collect_inline_element(element, &mut pending, depth);
                self.pending = pending;
            }
        }
    }

    fn text(&self, text: &str) -> String {
        if self.escape_text {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    /// Text of a whole subtree, without recursion
    fn flat_text(&self, element: ElementRef) -> String {
        tracing::debug!(tag = element.value().name(), "nesting too deep, keeping text only");
        let mut text = String::new();
        for node in element.descendants() {
            if let Node::Text(chunk) = node.value() {
                let in_dropped = node
                    .parent()
                    .and_then(ElementRef::wrap)
                    .is_some_and(|parent| is_dropped(parent.value().name()));
                if !in_dropped {
                    text.push_str(chunk);
                }
            }
        }
        self.text(&collapse_whitespace(&text))
    }

    fn collect_inlines(&self, element: ElementRef, depth: usize) -> Vec<Inline> {
        let mut inlines = Vec::new();
        self.collect_children(element, &mut inlines, depth);
        inlines
    }

    fn collect_children(&self, element: ElementRef, out: &mut Vec<Inline>, depth: usize) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let text = self.text(&collapse_whitespace(text));
                    push_text(out, &text);
                }
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.collect_inline_element(child_element, out, depth + 1);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_inline_element(&self, element: ElementRef, out: &mut Vec<Inline>, depth: usize) {
        let tag = element.value().name().to_ascii_lowercase();

        if depth >= MAX_DEPTH {
            push_text(out, &self.flat_text(element));
            return;
        }

        match tag.as_str() {
            "strong" | "b" => out.push(Inline::Strong(self.collect_inlines(element, depth))),

            "em" | "i" => out.push(Inline::Emphasis(self.collect_inlines(element, depth))),

            "del" | "s" | "strike" => {
                out.push(Inline::Strikethrough(self.collect_inlines(element, depth)))
            }

            "code" => {
                let code: String = element.text().collect();
                if !code.is_empty() {
                    out.push(Inline::Code(code));
                }
            }

            "a" => {
                let href = clean_attribute(element.value().attr("href"));
                let content = self.collect_inlines(element, depth);
                if href.is_empty() {
                    out.extend(content);
                } else {
                    out.push(Inline::Link {
                        content,
                        url: href,
                        title: element.value().attr("title").map(str::to_string),
                    });
                }
            }

            "img" => {
                let src = clean_attribute(element.value().attr("src"));
                if !src.is_empty() {
                    out.push(Inline::Image {
                        alt: clean_attribute(element.value().attr("alt")),
                        url: src,
                        title: element.value().attr("title").map(str::to_string),
                    });
                }
            }

            "br" => push_break(out),

            _ if is_dropped(&tag) => {}

            _ if is_block(&tag) => {
                // Nested blocks flatten into lines of the enclosing block
                push_break(out);
                self.collect_children(element, out, depth);
                push_break(out);
            }

            _ => self.collect_children(element, out, depth),
        }
    }

    fn table(&self, element: ElementRef, depth: usize) -> Option<Block> {
        let mut headers = Vec::new();
        let mut rows = Vec::new();
        self.table_section(element, &mut headers, &mut rows, depth);

        if headers.is_empty() && !rows.is_empty() {
            headers = rows.remove(0);
        }
        if headers.is_empty() {
            return None;
        }
        Some(Block::Table { headers, rows })
    }

    fn table_section(
        &self,
        element: ElementRef,
        headers: &mut Vec<Vec<Inline>>,
        rows: &mut Vec<Vec<Vec<Inline>>>,
        depth: usize,
    ) {
        for child in element.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "thead" | "tbody" | "tfoot" => self.table_section(child, headers, rows, depth + 1),
                "tr" => {
                    let mut cells = Vec::new();
                    let mut is_header = false;
                    for cell in child.children().filter_map(ElementRef::wrap) {
                        let name = cell.value().name();
                        if name == "th" || name == "td" {
                            is_header |= name == "th";
                            let mut inlines = self.collect_inlines(cell, depth + 2);
                            trim_inlines(&mut inlines);
                            cells.push(inlines);
                        }
                    }
                    if cells.is_empty() {
                        continue;
                    }
                    if is_header && headers.is_empty() && rows.is_empty() {
                        *headers = cells;
                    } else {
                        rows.push(cells);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Build a code block from a `pre` element, reading the language from the
/// inner `code` element's class (or the `pre` itself)
fn code_block(pre: ElementRef) -> Block {
    let code_element = pre
        .children()
        .filter_map(ElementRef::wrap)
        .find(|c| c.value().name() == "code");

    let source = code_element.unwrap_or(pre);
    let code: String = source.text().collect();

    let language = code_element
        .and_then(|c| c.value().attr("class"))
        .or_else(|| pre.value().attr("class"))
        .and_then(language_from_class);

    Block::CodeBlock {
        language,
        code: code.trim_end_matches('\n').to_string(),
    }
}

/// Append text, merging with a preceding text node
fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Inline::Text(last)) => last.push_str(text),
        Some(Inline::LineBreak) | None if text.trim().is_empty() => {}
        _ => out.push(Inline::Text(text.to_string())),
    }
}

/// Append a line break, trimming whitespace before it and never doubling up
fn push_break(out: &mut Vec<Inline>) {
    if let Some(Inline::Text(last)) = out.last_mut() {
        let trimmed_len = last.trim_end().len();
        last.truncate(trimmed_len);
        if last.is_empty() {
            out.pop();
        }
    }
    if !out.is_empty() && !matches!(out.last(), Some(Inline::LineBreak)) {
        out.push(Inline::LineBreak);
    }
}

/// Drop leading/trailing whitespace and line breaks
fn trim_inlines(inlines: &mut Vec<Inline>) {
    while matches!(inlines.last(), Some(Inline::LineBreak)) {
        inlines.pop();
    }
    while matches!(inlines.first(), Some(Inline::LineBreak)) {
        inlines.remove(0);
    }
    if let Some(Inline::Text(first)) = inlines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        let trimmed_len = last.trim_end().len();
        last.truncate(trimmed_len);
    }
    inlines.retain(|i| !matches!(i, Inline::Text(t) if t.is_empty()));
}
