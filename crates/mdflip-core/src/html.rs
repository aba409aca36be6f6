//! HTML emission
//!
//! Renders a [`Document`] as HTML. Each block becomes one element and blocks
//! are joined with a newline, in document order.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ast::{Block, Document, Inline};
use crate::options::HtmlOptions;

/// Render a document to an HTML string
pub fn to_html(document: &Document, options: &HtmlOptions) -> String {
    let mut output = String::with_capacity(1024);

    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        render_block(block, options, &mut output);
    }

    output
}

fn render_block(block: &Block, options: &HtmlOptions, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!("<h{level}>"));
            render_inlines(content, options, out);
            out.push_str(&format!("</h{level}>"));
        }

        Block::Rule => out.push_str("<hr>"),

        Block::ListItem(content) | Block::OrderedListItem { content, .. } => {
            wrap("li", content, options, out)
        }

        Block::Quote(content) => wrap("blockquote", content, options, out),

        Block::Blank => out.push_str("<br>"),

        Block::CodeBlock { language, code } => {
            out.push_str("<pre><code");
            if let Some(language) = language.as_deref().filter(|l| !l.is_empty()) {
                out.push_str(" class=\"");
                out.push_str(&encode_double_quoted_attribute(&format!(
                    "{}{}",
                    options.code_class_prefix, language
                )));
                out.push('"');
            }
            out.push('>');
            out.push_str(&encode_text(code));
            out.push_str("</code></pre>");
        }

        Block::Table { headers, rows } => render_table(headers, rows, options, out),

        Block::Paragraph(content) => wrap("p", content, options, out),
    }
}

fn wrap(tag: &str, content: &[Inline], options: &HtmlOptions, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_inlines(content, options, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_table(
    headers: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
    options: &HtmlOptions,
    out: &mut String,
) {
    out.push_str("<table>\n<thead>\n<tr>");
    for cell in headers {
        wrap("th", cell, options, out);
    }
    out.push_str("</tr>\n</thead>\n<tbody>");
    for row in rows {
        out.push_str("\n<tr>");
        for cell in row {
            wrap("td", cell, options, out);
        }
        out.push_str("</tr>");
    }
    out.push_str("\n</tbody>\n</table>");
}

/// Render inline content to HTML
pub fn render_inlines(inlines: &[Inline], options: &HtmlOptions, out: &mut String) {
    for inline in inlines {
        render_inline(inline, options, out);
    }
}

fn render_inline(inline: &Inline, options: &HtmlOptions, out: &mut String) {
    match inline {
        // Plain text is passed through so raw inline HTML survives
        Inline::Text(text) => out.push_str(text),

        Inline::Strong(content) => wrap("strong", content, options, out),

        Inline::Emphasis(content) => wrap("em", content, options, out),

        Inline::Strikethrough(content) => wrap("del", content, options, out),

        Inline::Code(code) => {
            out.push_str("<code>");
            out.push_str(&encode_text(code));
            out.push_str("</code>");
        }

        Inline::Link {
            content,
            url,
            title,
        } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push('"');
            push_title(title.as_deref(), out);
            if options.link_target_blank {
                out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
            }
            out.push('>');
            render_inlines(content, options, out);
            out.push_str("</a>");
        }

        Inline::Image { alt, url, title } => {
            out.push_str("<img src=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push_str("\" alt=\"");
            out.push_str(&encode_double_quoted_attribute(alt));
            out.push('"');
            push_title(title.as_deref(), out);
            out.push('>');
        }

        Inline::LineBreak => out.push_str("<br>"),
    }
}

fn push_title(title: Option<&str>, out: &mut String) {
    if let Some(title) = title {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(title));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blocks: Vec<Block>) -> String {
        to_html(&Document::new(blocks), &HtmlOptions::default())
    }

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::text(s)]
    }

    #[test]
    fn test_blocks_joined_by_newline() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                content: text("Title"),
            },
            Block::Rule,
            Block::ListItem(text("a")),
            Block::OrderedListItem {
                number: 3,
                content: text("b"),
            },
            Block::Quote(text("q")),
            Block::Blank,
            Block::Paragraph(text("p")),
        ];
        assert_eq!(
            render(blocks),
            "<h1>Title</h1>\n<hr>\n<li>a</li>\n<li>b</li>\n<blockquote>q</blockquote>\n<br>\n<p>p</p>"
        );
    }

    #[test]
    fn test_code_block_is_escaped() {
        let block = Block::CodeBlock {
            language: Some("html".to_string()),
            code: "<b>&</b>\n**x**".to_string(),
        };
        assert_eq!(
            render(vec![block]),
            "<pre><code class=\"language-html\">&lt;b&gt;&amp;&lt;/b&gt;\n**x**</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let block = Block::CodeBlock {
            language: None,
            code: "x".to_string(),
        };
        assert_eq!(render(vec![block]), "<pre><code>x</code></pre>");
    }

    #[test]
    fn test_link_attributes() {
        let block = Block::Paragraph(vec![Inline::Link {
            content: text("go"),
            url: "https://example.com/?a=\"b\"".to_string(),
            title: None,
        }]);
        assert_eq!(
            render(vec![block]),
            "<p><a href=\"https://example.com/?a=&quot;b&quot;\" target=\"_blank\" rel=\"noopener noreferrer\">go</a></p>"
        );
    }

    #[test]
    fn test_link_without_target() {
        let options = HtmlOptions {
            link_target_blank: false,
            ..Default::default()
        };
        let document = Document::new(vec![Block::Paragraph(vec![Inline::Link {
            content: text("go"),
            url: "/x".to_string(),
            title: None,
        }])]);
        assert_eq!(to_html(&document, &options), "<p><a href=\"/x\">go</a></p>");
    }

    #[test]
    fn test_image() {
        let block = Block::Paragraph(vec![Inline::Image {
            alt: "cat".to_string(),
            url: "cat.png".to_string(),
            title: None,
        }]);
        assert_eq!(render(vec![block]), "<p><img src=\"cat.png\" alt=\"cat\"></p>");
    }

    #[test]
    fn test_table_keeps_mismatched_widths() {
        let block = Block::Table {
            headers: vec![text("A"), text("B")],
            rows: vec![vec![text("1")], vec![text("1"), text("2"), text("3")]],
        };
        assert_eq!(
            render(vec![block]),
            "<table>\n<thead>\n<tr><th>A</th><th>B</th></tr>\n</thead>\n<tbody>\n<tr><td>1</td></tr>\n<tr><td>1</td><td>2</td><td>3</td></tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_nested_inlines() {
        let block = Block::Paragraph(vec![
            Inline::Strong(vec![Inline::Emphasis(text("x"))]),
            Inline::Strikethrough(text("y")),
            Inline::Code("<z>".to_string()),
        ]);
        assert_eq!(
            render(vec![block]),
            "<p><strong><em>x</em></strong><del>y</del><code>&lt;z&gt;</code></p>"
        );
    }
}
