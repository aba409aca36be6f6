//! Inline span parsing
//!
//! Parses one line of markup into [`Inline`] nodes with a single forward
//! scan. At every position the span kinds are tried in a fixed precedence:
//! code, image, link, strong, emphasis, strikethrough. Strong is always
//! tried before emphasis, so a doubled delimiter is never split into two
//! emphasis markers. Unmatched delimiters stay literal text.

use mdflip_core::Inline;
use smallvec::SmallVec;

// Most lines have few spans - avoid heap allocation
type InlineVec = SmallVec<[Inline; 4]>;

/// Parse a single line of markup into inline nodes
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    Scanner::new(text).parse()
}

/// Closing delimiters searched for ahead of the scan position
#[derive(Debug, Clone, Copy)]
enum Closer {
    Bracket,
    Paren,
    Backtick,
    Stars,
    Underscores,
    Tildes,
}

impl Closer {
    const COUNT: usize = 6;

    fn pattern(self) -> &'static str {
        match self {
            Closer::Bracket => "]",
            Closer::Paren => ")",
            Closer::Backtick => "`",
            Closer::Stars => "**",
            Closer::Underscores => "__",
            Closer::Tildes => "~~",
        }
    }
}

/// Result of the last search for one closer: searching from `from` found `found`
#[derive(Debug, Clone, Copy)]
struct Lookup {
    from: usize,
    found: Option<usize>,
}

/// One line being scanned.
///
/// Remembers the last lookup per closer. A closer missing after some offset
/// is missing after every later offset too, and one found at `p` is the
/// answer for every start up to `p`, so the line is not rescanned for each
/// unclosed opener.
struct Scanner<'a> {
    text: &'a str,
    lookups: [Lookup; Closer::COUNT],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            lookups: [Lookup {
                from: usize::MAX,
                found: None,
            }; Closer::COUNT],
        }
    }

    fn parse(mut self) -> Vec<Inline> {
        let text = self.text;
        let len = text.len();
        let mut inlines = InlineVec::new();
        let mut literal_start = 0;
        let mut i = 0;

        // Spans only start on ASCII delimiters, so every slice boundary below
        // is a char boundary.
        while i < len {
            match self.scan_span(i) {
                Some((inline, end)) => {
                    push_text(&mut inlines, &text[literal_start..i]);
                    inlines.push(inline);
                    i = end;
                    literal_start = end;
                }
                None => i += 1,
            }
        }
        push_text(&mut inlines, &text[literal_start..]);

        inlines.into_vec()
    }

    /// Byte offset of the first `closer` at or after `from`
    fn find(&mut self, closer: Closer, from: usize) -> Option<usize> {
        let lookup = &mut self.lookups[closer as usize];
        if from >= lookup.from {
            match lookup.found {
                None => return None,
                Some(found) if from <= found => return Some(found),
                Some(_) => {}
            }
        }

        let found = self
            .text
            .get(from..)
            .and_then(|rest| rest.find(closer.pattern()))
            .map(|offset| from + offset);
        *lookup = Lookup { from, found };
        found
    }

    /// Try to read a span starting at byte `i`; returns it with the end offset
    fn scan_span(&mut self, i: usize) -> Option<(Inline, usize)> {
        let text = self.text;
        let bytes = text.as_bytes();
        match bytes[i] {
            b'`' => self.code_span(i),
            b'!' if bytes.get(i + 1) == Some(&b'[') => {
                let (alt, url, end) = self.bracketed(i + 1, true)?;
                Some((
                    Inline::Image {
                        alt: alt.to_string(),
                        url: url.to_string(),
                        title: None,
                    },
                    end,
                ))
            }
            b'[' => {
                let (label, url, end) = self.bracketed(i, false)?;
                Some((
                    Inline::Link {
                        content: parse_inlines(label),
                        url: url.to_string(),
                        title: None,
                    },
                    end,
                ))
            }
            delimiter @ (b'*' | b'_') => {
                if bytes.get(i + 1) == Some(&delimiter) {
                    let closer = if delimiter == b'*' {
                        Closer::Stars
                    } else {
                        Closer::Underscores
                    };
                    if let Some((content, end)) = self.paired(i, closer) {
                        return Some((Inline::Strong(parse_inlines(content)), end));
                    }
                }
                let (content, end) = emphasis(text, i, delimiter)?;
                Some((Inline::Emphasis(parse_inlines(content)), end))
            }
            b'~' if bytes.get(i + 1) == Some(&b'~') => {
                let (content, end) = self.paired(i, Closer::Tildes)?;
                Some((Inline::Strikethrough(parse_inlines(content)), end))
            }
            _ => None,
        }
    }

    /// `` `x` `` with non-empty content; the content is never re-parsed
    fn code_span(&mut self, i: usize) -> Option<(Inline, usize)> {
        let close = self.find(Closer::Backtick, i + 1)?;
        if close == i + 1 {
            return None;
        }
        Some((Inline::Code(self.text[i + 1..close].to_string()), close + 1))
    }

    /// `[label](url)` starting at the `[` at byte `open`
    fn bracketed(
        &mut self,
        open: usize,
        allow_empty_label: bool,
    ) -> Option<(&'a str, &'a str, usize)> {
        let text = self.text;
        let close = self.find(Closer::Bracket, open + 1)?;
        if close == open + 1 && !allow_empty_label {
            return None;
        }
        if text.as_bytes().get(close + 1) != Some(&b'(') {
            return None;
        }

        let url_start = close + 2;
        let url_end = self.find(Closer::Paren, url_start)?;
        let url = text[url_start..url_end].trim();
        if url.is_empty() {
            return None;
        }

        Some((&text[open + 1..close], url, url_end + 1))
    }

    /// Content between an opening two-byte delimiter at `i` and the next
    /// occurrence of the same delimiter, with at least one byte in between
    fn paired(&mut self, i: usize, closer: Closer) -> Option<(&'a str, usize)> {
        let text = self.text;
        let start = i + 2;
        let from = if text[start..].starts_with(closer.pattern()) {
            start + 2
        } else {
            start
        };
        let close = self.find(closer, from)?;
        Some((&text[start..close], close + 2))
    }
}

fn push_text(inlines: &mut InlineVec, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        last.push_str(text);
    } else {
        inlines.push(Inline::Text(text.to_string()));
    }
}

/// Single-delimiter emphasis. Doubled delimiters inside the span belong to a
/// nested strong span and never close it.
fn emphasis(text: &str, i: usize, delimiter: u8) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let mut j = i + 1;
    while j < bytes.len() {
        if bytes[j] == delimiter {
            if bytes.get(j + 1) == Some(&delimiter) {
                j += 2;
                continue;
            }
            if j > i + 1 {
                return Some((&text[i + 1..j], j + 1));
            }
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inlines("just words"), vec![text("just words")]);
        assert_eq!(parse_inlines(""), vec![]);
    }

    #[test]
    fn test_strong_before_emphasis() {
        assert_eq!(
            parse_inlines("**a** *b*"),
            vec![
                Inline::Strong(vec![text("a")]),
                text(" "),
                Inline::Emphasis(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_underscore_variants() {
        assert_eq!(
            parse_inlines("__a__ _b_"),
            vec![
                Inline::Strong(vec![text("a")]),
                text(" "),
                Inline::Emphasis(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_strong_inside_emphasis() {
        assert_eq!(
            parse_inlines("*a **b** c*"),
            vec![Inline::Emphasis(vec![
                text("a "),
                Inline::Strong(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn test_code_is_opaque() {
        assert_eq!(
            parse_inlines("use `**x**` here"),
            vec![text("use "), Inline::Code("**x**".to_string()), text(" here")]
        );
    }

    #[test]
    fn test_link_with_formatted_label() {
        assert_eq!(
            parse_inlines("see [**docs**](https://example.com)"),
            vec![
                text("see "),
                Inline::Link {
                    content: vec![Inline::Strong(vec![text("docs")])],
                    url: "https://example.com".to_string(),
                    title: None,
                },
            ]
        );
    }

    #[test]
    fn test_image_is_not_a_link() {
        assert_eq!(
            parse_inlines("![cat](cat.png)"),
            vec![Inline::Image {
                alt: "cat".to_string(),
                url: "cat.png".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn test_image_with_empty_alt() {
        assert_eq!(
            parse_inlines("![](x.png)"),
            vec![Inline::Image {
                alt: String::new(),
                url: "x.png".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(
            parse_inlines("~~old~~ new"),
            vec![Inline::Strikethrough(vec![text("old")]), text(" new")]
        );
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        assert_eq!(parse_inlines("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
        assert_eq!(parse_inlines("[not a link]"), vec![text("[not a link]")]);
        assert_eq!(parse_inlines("``"), vec![text("``")]);
        assert_eq!(parse_inlines("~~~~"), vec![text("~~~~")]);
    }

    #[test]
    fn test_repeated_lookups_agree_with_fresh_scans() {
        assert_eq!(
            parse_inlines("[a] [b](u) `x` ``"),
            vec![
                text("[a] "),
                Inline::Link {
                    content: vec![text("b")],
                    url: "u".to_string(),
                    title: None,
                },
                text(" "),
                Inline::Code("x".to_string()),
                text(" ``"),
            ]
        );
        assert_eq!(
            parse_inlines("[[[x](y)"),
            vec![Inline::Link {
                content: vec![text("[[x")],
                url: "y".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn test_unclosed_openers_scan_in_linear_time() {
        let inputs = [
            "[a](".repeat(50_000),
            "![a](".repeat(50_000),
            "[".repeat(200_000),
            "[x".repeat(100_000) + "]",
            "`".repeat(200_000),
            "**a".repeat(50_000) + &"~~b".repeat(50_000),
        ];
        let started = Instant::now();
        for input in &inputs {
            let inlines = parse_inlines(input);
            assert!(!inlines.is_empty());
        }
        let elapsed = started.elapsed();
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            parse_inlines("héllo *wörld* ✓"),
            vec![
                text("héllo "),
                Inline::Emphasis(vec![text("wörld")]),
                text(" ✓"),
            ]
        );
    }
}
