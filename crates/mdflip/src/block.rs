//! Line classification
//!
//! Every line left after fence and table extraction becomes exactly one
//! block, chosen by the first rule that matches:
//! heading, rule, list item, ordered item, quote, blank, paragraph.
//! Adjacent lines are never merged.

use mdflip_core::Block;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::parse_inlines;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6}) (.*)$").expect("HEADING: hardcoded regex is valid"));

static RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-{3,}|={3,}|\*{3,})$").expect("RULE: hardcoded regex is valid")
});

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[*+-] (.*)$").expect("LIST_ITEM: hardcoded regex is valid"));

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\. (.*)$").expect("ORDERED_ITEM: hardcoded regex is valid")
});

static QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^> (.*)$").expect("QUOTE: hardcoded regex is valid"));

/// Classify a single line
pub fn classify_line(line: &str) -> Block {
    if let Some(captures) = HEADING.captures(line) {
        return Block::Heading {
            level: captures[1].len() as u8,
            content: parse_inlines(&captures[2]),
        };
    }

    if RULE.is_match(line.trim()) {
        return Block::Rule;
    }

    if let Some(captures) = LIST_ITEM.captures(line) {
        return Block::ListItem(parse_inlines(&captures[1]));
    }

    if let Some(captures) = ORDERED_ITEM.captures(line) {
        return Block::OrderedListItem {
            // Digit runs too long for u32 still make an item
            number: captures[1].parse().unwrap_or(u32::MAX),
            content: parse_inlines(&captures[2]),
        };
    }

    if let Some(captures) = QUOTE.captures(line) {
        return Block::Quote(parse_inlines(&captures[1]));
    }

    if line.trim().is_empty() {
        return Block::Blank;
    }

    Block::Paragraph(parse_inlines(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdflip_core::Inline;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::text(s)]
    }

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("### Deep", 3, "Deep")]
    #[case("###### Six", 6, "Six")]
    fn test_headings(#[case] line: &str, #[case] level: u8, #[case] content: &str) {
        assert_eq!(
            classify_line(line),
            Block::Heading {
                level,
                content: text(content),
            }
        );
    }

    #[rstest]
    #[case("####### Seven")]
    #[case("#NoSpace")]
    #[case("plain words")]
    #[case("  - indented")]
    #[case(">no space")]
    #[case("1.no space")]
    fn test_paragraph_fallback(#[case] line: &str) {
        assert_eq!(classify_line(line), Block::Paragraph(text(line)));
    }

    #[rstest]
    #[case("---")]
    #[case("===")]
    #[case("*****")]
    #[case("  ----  ")]
    fn test_rules(#[case] line: &str) {
        assert_eq!(classify_line(line), Block::Rule);
    }

    #[test]
    fn test_mixed_rule_characters_are_not_a_rule() {
        assert_eq!(classify_line("-*-"), Block::Paragraph(text("-*-")));
    }

    #[rstest]
    #[case("* star")]
    #[case("- dash")]
    #[case("+ plus")]
    fn test_list_items(#[case] line: &str) {
        assert_eq!(classify_line(line), Block::ListItem(text(&line[2..])));
    }

    #[test]
    fn test_ordered_item() {
        assert_eq!(
            classify_line("12. twelve"),
            Block::OrderedListItem {
                number: 12,
                content: text("twelve"),
            }
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            classify_line("> *quoted*"),
            Block::Quote(vec![Inline::Emphasis(text("quoted"))])
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t")]
    fn test_blank(#[case] line: &str) {
        assert_eq!(classify_line(line), Block::Blank);
    }

    #[test]
    fn test_list_item_is_not_a_rule() {
        assert_eq!(
            classify_line("- - -"),
            Block::ListItem(text("- -"))
        );
    }
}
