//! Utility functions and constants for HTML processing.

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Elements dropped together with everything inside them
pub const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is dropped with its content
pub fn is_dropped(tag: &str) -> bool {
    DROPPED_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Escape markup special characters
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '{' | '}' | '[' | ']' | '(' | ')'
            | '#' | '+' | '-' | '.' | '!' | '|' | '~' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Collapse whitespace runs into a single space
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Extract a language tag from a `class` attribute (`language-rust`, `lang-rust`)
pub fn language_from_class(class: &str) -> Option<String> {
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*test*"), "\\*test\\*");
        assert_eq!(escape_markdown("_test_"), "\\_test\\_");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("normal"), "normal");
    }

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_is_dropped() {
        assert!(is_dropped("script"));
        assert!(is_dropped("STYLE"));
        assert!(!is_dropped("div"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n"), " ");
    }

    #[test]
    fn test_language_from_class() {
        assert_eq!(language_from_class("hl language-rust"), Some("rust".to_string()));
        assert_eq!(language_from_class("lang-js"), Some("js".to_string()));
        assert_eq!(language_from_class("language-"), None);
        assert_eq!(language_from_class("plain"), None);
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  x ")), "x");
        assert_eq!(clean_attribute(Some("   ")), "");
        assert_eq!(clean_attribute(None), "");
    }
}
