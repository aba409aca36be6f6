//! String-keyed option setters.
//!
//! A UI layer usually holds options as strings (form fields, JSON). These
//! helpers apply one `key`/`value` pair to the typed option structs. Keys use
//! the camelCase spelling the browser side uses.

use mdflip_core::{single_char, HtmlOptions, MarkupOptions};

use crate::{Error, Result};

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
pub fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Apply one markup emitter option
pub fn apply_markup_option(options: &mut MarkupOptions, key: &str, value: &str) -> Result<()> {
    match key {
        "headingStyle" => options.heading_style = value.parse()?,
        "hr" => options.hr = value.to_string(),
        "bulletListMarker" => options.bullet_list_marker = single_char("bulletListMarker", value)?,
        "codeBlockStyle" => options.code_block_style = value.parse()?,
        "fence" => options.fence = value.to_string(),
        "emDelimiter" => options.em_delimiter = single_char("emDelimiter", value)?,
        "strongDelimiter" => options.strong_delimiter = value.to_string(),
        "lineBreak" => options.line_break = value.to_string(),
        _ => return Err(Error::UnknownOption(key.to_string())),
    }
    Ok(())
}

/// Apply one HTML emitter option
pub fn apply_html_option(options: &mut HtmlOptions, key: &str, value: &str) -> Result<()> {
    match key {
        "linkTargetBlank" => options.link_target_blank = parse_flag(key, value)?,
        "codeClassPrefix" => options.code_class_prefix = value.to_string(),
        _ => return Err(Error::UnknownOption(key.to_string())),
    }
    Ok(())
}
