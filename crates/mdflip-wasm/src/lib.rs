#![deny(clippy::all)]

//! Browser bindings for mdflip.
//!
//! The widget calls these on every input change, so [`Converter`] memoizes
//! results on the input string and the conversion direction.

use std::num::NonZeroUsize;

use lru::LruCache;
use mdflip::{
    apply_html_option, apply_markup_option, HtmlReducer, MarkupRenderer, ReduceOptions,
};
use mdflip_core::HtmlOptions;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Options object accepted from JavaScript. Missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub heading_style: Option<String>,
    pub hr: Option<String>,
    pub bullet_list_marker: Option<String>,
    pub code_block_style: Option<String>,
    pub fence: Option<String>,
    pub em_delimiter: Option<String>,
    pub strong_delimiter: Option<String>,
    pub line_break: Option<String>,
    pub escape_text: Option<bool>,
    pub link_target_blank: Option<bool>,
    pub code_class_prefix: Option<String>,
}

impl Options {
    /// Build the renderer and reducer these options describe
    pub fn build(self) -> mdflip::Result<(MarkupRenderer, HtmlReducer)> {
        let mut html = HtmlOptions::default();
        if let Some(blank) = self.link_target_blank {
            html.link_target_blank = blank;
        }
        if let Some(prefix) = self.code_class_prefix {
            apply_html_option(&mut html, "codeClassPrefix", &prefix)?;
        }

        let mut reduce = ReduceOptions {
            escape_text: self.escape_text.unwrap_or(false),
            ..Default::default()
        };
        let markup_fields = [
            ("headingStyle", self.heading_style),
            ("hr", self.hr),
            ("bulletListMarker", self.bullet_list_marker),
            ("codeBlockStyle", self.code_block_style),
            ("fence", self.fence),
            ("emDelimiter", self.em_delimiter),
            ("strongDelimiter", self.strong_delimiter),
            ("lineBreak", self.line_break),
        ];
        for (key, value) in markup_fields {
            if let Some(value) = value {
                apply_markup_option(&mut reduce.markup, key, &value)?;
            }
        }

        Ok((
            MarkupRenderer::with_options(html),
            HtmlReducer::with_options(reduce),
        ))
    }
}

/// Conversion direction, part of the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    MarkupToHtml,
    HtmlToMarkup,
}

/// Memoizing converter, independent of the JS boundary
pub struct Memo {
    renderer: MarkupRenderer,
    reducer: HtmlReducer,
    cache: LruCache<(Direction, String), String>,
}

impl Memo {
    pub fn new(renderer: MarkupRenderer, reducer: HtmlReducer, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            renderer,
            reducer,
            cache: LruCache::new(capacity),
        }
    }

    pub fn convert(&mut self, direction: Direction, input: &str) -> String {
        let key = (direction, input.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let output = match direction {
            Direction::MarkupToHtml => self.renderer.render(input),
            Direction::HtmlToMarkup => self.reducer.reduce(input),
        };
        self.cache.put(key, output.clone());
        output
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

fn options_from_js(value: JsValue) -> Result<(MarkupRenderer, HtmlReducer), JsError> {
    let options: Options = if value.is_null() || value.is_undefined() {
        Options::default()
    } else {
        serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()))?
    };
    options.build().map_err(|err| JsError::new(&err.to_string()))
}

/// Convert markup to HTML
#[wasm_bindgen(js_name = renderMarkup)]
pub fn render_markup(input: &str, options: JsValue) -> Result<String, JsError> {
    let (renderer, _) = options_from_js(options)?;
    Ok(renderer.render(input))
}

/// Convert HTML to markup
#[wasm_bindgen(js_name = reduceHtml)]
pub fn reduce_html(input: &str, options: JsValue) -> Result<String, JsError> {
    let (_, reducer) = options_from_js(options)?;
    Ok(reducer.reduce(input))
}

#[wasm_bindgen]
pub struct Converter {
    inner: Memo,
}

#[wasm_bindgen]
impl Converter {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue, capacity: Option<usize>) -> Result<Converter, JsError> {
        let (renderer, reducer) = options_from_js(options)?;
        Ok(Self {
            inner: Memo::new(
                renderer,
                reducer,
                capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
            ),
        })
    }

    /// Convert markup to HTML, reusing a cached result for repeated input
    #[wasm_bindgen(js_name = renderMarkup)]
    pub fn render_markup(&mut self, input: &str) -> String {
        self.inner.convert(Direction::MarkupToHtml, input)
    }

    /// Convert HTML to markup, reusing a cached result for repeated input
    #[wasm_bindgen(js_name = reduceHtml)]
    pub fn reduce_html(&mut self, input: &str) -> String {
        self.inner.convert(Direction::HtmlToMarkup, input)
    }

    #[wasm_bindgen(js_name = clearCache)]
    pub fn clear_cache(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_build() {
        let (renderer, reducer) = Options::default().build().unwrap();
        assert_eq!(renderer.render("# Title"), "<h1>Title</h1>");
        assert_eq!(reducer.reduce("<h2>Hi</h2>"), "## Hi");
    }

    #[test]
    fn test_options_are_applied() {
        let options = Options {
            heading_style: Some("setext".to_string()),
            em_delimiter: Some("_".to_string()),
            link_target_blank: Some(false),
            ..Default::default()
        };
        let (renderer, reducer) = options.build().unwrap();
        assert_eq!(renderer.render("[a](b)"), "<p><a href=\"b\">a</a></p>");
        assert_eq!(reducer.reduce("<h1>T</h1><em>x</em>"), "T\n=\n_x_");
    }

    #[test]
    fn test_invalid_option_is_reported() {
        let options = Options {
            code_block_style: Some("zigzag".to_string()),
            ..Default::default()
        };
        let err = options.build().unwrap_err();
        assert_eq!(err.to_string(), "unknown codeBlockStyle value: \"zigzag\"");
    }

    #[test]
    fn test_memo_caches_per_direction() {
        let (renderer, reducer) = Options::default().build().unwrap();
        let mut memo = Memo::new(renderer, reducer, 2);

        assert_eq!(memo.convert(Direction::MarkupToHtml, "*x*"), "<p><em>x</em></p>");
        assert_eq!(memo.convert(Direction::HtmlToMarkup, "*x*"), "*x*");
        assert_eq!(memo.len(), 2);

        // Hit: no new entry
        assert_eq!(memo.convert(Direction::MarkupToHtml, "*x*"), "<p><em>x</em></p>");
        assert_eq!(memo.len(), 2);

        // Capacity is bounded
        memo.convert(Direction::MarkupToHtml, "y");
        assert_eq!(memo.len(), 2);

        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let (renderer, reducer) = Options::default().build().unwrap();
        let mut memo = Memo::new(renderer, reducer, 0);
        memo.convert(Direction::MarkupToHtml, "a");
        assert_eq!(memo.len(), 1);
    }
}
