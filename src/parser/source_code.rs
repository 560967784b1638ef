use crate::parser::CommentStyle;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    // String literals are matched too, so comment markers inside them
    // (`"http://..."`) are not taken for comments.
    static ref SLASH_COMMENT: Regex =
        Regex::new(r#""(?:[^"\\\n]|\\.)*"|//[^\n]*|/\*(?s:.*?)\*/"#).unwrap();
    static ref HASH_COMMENT: Regex =
        Regex::new(r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|#[^\n]*"#).unwrap();
}

/// Byte ranges of comment bodies, markers excluded.
pub fn regions(content: &str, style: CommentStyle) -> Vec<Range<usize>> {
    let pattern: &Regex = match style {
        CommentStyle::Slash => &SLASH_COMMENT,
        CommentStyle::Hash => &HASH_COMMENT,
    };

    pattern
        .find_iter(content)
        .filter_map(|m| {
            let text = m.as_str();
            let (open, close) = if text.starts_with("/*") {
                (2, 2)
            } else if text.starts_with("//") {
                (2, 0)
            } else if text.starts_with('#') {
                (1, 0)
            } else {
                return None;
            };
            let body = m.start() + open..m.end() - close;
            (!body.is_empty()).then_some(body)
        })
        .collect()
}
