use super::normalizer::is_word_char;
use std::str::CharIndices;

/// A word found in a text buffer. `start` and `end` are byte offsets into
/// the buffer, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub word: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Lazy iterator over the words of a text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    base: usize,
}

impl<'a> Tokens<'a> {
    /// Tokenize `text`, reporting offsets shifted by `base`. Used when
    /// `text` is a slice of a larger buffer.
    pub fn with_offset(text: &'a str, base: usize) -> Self {
        Self {
            text,
            chars: text.char_indices(),
            base,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = loop {
            let (idx, ch) = self.chars.next()?;
            if is_word_char(ch) {
                break idx;
            }
        };

        let mut end = self.text.len();
        for (idx, ch) in self.chars.by_ref() {
            if !is_word_char(ch) {
                end = idx;
                break;
            }
        }

        Some(Token {
            word: &self.text[start..end],
            start: self.base + start,
            end: self.base + end,
        })
    }
}

pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens::with_offset(text, 0)
}
