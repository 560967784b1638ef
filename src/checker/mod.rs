pub mod bktree;
pub mod dictionary;
pub mod distance;
pub mod keyboard;
pub mod normalizer;
pub mod suggestions;
pub mod tokenizer;

use crate::error::{Error, Result};
use crate::Issue;
use dictionary::{Dictionary, LoadReport, WordlistEntry};
use regex::Regex;
use std::ops::Range;
use suggestions::Suggester;
use tokenizer::Tokens;
use tracing::{debug, warn};

/// Knobs for [`SpellChecker::check`].
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Suggestions per issue.
    pub limit: usize,
    /// BK-tree search radius.
    pub max_distance: u32,
    /// Skip tokens made only of digits.
    pub skip_numeric: bool,
    /// Re-case suggestions after the misspelled token (`Dnya` → `Dünya`).
    pub preserve_case: bool,
    /// Tokens matching any of these are never reported.
    pub ignore_patterns: Vec<Regex>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            limit: suggestions::DEFAULT_LIMIT,
            max_distance: suggestions::DEFAULT_MAX_DISTANCE,
            skip_numeric: true,
            preserve_case: true,
            ignore_patterns: Vec::new(),
        }
    }
}

impl CheckOptions {
    /// Compile `patterns`, dropping (and logging) the invalid ones.
    pub fn with_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        for pattern in patterns {
            match Regex::new(pattern.as_ref()) {
                Ok(re) => self.ignore_patterns.push(re),
                Err(e) => warn!(pattern = pattern.as_ref(), error = %e, "invalid ignore pattern"),
            }
        }
        self
    }
}

/// A spell checking engine: one dictionary plus the options used to check
/// text against it.
///
/// Mutation (`load`, `merge_overlay`) needs `&mut self`; every query works
/// on `&self`, so a loaded checker can be shared between threads.
#[derive(Debug, Default)]
pub struct SpellChecker {
    dictionary: Dictionary,
    options: CheckOptions,
}

impl SpellChecker {
    pub fn new(options: CheckOptions) -> Self {
        Self {
            dictionary: Dictionary::new(),
            options,
        }
    }

    /// Replace the wordlist. Personal words merged earlier are kept.
    pub fn load<I>(&mut self, entries: I) -> LoadReport
    where
        I: IntoIterator<Item = WordlistEntry>,
    {
        let report = self.dictionary.load(entries);
        if !report.skipped.is_empty() {
            warn!(count = report.skipped.len(), "skipped malformed wordlist entries");
        }
        report
    }

    pub fn merge_overlay<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dictionary.merge_overlay(words)
    }

    pub fn is_valid(&self, word: &str) -> bool {
        self.dictionary.is_valid(word)
    }

    /// Up to `limit` corrections for `word`, best first.
    pub fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>> {
        self.suggester().suggest(word, limit)
    }

    /// Check a whole buffer.
    pub fn check(&self, text: &str) -> Result<Vec<Issue>> {
        self.check_region(text, 0..text.len())
    }

    /// Check `text[region]`. Offsets in the returned issues are relative
    /// to `text`. A failed suggestion search aborts the whole call, and so
    /// does a region that is not a valid slice of `text`.
    pub fn check_region(&self, text: &str, region: Range<usize>) -> Result<Vec<Issue>> {
        let slice = text.get(region.clone()).ok_or(Error::InvalidRegion {
            start: region.start,
            end: region.end,
            len: text.len(),
        })?;
        let suggester = self.suggester();
        let mut issues = Vec::new();

        for token in Tokens::with_offset(slice, region.start) {
            if self.should_ignore(token.word) || self.dictionary.is_valid(token.word) {
                continue;
            }

            let mut suggestions = suggester.suggest(token.word, self.options.limit)?;
            if self.options.preserve_case {
                for suggestion in &mut suggestions {
                    *suggestion = normalizer::match_case(token.word, suggestion);
                }
            }

            issues.push(Issue {
                word: token.word.to_string(),
                start: token.start,
                end: token.end,
                suggestions,
            });
        }

        debug!(bytes = region.len(), issues = issues.len(), "checked region");
        Ok(issues)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    fn suggester(&self) -> Suggester<'_> {
        Suggester::new(&self.dictionary).with_max_distance(self.options.max_distance)
    }

    fn should_ignore(&self, word: &str) -> bool {
        if self.options.skip_numeric && word.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }

        self.options
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.is_match(word))
    }
}
