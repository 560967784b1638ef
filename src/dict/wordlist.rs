//! Turns raw wordlist payloads into [`WordlistEntry`] records.
//!
//! Two shapes are understood:
//!
//! * newline-delimited JSON, one record per line, as served by the TDK
//!   dictionary dump (`{"madde": "kitap", ...}`), with an optional
//!   frequency field;
//! * plain text, one `word [frequency]` per line.
//!
//! Unparseable lines are reported and skipped, never fatal.

use crate::checker::dictionary::WordlistEntry;
use crate::error::Error;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(alias = "word")]
    madde: String,
    #[serde(default, alias = "frequency", alias = "freq")]
    frekans: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    JsonLines,
    PlainText,
}

impl Format {
    /// Guess the format from the first meaningful line.
    pub fn detect(content: &str) -> Self {
        let first = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'));
        match first {
            Some(line) if line.starts_with('{') => Format::JsonLines,
            _ => Format::PlainText,
        }
    }
}

#[derive(Debug, Default)]
pub struct Parsed {
    pub entries: Vec<WordlistEntry>,
    pub skipped: Vec<Error>,
}

pub fn parse(content: &str) -> Parsed {
    let format = Format::detect(content);
    let mut parsed = Parsed::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entry = match format {
            Format::JsonLines => parse_json_line(line),
            Format::PlainText => parse_plain_line(line),
        };
        match entry {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => parsed.skipped.push(Error::malformed(line_no, reason)),
        }
    }

    parsed
}

fn parse_json_line(line: &str) -> Result<WordlistEntry, String> {
    let record: JsonRecord = serde_json::from_str(line).map_err(|e| e.to_string())?;
    Ok(WordlistEntry {
        word: record.madde,
        frequency: record.frekans,
    })
}

fn parse_plain_line(line: &str) -> Result<WordlistEntry, String> {
    let mut fields = line.split_whitespace();
    let word = fields.next().ok_or_else(|| "empty line".to_string())?;
    let frequency = match fields.next() {
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| format!("invalid frequency '{}'", raw))?,
        ),
        None => None,
    };
    if fields.next().is_some() {
        return Err(format!("unexpected trailing fields after '{}'", word));
    }
    Ok(WordlistEntry {
        word: word.to_string(),
        frequency,
    })
}
