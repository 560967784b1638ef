use super::bktree::BkTree;
use super::normalizer::{self, is_word_char};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Weight given to words merged from the personal dictionary.
pub const OVERLAY_WEIGHT: u32 = 10;
const DEFAULT_WEIGHT: u32 = 1;
/// Fixed so that two loads of the same wordlist build the same tree.
const SHUFFLE_SEED: u64 = 0x7961_7a69_6d00_0001;

/// One record of a wordlist, already normalized into the load-time schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistEntry {
    pub word: String,
    pub frequency: Option<u32>,
}

impl WordlistEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            frequency: None,
        }
    }

    pub fn with_frequency(word: impl Into<String>, frequency: u32) -> Self {
        Self {
            word: word.into(),
            frequency: Some(frequency),
        }
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Distinct base words now in the dictionary.
    pub loaded: usize,
    /// Entries whose word was already seen earlier in the same load.
    pub duplicates: usize,
    /// Entries that could not be used, one error each.
    pub skipped: Vec<Error>,
}

impl LoadReport {
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.loaded == 0 {
            Err(Error::EmptyDictionary)
        } else {
            Ok(())
        }
    }
}

/// The dictionary index: membership, weights, a folded-form lookup and the
/// BK-tree used for bounded edit-distance search.
///
/// The tree holds folded keys, so a search measures distance without
/// diacritics and every hit expands to the words sharing that key.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    overlay: HashSet<String>,
    weights: HashMap<String, u32>,
    folded: HashMap<String, Vec<String>>,
    pub(crate) tree: BkTree,
    /// Length in characters of the longest canonical word.
    longest: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from `entries`, replacing every base word. Words
    /// merged through [`Dictionary::merge_overlay`] are kept.
    pub fn load<I>(&mut self, entries: I) -> LoadReport
    where
        I: IntoIterator<Item = WordlistEntry>,
    {
        let overlay = std::mem::take(&mut self.overlay);
        *self = Self::default();

        let mut report = LoadReport::default();
        let mut accepted: Vec<String> = Vec::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            let line = idx + 1;
            let canonical = match canonicalize_entry(&entry) {
                Ok(canonical) => canonical,
                Err(reason) => {
                    debug!(line, word = %entry.word, %reason, "skipping wordlist entry");
                    report.skipped.push(Error::malformed(line, reason));
                    continue;
                }
            };

            let weight = entry.frequency.unwrap_or(DEFAULT_WEIGHT);
            match self.weights.get_mut(&canonical) {
                Some(existing) => {
                    *existing = (*existing).max(weight);
                    report.duplicates += 1;
                }
                None => {
                    self.weights.insert(canonical.clone(), weight);
                    accepted.push(canonical);
                }
            }
        }

        // Wordlists usually arrive sorted, which skews the tree badly.
        accepted.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
        for word in accepted {
            self.index(word);
        }
        report.loaded = self.words.len();

        let restored = self.merge_overlay(overlay);
        info!(
            loaded = report.loaded,
            duplicates = report.duplicates,
            skipped = report.skipped.len(),
            overlay = restored,
            "dictionary loaded"
        );
        report
    }

    /// Add user words. Returns how many were new to the dictionary.
    pub fn merge_overlay<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            let canonical = normalizer::to_lower(word.as_ref().trim());
            if canonical.is_empty() {
                continue;
            }
            self.overlay.insert(canonical.clone());
            if self.words.contains(&canonical) {
                continue;
            }
            self.weights.insert(canonical.clone(), OVERLAY_WEIGHT);
            self.index(canonical);
            added += 1;
        }
        if added > 0 {
            debug!(added, total = self.words.len(), "merged personal words");
        }
        added
    }

    fn index(&mut self, canonical: String) {
        let key = normalizer::fold(&canonical);
        self.tree.insert(&key);
        self.longest = self.longest.max(canonical.chars().count());
        self.folded.entry(key).or_default().push(canonical.clone());
        self.words.insert(canonical);
    }

    /// Case-insensitive, diacritic-exact membership.
    pub fn is_valid(&self, word: &str) -> bool {
        self.words.contains(&normalizer::to_lower(word))
    }

    /// The stored form of an already canonical word.
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.words.get(canonical).map(String::as_str)
    }

    pub fn weight(&self, canonical: &str) -> u32 {
        self.weights.get(canonical).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Words whose folded form equals `folded`.
    pub fn folded_matches(&self, folded: &str) -> &[String] {
        self.folded.get(folded).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Words whose folded form is within `max_distance` edits of the folded
    /// form of `word`, with that distance.
    pub fn search_within_distance(
        &self,
        word: &str,
        max_distance: u32,
    ) -> Result<Vec<(&str, u32)>> {
        let key = normalizer::fold(&normalizer::to_lower(word));
        let mut found = Vec::new();
        for (hit, distance) in self.tree.search(&key, max_distance)? {
            let words = self.folded.get(hit).ok_or_else(|| {
                Error::search_failure(format!("tree key '{hit}' has no dictionary words"))
            })?;
            found.extend(words.iter().map(|w| (w.as_str(), distance)));
        }
        Ok(found)
    }

    /// Character length of the longest word, or 0 when empty.
    pub fn longest_word_len(&self) -> usize {
        self.longest
    }

    /// Personal words in Turkish alphabetical order.
    #[cfg(test)]
    pub(crate) fn overlay_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.overlay.iter().map(String::as_str).collect();
        words.sort_by_cached_key(|w| normalizer::collation_key(w));
        words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn canonicalize_entry(entry: &WordlistEntry) -> std::result::Result<String, String> {
    let canonical = normalizer::to_lower(entry.word.trim());
    if canonical.is_empty() {
        return Err("empty word".to_string());
    }
    if let Some(bad) = canonical.chars().find(|c| !is_word_char(*c)) {
        return Err(format!("'{}' contains non-word character {:?}", entry.word, bad));
    }
    if entry.frequency == Some(0) {
        return Err(format!("'{}' has frequency 0", entry.word));
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.load(words.iter().map(|w| WordlistEntry::new(*w)));
        dict
    }

    #[test]
    fn test_membership_is_case_insensitive() {
        let dict = dictionary(&["merhaba", "Dünya", "İstanbul", "ırmak"]);
        assert!(dict.is_valid("merhaba"));
        assert!(dict.is_valid("MERHABA"));
        assert!(dict.is_valid("dünya"));
        assert!(dict.is_valid("DÜNYA"));
        assert!(dict.is_valid("istanbul"));
        assert!(dict.is_valid("İSTANBUL"));
        assert!(dict.is_valid("IRMAK"));
        assert!(!dict.is_valid("dunya"));
        assert!(!dict.is_valid("merhabalar"));
    }

    #[test]
    fn test_load_skips_malformed_entries() {
        let mut dict = Dictionary::new();
        let report = dict.load(vec![
            WordlistEntry::new("kitap"),
            WordlistEntry::new("   "),
            WordlistEntry::new("abajur ayağı"),
            WordlistEntry::with_frequency("kalem", 0),
            WordlistEntry::with_frequency("defter", 3),
        ]);

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.skipped[0], Error::malformed(2, "empty word"));
        assert!(matches!(
            report.skipped[1],
            Error::MalformedWordlistEntry { line: 3, .. }
        ));
        assert!(dict.is_valid("kitap"));
        assert!(dict.is_valid("defter"));
        assert!(!dict.is_valid("kalem"));
        assert_eq!(dict.weight("defter"), 3);
        assert_eq!(dict.weight("kitap"), 1);
    }

    #[test]
    fn test_duplicates_keep_highest_frequency() {
        let mut dict = Dictionary::new();
        let report = dict.load(vec![
            WordlistEntry::with_frequency("su", 4),
            WordlistEntry::with_frequency("Su", 9),
            WordlistEntry::with_frequency("SU", 2),
        ]);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.duplicates, 2);
        assert_eq!(dict.weight("su"), 9);
        assert_eq!(dict.tree.len(), 1);
    }

    #[test]
    fn test_empty_dictionary() {
        let mut dict = Dictionary::new();
        let report = dict.load(Vec::new());
        assert_eq!(report.ensure_not_empty(), Err(Error::EmptyDictionary));
        assert!(dict.is_empty());
        assert!(!dict.is_valid("merhaba"));
        assert!(dict.search_within_distance("merhaba", 2).unwrap().is_empty());
    }

    #[test]
    fn test_overlay_merge_is_idempotent() {
        let mut dict = dictionary(&["kitap"]);
        assert!(!dict.is_valid("yazılımcı"));

        assert_eq!(dict.merge_overlay(["Yazılımcı"]), 1);
        assert!(dict.is_valid("yazılımcı"));
        assert_eq!(dict.weight("yazılımcı"), OVERLAY_WEIGHT);

        assert_eq!(dict.merge_overlay(["yazılımcı", "YAZILIMCI"]), 0);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.tree.len(), 2);

        // already a base word: membership unchanged, weight untouched
        assert_eq!(dict.merge_overlay(["kitap"]), 0);
        assert_eq!(dict.weight("kitap"), 1);
    }

    #[test]
    fn test_overlay_survives_reload() {
        let mut dict = dictionary(&["kitap"]);
        dict.merge_overlay(["tokenizer"]);
        dict.load(vec![WordlistEntry::new("defter")]);

        assert!(!dict.is_valid("kitap"));
        assert!(dict.is_valid("defter"));
        assert!(dict.is_valid("tokenizer"));
        assert_eq!(dict.overlay_words(), vec!["tokenizer"]);
    }

    #[test]
    fn test_overlay_is_searchable() {
        let mut dict = dictionary(&["kitap"]);
        dict.merge_overlay(["rustacean"]);
        let found = dict.search_within_distance("rustacan", 1).unwrap();
        assert_eq!(found, vec![("rustacean", 1)]);
    }

    #[test]
    fn test_folded_matches() {
        let dict = dictionary(&["çok", "cok", "güneş"]);
        let mut hits = dict.folded_matches("cok").to_vec();
        hits.sort();
        assert_eq!(hits, vec!["cok", "çok"]);
        assert_eq!(dict.folded_matches("gunes"), ["güneş".to_string()]);
        assert!(dict.folded_matches("yok").is_empty());
    }

    #[test]
    fn test_search_radius_zero_is_exact() {
        let dict = dictionary(&["kitap", "kitabı", "katip"]);
        assert_eq!(dict.search_within_distance("KİTAP", 0).unwrap(), vec![("kitap", 0)]);
    }

    #[test]
    fn test_search_ignores_diacritics() {
        let dict = dictionary(&["öğrenci", "çiçekçi", "güneş", "kalem"]);
        assert_eq!(dict.search_within_distance("ogrenc", 1).unwrap(), vec![("öğrenci", 1)]);
        assert_eq!(dict.search_within_distance("cicekc", 1).unwrap(), vec![("çiçekçi", 1)]);
        assert_eq!(dict.search_within_distance("gunesi", 1).unwrap(), vec![("güneş", 1)]);
    }

    #[test]
    fn test_folded_twins_share_a_tree_node() {
        let dict = dictionary(&["çok", "cok", "yok"]);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.tree.len(), 2);

        let mut hits = dict.search_within_distance("cok", 0).unwrap();
        hits.sort();
        assert_eq!(hits, vec![("cok", 0), ("çok", 0)]);
    }

    #[test]
    fn test_longest_word_len() {
        let mut dict = dictionary(&["ev", "öğretmen", "kitap"]);
        assert_eq!(dict.longest_word_len(), 8);
        dict.merge_overlay(["yazılımcılar"]);
        assert_eq!(dict.longest_word_len(), 12);
        assert_eq!(Dictionary::new().longest_word_len(), 0);
    }

    #[test]
    fn test_reload_is_deterministic() {
        let words: Vec<String> = (0..200).map(|i| format!("kelime{i}")).collect();
        let mut a = Dictionary::new();
        a.load(words.iter().map(|w| WordlistEntry::new(w.as_str())));
        let mut b = Dictionary::new();
        b.load(words.iter().map(|w| WordlistEntry::new(w.as_str())));
        let a_words: Vec<&str> = a.tree.iter().collect();
        let b_words: Vec<&str> = b.tree.iter().collect();
        assert_eq!(a_words, b_words);
    }
}
