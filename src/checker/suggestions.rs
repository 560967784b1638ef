use super::dictionary::Dictionary;
use super::distance::weighted;
use super::keyboard;
use super::normalizer::{self, collation_key};
use crate::error::Result;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_MAX_DISTANCE: u32 = 2;

/// Turkish letters that are commonly typed as their ASCII look-alike, and
/// circumflex vowels that are commonly dropped.
const LOOKALIKES: &[(char, char)] = &[
    ('c', 'ç'),
    ('g', 'ğ'),
    ('i', 'ı'),
    ('o', 'ö'),
    ('s', 'ş'),
    ('u', 'ü'),
    ('a', 'â'),
    ('i', 'î'),
    ('u', 'û'),
];

/// Generates ranked corrections for a word from a [`Dictionary`].
///
/// Candidates come from three tiers, cheapest first, and collection stops
/// as soon as `limit` candidates are known:
///
/// 1. quick wins: words with the same folded form, then single-letter
///    look-alike and keyboard-neighbor substitutions looked up directly;
/// 2. a BK-tree search within `max_distance` edits;
/// 3. ranking by weighted edit cost, word weight, length difference and
///    Turkish alphabetical order.
#[derive(Debug, Clone, Copy)]
pub struct Suggester<'a> {
    dictionary: &'a Dictionary,
    max_distance: u32,
}

struct Candidate<'a> {
    word: &'a str,
    cost: u32,
    weight: u32,
    len_diff: usize,
}

impl<'a> Suggester<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            dictionary,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Up to `limit` dictionary words close to `word`, best first. Never
    /// contains `word` itself. Queries longer than every dictionary word by
    /// more than `max_distance` get no suggestions.
    pub fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>> {
        let query = normalizer::normalize(word);
        if limit == 0 || query.canonical.is_empty() || self.dictionary.is_empty() {
            return Ok(Vec::new());
        }
        // Nothing in the dictionary can be close enough.
        let reach = self.dictionary.longest_word_len() + self.max_distance as usize;
        if query.canonical.chars().count() > reach {
            debug!(reach, "query longer than any candidate, skipping");
            return Ok(Vec::new());
        }

        let mut found = Found::new(&query.canonical, limit);
        self.quick_wins(&query.canonical, &query.folded, &mut found);

        if !found.is_full() {
            for (candidate, _) in self
                .dictionary
                .search_within_distance(&query.canonical, self.max_distance)?
            {
                found.push(candidate);
            }
        }
        debug!(word, candidates = found.words.len(), "collected suggestion candidates");

        Ok(self.rank(&query.canonical, found.words, limit))
    }

    fn quick_wins(&self, canonical: &str, folded: &str, found: &mut Found<'_, 'a>) {
        for word in self.dictionary.folded_matches(folded) {
            if found.push(word) {
                return;
            }
        }

        let chars: Vec<char> = canonical.chars().collect();
        let mut buffer = chars.clone();

        for (idx, &ch) in chars.iter().enumerate() {
            for replacement in lookalikes(ch) {
                buffer[idx] = replacement;
                if self.try_variant(&buffer, found) {
                    return;
                }
            }
            buffer[idx] = ch;
        }

        for (idx, &ch) in chars.iter().enumerate() {
            for replacement in keyboard::neighbors(ch) {
                buffer[idx] = replacement;
                if self.try_variant(&buffer, found) {
                    return;
                }
            }
            buffer[idx] = ch;
        }
    }

    /// Returns `true` once `found` is full.
    fn try_variant(&self, variant: &[char], found: &mut Found<'_, 'a>) -> bool {
        let variant: String = variant.iter().collect();
        match self.dictionary.get(&variant) {
            Some(word) => found.push(word),
            None => false,
        }
    }

    fn rank(&self, query: &str, words: Vec<&'a str>, limit: usize) -> Vec<String> {
        let query_len = query.chars().count();
        let mut candidates: Vec<Candidate<'a>> = words
            .into_iter()
            .map(|word| Candidate {
                word,
                cost: weighted(query, word),
                weight: self.dictionary.weight(word),
                len_diff: word.chars().count().abs_diff(query_len),
            })
            .collect();

        candidates.sort_by_cached_key(|c| {
            (c.cost, Reverse(c.weight), c.len_diff, collation_key(c.word))
        });
        candidates
            .into_iter()
            .take(limit)
            .map(|c| c.word.to_string())
            .collect()
    }
}

/// Deduplicated candidates in discovery order.
struct Found<'q, 'a> {
    query: &'q str,
    limit: usize,
    seen: HashSet<&'a str>,
    words: Vec<&'a str>,
}

impl<'q, 'a> Found<'q, 'a> {
    fn new(query: &'q str, limit: usize) -> Self {
        Self {
            query,
            limit,
            seen: HashSet::new(),
            words: Vec::new(),
        }
    }

    /// Record `word`; returns `true` once the limit is reached.
    fn push(&mut self, word: &'a str) -> bool {
        if word != self.query && self.seen.insert(word) {
            self.words.push(word);
        }
        self.is_full()
    }

    fn is_full(&self) -> bool {
        self.words.len() >= self.limit
    }
}

fn lookalikes(ch: char) -> impl Iterator<Item = char> {
    LOOKALIKES.iter().filter_map(move |&(plain, marked)| {
        if ch == plain {
            Some(marked)
        } else if ch == marked {
            Some(plain)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::WordlistEntry;

    fn dictionary(words: &[&str]) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.load(words.iter().map(|w| WordlistEntry::new(*w)));
        dict
    }

    fn suggest(dict: &Dictionary, word: &str) -> Vec<String> {
        Suggester::new(dict).suggest(word, DEFAULT_LIMIT).unwrap()
    }

    #[test]
    fn test_lookalikes() {
        assert_eq!(lookalikes('c').collect::<Vec<_>>(), vec!['ç']);
        assert_eq!(lookalikes('ı').collect::<Vec<_>>(), vec!['i']);
        assert_eq!(lookalikes('i').collect::<Vec<_>>(), vec!['ı', 'î']);
        assert_eq!(lookalikes('x').count(), 0);
    }

    #[test]
    fn test_diacritic_quick_win() {
        let dict = dictionary(&["çocuk", "güneş", "kitap"]);
        assert_eq!(suggest(&dict, "cocuk")[0], "çocuk");
        assert_eq!(suggest(&dict, "gunes")[0], "güneş");
    }

    #[test]
    fn test_keyboard_quick_win() {
        let dict = dictionary(&["kalem", "kale", "kalemlik"]);
        assert_eq!(suggest(&dict, "kalen")[0], "kalem");
    }

    #[test]
    fn test_fuzzy_search_fills_the_rest() {
        let dict = dictionary(&["merhaba", "dünya", "dona"]);
        let found = suggest(&dict, "dnya");
        assert_eq!(found, vec!["dünya", "dona"]);
        assert!(!found.contains(&"merhaba".to_string()));
    }

    #[test]
    fn test_never_suggests_the_query() {
        let dict = dictionary(&["kitap", "kitabı", "katip"]);
        let found = suggest(&dict, "KİTAP");
        assert!(!found.contains(&"kitap".to_string()));
        assert!(found.contains(&"kitabı".to_string()));
    }

    #[test]
    fn test_limit_is_respected() {
        let dict = dictionary(&["kat", "kar", "kaz", "kal", "kan", "kap", "kas"]);
        let found = Suggester::new(&dict).suggest("kay", 3).unwrap();
        assert_eq!(found.len(), 3);
        assert!(Suggester::new(&dict).suggest("kay", 0).unwrap().is_empty());
    }

    #[test]
    fn test_every_suggestion_is_a_member() {
        let dict = dictionary(&["ev", "el", "er", "eş", "on", "ön", "ün"]);
        for query in ["e", "es", "un", "xq", "öz"] {
            for word in suggest(&dict, query) {
                assert!(dict.is_valid(&word), "{word} suggested for {query}");
            }
        }
    }

    #[test]
    fn test_overlay_wins_ties() {
        let mut dict = dictionary(&["masa"]);
        dict.merge_overlay(["mase"]);
        let ranked = Suggester::new(&dict).suggest("masx", 2).unwrap();
        assert_eq!(weighted("masx", "masa"), weighted("masx", "mase"));
        assert_eq!(ranked, vec!["mase", "masa"]);
    }

    #[test]
    fn test_frequency_breaks_cost_ties() {
        let mut dict = Dictionary::new();
        dict.load(vec![
            WordlistEntry::with_frequency("sap", 1),
            WordlistEntry::with_frequency("sal", 50),
        ]);
        // `p` and `l` are both off by one full edit from `q`
        let ranked = Suggester::new(&dict).suggest("saq", 2).unwrap();
        assert_eq!(ranked[0], "sal");
    }

    #[test]
    fn test_same_length_preferred() {
        let dict = dictionary(&["karar", "kara"]);
        // deleting `z` or substituting it: both cost one full edit
        let ranked = suggest(&dict, "karaz");
        assert_eq!(ranked[0], "karar");
    }

    #[test]
    fn test_empty_inputs() {
        let dict = dictionary(&["kitap"]);
        assert!(suggest(&dict, "").is_empty());
        let empty = Dictionary::new();
        assert!(suggest(&empty, "kitap").is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let dict = dictionary(&["bal", "bel", "bil", "bol", "bul", "böl", "bül"]);
        let first = suggest(&dict, "bxl");
        for _ in 0..5 {
            assert_eq!(suggest(&dict, "bxl"), first);
        }
        assert_eq!(first, vec!["bal", "bel", "bil", "bol", "böl"]);
    }

    #[test]
    fn test_fuzzy_search_sees_through_diacritics() {
        let dict = dictionary(&["öğrenci", "çiçekçi", "güneş", "kalem"]);
        assert_eq!(suggest(&dict, "ogrenc"), vec!["öğrenci"]);
        assert_eq!(suggest(&dict, "cicekc"), vec!["çiçekçi"]);
        assert_eq!(suggest(&dict, "gunesi"), vec!["güneş"]);
    }

    #[test]
    fn test_overlong_query_returns_quickly() {
        let dict = dictionary(&["merhaba", "dünya", "asdfghjkl"]);
        let token = "asdfghjkl".repeat(1200);
        let started = std::time::Instant::now();
        assert!(suggest(&dict, &token).is_empty());
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        // the cap is inclusive of the search radius
        assert_eq!(suggest(&dict, "asdfghjklxx"), vec!["asdfghjkl"]);
        assert!(suggest(&dict, "asdfghjklxxx").is_empty());
    }

    #[test]
    fn test_max_distance() {
        let dict = dictionary(&["merhaba"]);
        let strict = Suggester::new(&dict).with_max_distance(1);
        assert!(strict.suggest("mrhba", 5).unwrap().is_empty());
        assert_eq!(Suggester::new(&dict).suggest("mrhba", 5).unwrap(), vec!["merhaba"]);
    }
}
