//! Turkish-aware canonicalization of words.
//!
//! Two forms matter:
//!
//! * the **canonical** form: NFC, lower-cased with Turkish rules
//!   (`İ` → `i`, `I` → `ı`). Membership and indexing use it, and it keeps
//!   every diacritic, so `çok` and `cok` are different words.
//! * the **folded** form: the canonical form with Turkish letters mapped to
//!   their ASCII base and all combining marks stripped. Only the suggestion
//!   engine looks at it.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Turkish alphabet order used for deterministic tie-breaking.
const ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedForm {
    pub canonical: String,
    pub folded: String,
}

pub fn normalize(word: &str) -> NormalizedForm {
    let canonical = to_lower(word);
    let folded = fold(&canonical);
    NormalizedForm { canonical, folded }
}

/// Lower-case `word` using Turkish casing rules.
pub fn to_lower(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for ch in word.nfc() {
        match ch {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            // Decomposed `İ` lower-cases to `i` followed by a stray dot.
            COMBINING_DOT_ABOVE if out.ends_with('i') => {}
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Upper-case `word` using Turkish casing rules.
pub fn to_upper(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for ch in word.chars() {
        match ch {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            c => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Map a single Turkish letter to its ASCII look-alike.
pub fn fold_char(ch: char) -> char {
    match ch {
        'ç' => 'c',
        'ğ' => 'g',
        'ı' => 'i',
        'ö' => 'o',
        'ş' => 's',
        'ü' => 'u',
        'Ç' => 'C',
        'Ğ' => 'G',
        'İ' => 'I',
        'Ö' => 'O',
        'Ş' => 'S',
        'Ü' => 'U',
        c => c,
    }
}

/// Diacritic-insensitive form of an already canonical word.
pub fn fold(canonical: &str) -> String {
    canonical
        .chars()
        .map(fold_char)
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Whether two characters differ only by a diacritic.
pub fn same_base(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let mut buf_a = [0u8; 4];
    let mut buf_b = [0u8; 4];
    fold(a.encode_utf8(&mut buf_a)) == fold(b.encode_utf8(&mut buf_b))
}

/// Characters that may appear inside a token.
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || matches!(
            ch,
            'ç' | 'ğ'
                | 'ı'
                | 'ö'
                | 'ş'
                | 'ü'
                | 'Ç'
                | 'Ğ'
                | 'İ'
                | 'Ö'
                | 'Ş'
                | 'Ü'
                | 'â'
                | 'î'
                | 'û'
                | 'Â'
                | 'Î'
                | 'Û'
                | COMBINING_DOT_ABOVE
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Lower,
    Title,
    Upper,
    Mixed,
}

fn casing(word: &str) -> Casing {
    let mut letters = word.chars().filter(|c| c.is_alphabetic());
    let Some(first) = letters.next() else {
        return Casing::Lower;
    };
    let rest: Vec<char> = letters.collect();
    let rest_lower = rest.iter().all(|c| !c.is_uppercase());
    let rest_upper = rest.iter().all(|c| !c.is_lowercase());

    match (first.is_uppercase(), rest_lower, rest_upper) {
        (false, true, _) => Casing::Lower,
        (true, _, true) if !rest.is_empty() => Casing::Upper,
        (true, true, _) => Casing::Title,
        _ => Casing::Mixed,
    }
}

/// Re-case a canonical `suggestion` after the surface form of a token.
pub fn match_case(surface: &str, suggestion: &str) -> String {
    match casing(surface) {
        Casing::Upper => to_upper(suggestion),
        Casing::Title => {
            let mut chars = suggestion.chars();
            match chars.next() {
                Some(first) => {
                    let mut buf = [0u8; 4];
                    let mut out = to_upper(first.encode_utf8(&mut buf));
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        }
        Casing::Lower | Casing::Mixed => suggestion.to_string(),
    }
}

/// Sort key ordering words by the Turkish alphabet.
pub fn collation_key(word: &str) -> Vec<u32> {
    word.chars()
        .map(|ch| match ALPHABET.chars().position(|a| a == ch) {
            Some(idx) => idx as u32,
            None => 0x100 + ch as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_lowercase() {
        assert_eq!(to_lower("İSTANBUL"), "istanbul");
        assert_eq!(to_lower("IRMAK"), "ırmak");
        assert_eq!(to_lower("Dünya"), "dünya");
        assert_eq!(to_lower("ÇAĞRI"), "çağrı");
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        // `u` + COMBINING DIAERESIS
        assert_eq!(to_lower("du\u{0308}nya"), "dünya");
        // `I` + COMBINING DOT ABOVE composes to `İ`
        assert_eq!(to_lower("I\u{0307}yi"), "iyi");
        // an already lower-cased stray dot is dropped
        assert_eq!(to_lower("i\u{0307}yi"), "iyi");
    }

    #[test]
    fn test_turkish_uppercase() {
        assert_eq!(to_upper("istanbul"), "İSTANBUL");
        assert_eq!(to_upper("ırmak"), "IRMAK");
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("çığöşü"), "cigosu");
        assert_eq!(fold("hâlâ"), "hala");
        assert_eq!(fold("café"), "cafe");
        assert_eq!(normalize("ÇOCUK").folded, "cocuk");
    }

    #[test]
    fn test_membership_form_keeps_diacritics() {
        let form = normalize("Çok");
        assert_eq!(form.canonical, "çok");
        assert_ne!(form.canonical, normalize("cok").canonical);
        assert_eq!(form.folded, normalize("cok").folded);
    }

    #[test]
    fn test_same_base() {
        assert!(same_base('ç', 'c'));
        assert!(same_base('ı', 'i'));
        assert!(same_base('â', 'a'));
        assert!(!same_base('c', 'k'));
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('ş'));
        assert!(is_word_char('İ'));
        assert!(is_word_char('7'));
        assert!(is_word_char('_'));
        assert!(!is_word_char('-'));
        assert!(!is_word_char('\''));
        assert!(!is_word_char(' '));
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Dnya", "dünya"), "Dünya");
        assert_eq!(match_case("DNYA", "dünya"), "DÜNYA");
        assert_eq!(match_case("dnya", "dünya"), "dünya");
        assert_eq!(match_case("stanbul", "istanbul"), "istanbul");
        assert_eq!(match_case("Istanbl", "istanbul"), "İstanbul");
        assert_eq!(match_case("dNyA", "dünya"), "dünya");
    }

    #[test]
    fn test_collation_order() {
        let mut words = vec!["şu", "su", "çay", "cam", "ıslak", "ilk"];
        words.sort_by_key(|w| collation_key(w));
        assert_eq!(words, vec!["cam", "çay", "ıslak", "ilk", "su", "şu"]);
    }
}
