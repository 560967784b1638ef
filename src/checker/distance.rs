use super::keyboard;
use super::normalizer::same_base;

/// Cost of one full edit in [`weighted`] units.
pub const EDIT_COST: u32 = 10;
/// Substituting a letter for its diacritic twin (`c`/`ç`, `i`/`ı`, ...).
pub const DIACRITIC_COST: u32 = 2;
/// Fixed part of a substitution between two keys on the layout.
const KEY_BASE_COST: u32 = 6;
const MAX_KEY_PENALTY: u32 = EDIT_COST - KEY_BASE_COST;

/// Levenshtein distance over chars. This is the metric the BK-tree is
/// built on.
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len() as u32;
    }
    if b.is_empty() {
        return a.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut curr = vec![0u32; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = u32::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Cost of replacing `a` with `b`.
pub fn substitution_cost(a: char, b: char) -> u32 {
    if a == b {
        return 0;
    }
    if same_base(a, b) {
        return DIACRITIC_COST;
    }
    match keyboard::distance(a, b) {
        Some(d) => KEY_BASE_COST + ((d * 2.0).round() as u32).min(MAX_KEY_PENALTY),
        None => EDIT_COST,
    }
}

/// Keyboard- and diacritic-aware edit cost used to rank suggestions.
///
/// Insertions, deletions and adjacent transpositions cost [`EDIT_COST`];
/// substitutions cost between [`DIACRITIC_COST`] and [`EDIT_COST`]
/// depending on how plausible the slip is.
pub fn weighted(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());

    let mut d = vec![vec![0u32; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i as u32 * EDIT_COST;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j as u32 * EDIT_COST;
    }

    for i in 1..=n {
        for j in 1..=m {
            let mut best = (d[i - 1][j] + EDIT_COST)
                .min(d[i][j - 1] + EDIT_COST)
                .min(d[i - 1][j - 1] + substitution_cost(a[i - 1], b[j - 1]));
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + EDIT_COST);
            }
            d[i][j] = best;
        }
    }

    d[n][m]
}
