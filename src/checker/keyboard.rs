//! Physical key positions of the Turkish Q (QWERTY) layout.
//!
//! Rows are staggered the way they are on a real keyboard, so the distance
//! between `s` and `e` is a bit more than one key width and the distance
//! between `a` and `x` is larger still.

/// Keys closer than this count as neighbors for quick-win substitutions.
pub const NEIGHBOR_RADIUS: f32 = 1.3;

const ROWS: [(&str, f32); 3] = [
    ("qwertyuıopğü", 0.0),
    ("asdfghjklşi", 0.25),
    ("zxcvbnmöç", 0.75),
];

/// Position of `ch` as (column, row), in key widths.
pub fn position(ch: char) -> Option<(f32, f32)> {
    ROWS.iter().enumerate().find_map(|(row, (keys, stagger))| {
        keys.chars()
            .position(|k| k == ch)
            .map(|col| (col as f32 + stagger, row as f32))
    })
}

/// Euclidean distance between the keys of `a` and `b`, if both are on the
/// layout.
pub fn distance(a: char, b: char) -> Option<f32> {
    let (ax, ay) = position(a)?;
    let (bx, by) = position(b)?;
    Some(((ax - bx).powi(2) + (ay - by).powi(2)).sqrt())
}

/// Keys within [`NEIGHBOR_RADIUS`] of `ch`, nearest first.
pub fn neighbors(ch: char) -> Vec<char> {
    let mut found: Vec<(f32, char)> = ROWS
        .iter()
        .flat_map(|(keys, _)| keys.chars())
        .filter(|&k| k != ch)
        .filter_map(|k| distance(ch, k).map(|d| (d, k)))
        .filter(|(d, _)| *d <= NEIGHBOR_RADIUS)
        .collect();
    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    found.into_iter().map(|(_, k)| k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        assert_eq!(position('q'), Some((0.0, 0.0)));
        assert_eq!(position('a'), Some((0.25, 1.0)));
        assert_eq!(position('ç'), Some((8.75, 2.0)));
        assert_eq!(position('1'), None);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance('q', 'w'), Some(1.0));
        assert!(distance('q', 'p').unwrap() > 8.0);
        assert_eq!(distance('q', '?'), None);
    }

    #[test]
    fn test_neighbors() {
        let near_s = neighbors('s');
        assert!(near_s.contains(&'a'));
        assert!(near_s.contains(&'d'));
        assert!(near_s.contains(&'w'));
        assert!(near_s.contains(&'z'));
        assert!(!near_s.contains(&'s'));
        assert!(!near_s.contains(&'k'));

        let near_l = neighbors('l');
        assert!(near_l.contains(&'ş'));
        assert!(near_l.contains(&'k'));

        assert!(neighbors('#').is_empty());
    }
}
