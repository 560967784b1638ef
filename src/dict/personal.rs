//! The personal dictionary file: one word per line, `#` starts a comment.

use crate::checker::normalizer;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn read(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalizer::to_lower)
        .collect())
}

/// Append canonical forms of `words` that are not in the file yet. Returns
/// the words actually written.
pub fn append<S: AsRef<str>>(path: &Path, words: &[S]) -> Result<Vec<String>> {
    let existing: HashSet<String> = read(path)?.into_iter().collect();
    let mut added = Vec::new();
    for word in words {
        let canonical = normalizer::to_lower(word.as_ref().trim());
        if canonical.is_empty() || existing.contains(&canonical) || added.contains(&canonical) {
            continue;
        }
        added.push(canonical);
    }
    if added.is_empty() {
        return Ok(added);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create personal dictionary directory")?;
    }
    let mut content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for word in &added {
        content.push_str(word);
        content.push('\n');
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write personal dictionary: {}", path.display()))?;

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(read(&dir.path().join("yok.txt")).unwrap().is_empty());
    }

    #[test]
    fn test_read_skips_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("personal.txt");
        fs::write(&path, "# kişisel\nTokenizer\n\n  İzmirli \n").unwrap();
        assert_eq!(read(&path).unwrap(), vec!["tokenizer", "izmirli"]);
    }

    #[test]
    fn test_append_dedups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("personal.txt");

        assert_eq!(append(&path, &["Rust", "rust", "serde"]).unwrap(), vec!["rust", "serde"]);
        assert_eq!(append(&path, &["SERDE", "tokio"]).unwrap(), vec!["tokio"]);
        assert!(append(&path, &["rust"]).unwrap().is_empty());
        assert_eq!(read(&path).unwrap(), vec!["rust", "serde", "tokio"]);
    }
}
