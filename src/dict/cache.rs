//! On-disk cache of a downloaded wordlist.
//!
//! The words are stored as an FST map from canonical word to frequency,
//! next to a small JSON manifest describing where they came from.

use crate::checker::dictionary::WordlistEntry;
use crate::checker::normalizer;
use anyhow::{Context, Result};
use fst::{Map, MapBuilder, Streamer};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub source: String,
    pub version: String,
    pub word_count: usize,
    pub skipped: usize,
    pub sha256: String,
}

pub fn dict_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.fst", name))
}

pub fn manifest_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.json", name))
}

pub fn sha256_hex(payload: &[u8]) -> String {
    Sha256::digest(payload)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Write `entries` as an FST map. Words are canonicalized, duplicates keep
/// their highest frequency and multi-word entries are left out. Returns
/// the number of distinct words.
pub fn build(entries: &[WordlistEntry], output_path: &Path) -> Result<usize> {
    let mut words: BTreeMap<String, u64> = BTreeMap::new();
    for entry in entries {
        let canonical = normalizer::to_lower(entry.word.trim());
        if canonical.is_empty() || !canonical.chars().all(normalizer::is_word_char) {
            continue;
        }
        let frequency = u64::from(entry.frequency.unwrap_or(1));
        let slot = words.entry(canonical).or_insert(frequency);
        *slot = (*slot).max(frequency);
    }

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;
    let mut builder =
        MapBuilder::new(BufWriter::new(file)).context("Failed to create FST builder")?;

    for (word, frequency) in &words {
        builder
            .insert(word.as_bytes(), *frequency)
            .context("Failed to insert word into dictionary")?;
    }
    builder.finish().context("Failed to finalize dictionary")?;

    Ok(words.len())
}

/// Read every entry back out of a cached FST map.
pub fn load(path: &Path) -> Result<Vec<WordlistEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
    // SAFETY: the cache file is only ever replaced wholesale, never
    // modified in place while mapped.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map dictionary: {}", path.display()))?;
    let map = Map::new(mmap).context("Failed to parse dictionary")?;

    let mut entries = Vec::with_capacity(map.len());
    let mut stream = map.stream();
    while let Some((key, frequency)) = stream.next() {
        if let Ok(word) = std::str::from_utf8(key) {
            entries.push(WordlistEntry {
                word: word.to_string(),
                frequency: Some(u32::try_from(frequency).unwrap_or(u32::MAX)),
            });
        }
    }

    Ok(entries)
}

pub fn write_manifest(data_dir: &Path, manifest: &Manifest) -> Result<()> {
    let path = manifest_path(data_dir, &manifest.name);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&path, json).with_context(|| format!("Failed to write manifest: {}", path.display()))
}

pub fn read_manifest(data_dir: &Path, name: &str) -> Result<Option<Manifest>> {
    let path = manifest_path(data_dir, name);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let manifest = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
    Ok(Some(manifest))
}
