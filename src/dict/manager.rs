use super::{cache, wordlist};
use crate::checker::dictionary::WordlistEntry;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Bumped whenever the cache layout changes.
const CACHE_FORMAT_VERSION: &str = "1";

fn data_dir() -> Result<PathBuf> {
    Config::data_dir().context("Failed to get data directory")
}

/// Entries of the cached dictionary `name`. A missing cache yields an
/// empty list so that checking still runs (and reports every word).
pub fn load_cached(name: &str) -> Result<Vec<WordlistEntry>> {
    let path = cache::dict_path(&data_dir()?, name);
    if !path.exists() {
        warn!(
            dictionary = name,
            "dictionary is not installed, run `yazim dict download {}`", name
        );
        return Ok(Vec::new());
    }
    let entries = cache::load(&path)?;
    debug!(dictionary = name, words = entries.len(), "loaded cached dictionary");
    Ok(entries)
}

/// Entries of a local wordlist file (JSON lines or plain text).
pub fn load_file(path: &Path) -> Result<Vec<WordlistEntry>> {
    let payload = fs::read(path)
        .with_context(|| format!("Failed to read wordlist: {}", path.display()))?;
    let content = decode(&payload, &path.to_string_lossy())?;
    let parsed = wordlist::parse(&content);
    for error in &parsed.skipped {
        debug!(%error, "skipping wordlist line");
    }
    if !parsed.skipped.is_empty() {
        warn!(
            path = %path.display(),
            skipped = parsed.skipped.len(),
            "skipped malformed wordlist lines"
        );
    }
    Ok(parsed.entries)
}

fn decode(payload: &[u8], source: &str) -> Result<String> {
    if source.ends_with(".gz") {
        let mut content = String::new();
        GzDecoder::new(payload)
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to decompress wordlist: {}", source))?;
        Ok(content)
    } else {
        String::from_utf8(payload.to_vec())
            .with_context(|| format!("Wordlist is not valid UTF-8: {}", source))
    }
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = data_dir()?;

    if !data_dir.exists() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download a dictionary.",
            "yazim dict download tr_TR".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    let mut found_any = false;
    for entry in fs::read_dir(&data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("fst") {
            continue;
        }
        found_any = true;
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
        let words = cache::read_manifest(&data_dir, name)?
            .map(|m| format!("{} words", m.word_count))
            .unwrap_or_else(|| "no manifest".to_string());
        let size_kb = fs::metadata(&path)?.len() / 1024;

        println!(
            "  {} {} ({}, {})",
            "✓".green(),
            name.cyan().bold(),
            words.dimmed(),
            format!("{}KB", size_kb).dimmed()
        );
    }

    if !found_any {
        println!("{}", "No dictionaries found.".yellow());
    }

    println!();
    println!("Data directory: {}", data_dir.display().to_string().dimmed());

    Ok(())
}

pub fn download_dictionary(name: &str, url: &str) -> Result<()> {
    println!(
        "{} dictionary {}...",
        "Downloading".cyan().bold(),
        name.yellow()
    );
    println!("Source: {}", url.dimmed());

    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Downloading...");

    let response = reqwest::blocking::get(url).context("Failed to download dictionary")?;
    if !response.status().is_success() {
        pb.finish_and_clear();
        anyhow::bail!("Failed to download dictionary: HTTP {}", response.status());
    }
    let payload = response.bytes().context("Failed to read dictionary payload")?;
    pb.finish_with_message("Download complete");

    println!("{}", "Building dictionary...".cyan());
    let content = decode(&payload, url)?;
    let parsed = wordlist::parse(&content);
    if !parsed.skipped.is_empty() {
        println!(
            "Skipped {} malformed lines",
            parsed.skipped.len().to_string().yellow()
        );
    }

    let dict_path = cache::dict_path(&data_dir, name);
    let word_count = cache::build(&parsed.entries, &dict_path)?;
    println!("Found {} words", word_count.to_string().yellow());

    cache::write_manifest(
        &data_dir,
        &cache::Manifest {
            name: name.to_string(),
            source: url.to_string(),
            version: CACHE_FORMAT_VERSION.to_string(),
            word_count,
            skipped: parsed.skipped.len(),
            sha256: cache::sha256_hex(&payload),
        },
    )?;

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        dict_path.display().to_string().cyan()
    );

    Ok(())
}

/// Re-download every installed dictionary from the source recorded in its
/// manifest, falling back to `default_url`.
pub fn update_dictionaries(default_url: &str) -> Result<()> {
    let data_dir = data_dir()?;

    if !data_dir.exists() {
        println!("{}", "No dictionaries installed.".yellow());
        return Ok(());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("fst") {
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }
    }

    if names.is_empty() {
        println!("{}", "No dictionaries to update.".yellow());
        return Ok(());
    }

    println!(
        "{} {} {}...",
        "Updating".cyan().bold(),
        names.len(),
        if names.len() == 1 { "dictionary" } else { "dictionaries" }
    );
    println!();

    for name in names {
        let url = cache::read_manifest(&data_dir, &name)?
            .map(|m| m.source)
            .unwrap_or_else(|| default_url.to_string());
        download_dictionary(&name, &url)?;
        println!();
    }

    println!("{} All dictionaries updated!", "✓".green().bold());

    Ok(())
}

pub fn show_info(name: &str) -> Result<()> {
    let data_dir = data_dir()?;
    let dict_path = cache::dict_path(&data_dir, name);

    if !dict_path.exists() {
        println!(
            "{} Dictionary {} not found.",
            "✗".red().bold(),
            name.yellow()
        );
        println!(
            "Run {} to download it.",
            format!("yazim dict download {}", name).cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(&dict_path)?;

    println!("{}", format!("Dictionary: {}", name).bold());
    println!("  Path: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Format: FST map (word → frequency)");

    match cache::read_manifest(&data_dir, name)? {
        Some(manifest) => {
            println!("  Words: {}", manifest.word_count);
            println!("  Skipped lines: {}", manifest.skipped);
            println!("  Source: {}", manifest.source);
            println!("  SHA-256: {}", manifest.sha256.dimmed());
            println!("  Cache version: {}", manifest.version);
        }
        None => {
            println!("  Words: {}", "Unknown (no manifest)".yellow());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "merhaba\ndünya 4\nbozuk satır x\n").unwrap();

        let entries = load_file(&path).unwrap();
        assert_eq!(
            entries,
            vec![WordlistEntry::new("merhaba"), WordlistEntry::with_frequency("dünya", 4)]
        );
    }

    #[test]
    fn test_load_gzipped_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gts.json.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all("{\"madde\":\"kitap\"}\n".as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        assert_eq!(load_file(&path).unwrap(), vec![WordlistEntry::new("kitap")]);
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(load_file(&path).is_err());
    }
}
