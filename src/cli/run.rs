//! Glue between the command line and the checking engine: building the
//! checker, finding files, checking them and applying fixes.

use crate::cli::output::{self, Choice};
use crate::config::Config;
use crate::dict::{manager, personal};
use crate::parser::{self, FileType};
use crate::{CheckResult, Issue, SpellChecker};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const STDIN_NAME: &str = "<stdin>";

/// The issues found in one input, together with its content so that
/// positions can be reported and fixes applied.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: Option<PathBuf>,
    pub content: String,
    pub issues: Vec<Issue>,
}

impl FileReport {
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| STDIN_NAME.to_string(), |p| p.display().to_string())
    }
}

/// Load the wordlist (a local file when given, the cached dictionary
/// otherwise) and the personal dictionary into a fresh checker.
pub fn build_checker(config: &Config, wordlist: Option<&Path>) -> Result<SpellChecker> {
    let entries = match wordlist {
        Some(path) => manager::load_file(path)?,
        None => manager::load_cached(&config.dictionary)?,
    };

    let mut checker = SpellChecker::new(config.check_options());
    let report = checker.load(entries);
    if let Err(e) = report.ensure_not_empty() {
        if !e.is_recoverable() {
            return Err(e.into());
        }
        warn!(error = %e, "every word will be reported");
    }

    if let Some(path) = &config.personal_dictionary {
        let words = personal::read(path)?;
        let added = checker.merge_overlay(&words);
        debug!(path = %path.display(), added, "merged personal dictionary");
    }

    debug!(words = checker.dictionary().len(), "checker ready");
    Ok(checker)
}

/// Expand directories into the files below them, honoring `.gitignore`.
/// Paths given explicitly are always kept.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let candidate = entry.path();
                    if entry.file_type().is_some_and(|t| t.is_file()) && is_checkable(candidate) {
                        files.push(candidate.to_path_buf());
                    }
                }
                Err(e) => warn!(error = %e, "skipping unreadable path"),
            }
        }
    }
    files
}

fn is_checkable(path: &Path) -> bool {
    let is_text = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt" | "text")
    );
    is_text || FileType::from_path(path) != FileType::PlainText
}

pub fn check_content(
    checker: &SpellChecker,
    file_type: FileType,
    content: &str,
) -> crate::Result<Vec<Issue>> {
    let mut issues = Vec::new();
    for region in parser::regions(file_type, content) {
        issues.extend(checker.check_region(content, region)?);
    }
    Ok(issues)
}

pub fn check_file(checker: &SpellChecker, path: &Path) -> Result<FileReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let issues = check_content(checker, FileType::from_path(path), &content)
        .with_context(|| format!("Failed to check file: {}", path.display()))?;
    debug!(path = %path.display(), issues = issues.len(), "checked file");

    Ok(FileReport {
        path: Some(path.to_path_buf()),
        content,
        issues,
    })
}

pub fn check_stdin(checker: &SpellChecker, content: String) -> Result<FileReport> {
    let issues = check_content(checker, FileType::PlainText, &content)?;
    Ok(FileReport {
        path: None,
        content,
        issues,
    })
}

/// Check files in parallel. Order of the reports follows `files`.
pub fn check_files(checker: &SpellChecker, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    files
        .par_iter()
        .map(|path| check_file(checker, path))
        .collect()
}

/// Replace byte ranges of `content`. Ranges must not overlap.
pub fn apply_replacements(content: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut sorted: Vec<&(Range<usize>, String)> = replacements.iter().collect();
    sorted.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut fixed = content.to_string();
    for (range, replacement) in sorted {
        fixed.replace_range(range.clone(), replacement);
    }
    fixed
}

/// Apply the top suggestion of every issue that has one.
pub fn fix_auto(report: &FileReport) -> (String, usize) {
    let replacements: Vec<(Range<usize>, String)> = report
        .issues
        .iter()
        .filter_map(|issue| {
            issue
                .suggestions
                .first()
                .map(|s| (issue.start..issue.end, s.clone()))
        })
        .collect();
    (
        apply_replacements(&report.content, &replacements),
        replacements.len(),
    )
}

/// Walk the issues of `report`, asking for each one. Words the user adds
/// to the dictionary are returned alongside the fixed text; `None` means
/// the user quit.
pub fn fix_interactive(report: &FileReport) -> Result<Option<(String, usize, Vec<String>)>> {
    let mut replacements = Vec::new();
    let mut added = Vec::new();

    for issue in &report.issues {
        if added.contains(&issue.word) {
            continue;
        }
        let (line, column) = parser::line_column(&report.content, issue.start);
        let context = parser::line_at(&report.content, issue.start);
        match output::prompt_choice(&issue.word, &issue.suggestions, context, line, column)? {
            Choice::Replace(word) => replacements.push((issue.start..issue.end, word)),
            Choice::Skip => {}
            Choice::AddToDictionary => added.push(issue.word.clone()),
            Choice::Quit => return Ok(None),
        }
    }

    let count = replacements.len();
    Ok(Some((
        apply_replacements(&report.content, &replacements),
        count,
        added,
    )))
}

pub struct RunOptions<'a> {
    pub fix: bool,
    pub interactive: bool,
    pub format: output::OutputFormat,
    pub personal_dictionary: Option<&'a Path>,
}

/// Check (and optionally fix) the given reports. Fixed files are written
/// back; fixed stdin goes to stdout.
pub fn process(reports: &[FileReport], options: &RunOptions<'_>) -> Result<CheckResult> {
    let mut result = CheckResult {
        error_count: reports.iter().map(|r| r.issues.len()).sum(),
        fixed_count: 0,
    };

    if !options.fix {
        output::print_reports(reports, options.format)?;
        if options.format == output::OutputFormat::Text {
            output::print_check_summary(result.error_count, reports.len());
        }
        return Ok(result);
    }

    for report in reports {
        if report.issues.is_empty() {
            if report.path.is_none() {
                print!("{}", report.content);
            }
            continue;
        }

        let (fixed, count) = if options.interactive {
            match fix_interactive(report)? {
                Some((fixed, count, added)) => {
                    add_to_personal(options.personal_dictionary, &added)?;
                    (fixed, count)
                }
                None => break,
            }
        } else {
            fix_auto(report)
        };

        match &report.path {
            Some(path) if count > 0 => {
                fs::write(path, &fixed)
                    .with_context(|| format!("Failed to write file: {}", path.display()))?;
                info!(path = %path.display(), fixed = count, "applied corrections");
            }
            Some(_) => {}
            None => print!("{}", fixed),
        }
        result.fixed_count += count;
    }

    if reports.iter().any(|r| r.path.is_some()) {
        output::print_fix_summary(result.fixed_count, reports.len());
    }
    Ok(result)
}

pub fn add_to_personal(path: Option<&Path>, words: &[String]) -> Result<()> {
    if words.is_empty() {
        return Ok(());
    }
    let path = path.context("No personal dictionary path available")?;
    let added = personal::append(path, words)?;
    for word in &added {
        info!(word = word.as_str(), path = %path.display(), "added to personal dictionary");
    }
    Ok(())
}
