use crate::cli::run::FileReport;
use crate::parser;
use anyhow::Result;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonIssue<'a> {
    file: String,
    line: usize,
    column: usize,
    start: usize,
    end: usize,
    word: &'a str,
    suggestions: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    total_errors: usize,
    errors: Vec<JsonIssue<'a>>,
}

pub fn print_reports(reports: &[FileReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                print_text_report(report);
            }
            Ok(())
        }
        OutputFormat::Json => print_json_reports(reports),
    }
}

fn print_text_report(report: &FileReport) {
    if report.issues.is_empty() {
        return;
    }

    println!("\n{}", report.name().bold().underline());

    for issue in &report.issues {
        let (line, column) = parser::line_column(&report.content, issue.start);
        println!(
            "  {} {}",
            format!("{}:{}", line, column).dimmed(),
            issue.word.red().bold()
        );

        if !issue.suggestions.is_empty() {
            let suggestions = issue
                .suggestions
                .iter()
                .map(|s| s.green().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("    → {}", suggestions);
        }
    }
}

fn print_json_reports(reports: &[FileReport]) -> Result<()> {
    let errors: Vec<JsonIssue> = reports
        .iter()
        .flat_map(|report| {
            report.issues.iter().map(move |issue| {
                let (line, column) = parser::line_column(&report.content, issue.start);
                JsonIssue {
                    file: report.name(),
                    line,
                    column,
                    start: issue.start,
                    end: issue.end,
                    word: &issue.word,
                    suggestions: &issue.suggestions,
                }
            })
        })
        .collect();

    let output = JsonOutput {
        files_checked: reports.len(),
        total_errors: errors.len(),
        errors,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn print_check_summary(total_errors: usize, files: usize) {
    println!();
    if total_errors == 0 {
        println!("{}", "✓ No spelling errors found!".green().bold());
    } else {
        println!(
            "{} {} {} found in {} {}",
            "✗".red().bold(),
            total_errors.to_string().red().bold(),
            plural(total_errors, "error", "errors"),
            files,
            plural(files, "file", "files")
        );
    }
}

pub fn print_fix_summary(total_fixed: usize, files: usize) {
    println!();
    if total_fixed == 0 {
        println!("{}", "No corrections needed!".green().bold());
    } else {
        println!(
            "{} {} {} applied to {} {}",
            "✓".green().bold(),
            total_fixed.to_string().green().bold(),
            plural(total_fixed, "correction", "corrections"),
            files,
            plural(files, "file", "files")
        );
    }
}

pub fn print_suggestions(word: &str, suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("{} no suggestions for {}", "✗".red().bold(), word.yellow());
        return;
    }
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!("{:>2}. {}", rank + 1, suggestion.green());
    }
}

/// What to do with one misspelling in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Replace(String),
    Skip,
    AddToDictionary,
    Quit,
}

pub fn prompt_choice(
    word: &str,
    suggestions: &[String],
    context: &str,
    line: usize,
    column: usize,
) -> Result<Choice> {
    println!(
        "\n{} {}:{}",
        "Misspelling found:".yellow().bold(),
        line.to_string().blue(),
        column.to_string().blue()
    );
    println!("  {}", context.replace(word, &word.red().bold().to_string()));

    let mut items: Vec<String> = suggestions.iter().take(9).cloned().collect();
    let first_action = items.len();
    items.push("Skip".to_string());
    items.push("Add to dictionary".to_string());
    items.push("Quit".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Replace '{}' with", word))
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(match selection {
        Some(idx) if idx < first_action => Choice::Replace(items[idx].clone()),
        Some(idx) if idx == first_action => Choice::Skip,
        Some(idx) if idx == first_action + 1 => Choice::AddToDictionary,
        Some(_) | None => Choice::Quit,
    })
}
