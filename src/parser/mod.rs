//! Finds the parts of a file that hold prose worth checking.
//!
//! Every parser returns byte ranges into the original content, so issues
//! found inside them can be reported and fixed in place.

pub mod markdown;
pub mod plaintext;
pub mod source_code;

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref LINK: Regex =
        Regex::new(r"(?:https?|ftp)://\S+|www\.\S+|[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Markdown,
    SourceCode(CommentStyle),
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// line` and `/* block */`
    Slash,
    /// `# line`
    Hash,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => FileType::Markdown,
            "rs" | "js" | "mjs" | "cjs" | "ts" | "jsx" | "tsx" | "go" | "java" | "kt" | "c"
            | "h" | "cpp" | "cc" | "hpp" | "cs" | "swift" => {
                FileType::SourceCode(CommentStyle::Slash)
            }
            "py" | "pyw" | "rb" | "sh" | "bash" | "toml" | "yaml" | "yml" => {
                FileType::SourceCode(CommentStyle::Hash)
            }
            _ => FileType::PlainText,
        }
    }
}

/// Checkable regions of `content`, with URLs and e-mail addresses cut out.
pub fn regions(file_type: FileType, content: &str) -> Vec<Range<usize>> {
    let raw = match file_type {
        FileType::Markdown => markdown::regions(content),
        FileType::SourceCode(style) => source_code::regions(content, style),
        FileType::PlainText => plaintext::regions(content),
    };

    raw.into_iter()
        .flat_map(|region| without_links(content, region))
        .collect()
}

fn without_links(content: &str, region: Range<usize>) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut cursor = region.start;
    for link in LINK.find_iter(&content[region.clone()]) {
        let start = region.start + link.start();
        if start > cursor {
            pieces.push(cursor..start);
        }
        cursor = region.start + link.end();
    }
    if cursor < region.end {
        pieces.push(cursor..region.end);
    }
    pieces
}

/// 1-based line and column of byte `offset`. Columns count graphemes.
pub fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].graphemes(true).count() + 1;
    (line, column)
}

/// The full line containing byte `offset`, without its newline.
pub fn line_at(content: &str, offset: usize) -> &str {
    let start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);
    content[start..end].trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(
            FileType::from_path(&PathBuf::from("BENİOKU.md")),
            FileType::Markdown
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("main.rs")),
            FileType::SourceCode(CommentStyle::Slash)
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("betik.py")),
            FileType::SourceCode(CommentStyle::Hash)
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("notlar.txt")),
            FileType::PlainText
        );
    }

    #[test]
    fn test_links_are_cut_out() {
        let content = "bkz. https://tdk.gov.tr/ara ve ali@ornek.com.tr adresi";
        let pieces: Vec<&str> = regions(FileType::PlainText, content)
            .into_iter()
            .map(|r| &content[r])
            .collect();
        assert_eq!(pieces, vec!["bkz. ", " ve ", " adresi"]);
    }

    #[test]
    fn test_line_column_counts_graphemes() {
        let content = "ilk satır\nçağrı hata";
        let offset = content.find("hata").unwrap();
        assert_eq!(line_column(content, offset), (2, 7));
        assert_eq!(line_column(content, 0), (1, 1));
        assert_eq!(line_at(content, offset), "çağrı hata");
    }
}
