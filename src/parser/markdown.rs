use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::ops::Range;

/// Source ranges of the text events, skipping code blocks, inline code and
/// raw HTML. Adjacent ranges are joined so words split by the parser (at
/// escapes or entities) stay whole.
pub fn regions(content: &str) -> Vec<Range<usize>> {
    let mut regions: Vec<Range<usize>> = Vec::new();
    let mut code_depth = 0usize;

    for (event, range) in Parser::new(content).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(_) if code_depth == 0 => match regions.last_mut() {
                Some(last) if last.end == range.start => last.end = range.end,
                _ => regions.push(range),
            },
            _ => {}
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(content: &str) -> Vec<&str> {
        regions(content).into_iter().map(|r| &content[r]).collect()
    }

    #[test]
    fn test_markdown_parsing() {
        let content = r#"# Başlık

Bu bir deneme paragrafı.

```rust
fn main() {
    println!("yok sayılır");
}
```

Satır içi `kod_parcasi` burada.
"#;

        let found = texts(content);
        assert!(found.contains(&"Başlık"));
        assert!(found.contains(&"Bu bir deneme paragrafı."));
        assert!(found.iter().all(|t| !t.contains("println")));
        assert!(found.iter().all(|t| !t.contains("kod_parcasi")));
        assert!(found.contains(&"Satır içi "));
    }

    #[test]
    fn test_ranges_point_into_source() {
        let content = "*vurgulu* ve [bağlantı](https://ornek.com)";
        for region in regions(content) {
            let text = &content[region];
            assert!(!text.contains('*'));
            assert!(!text.contains("https"));
        }
    }
}
