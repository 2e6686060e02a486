use super::{LoadError, Loader, clean_lines};
use pulldown_cmark::{Event, Parser, Tag};

/// Markdown loader: renders to plain text and drops the markup
pub struct MarkdownLoader;

impl Loader for MarkdownLoader {
    fn load(&self, _path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
        let source = String::from_utf8_lossy(bytes);
        Ok(clean_lines(&plain_text(&source)))
    }
}

/// Text content of a markdown document, one block per line
fn plain_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
            Event::End(tag) if ends_block(&tag) => text.push('\n'),
            _ => {}
        }
    }

    text
}

fn ends_block(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading(..)
            | Tag::BlockQuote
            | Tag::CodeBlock(_)
            | Tag::Item
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
    )
}
