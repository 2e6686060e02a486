mod docx;
mod markdown;
mod pdf;
mod registry;
mod text;

#[cfg(test)]
mod tests;

pub use docx::DocxLoader;
pub use markdown::MarkdownLoader;
pub use pdf::{PdfLoader, merge_page_lines, passages_from_pages};
pub use registry::LoaderRegistry;
pub use text::TextLoader;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Document part missing: {0}")]
    MissingPart(String),
}

/// Core trait that all document loaders implement
pub trait Loader: Send + Sync {
    /// Extract text from raw file bytes
    ///
    /// # Returns
    /// Trimmed, non-empty lines or paragraphs in document order
    fn load(&self, path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError>;

    /// Untouched text of the file, blank lines included, when the format has one.
    ///
    /// Formats that need extraction return `None`; their preprocessing input is
    /// the extracted lines joined with newlines.
    fn raw_text(&self, _bytes: &[u8]) -> Option<String> {
        None
    }
}

/// Text extracted from a file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Source path as given
    pub path: String,
    /// Lowercase file extension ("" when absent)
    pub extension: String,
    /// Raw file bytes, kept for hashing
    pub bytes: Vec<u8>,
    /// Extracted lines
    pub lines: Vec<String>,
    /// Input for the line preprocessor: the raw contents for plain text,
    /// the extracted lines joined with newlines otherwise
    pub raw_text: String,
}

impl Document {
    /// Lines joined with newlines, ready for chunking
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Read a file and extract its text with the default registry
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    LoaderRegistry::new().load_file(path)
}

/// Lowercase extension of a path
pub(crate) fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// Trimmed non-empty lines of `text`
pub(crate) fn clean_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    debug!(lines = lines.len(), "extracted lines");
    lines
}
