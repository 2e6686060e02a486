use super::{
    Document, DocxLoader, LoadError, Loader, MarkdownLoader, PdfLoader, TextLoader, extension_of,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Dispatch table from file extension to loader
pub struct LoaderRegistry {
    /// Loader for extensions without a registered one
    fallback: Box<dyn Loader>,
    /// Extension -> Loader mapping
    map: HashMap<String, Box<dyn Loader>>,
}

impl LoaderRegistry {
    /// Create a registry with the PDF, DOCX and Markdown loaders and a text fallback
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("pdf", PdfLoader);
        registry.register("docx", DocxLoader);
        registry.register("md", MarkdownLoader);
        registry.register("markdown", MarkdownLoader);
        registry
    }

    /// Create a registry that treats every file as plain text
    pub fn empty() -> Self {
        Self {
            fallback: Box::new(TextLoader),
            map: HashMap::new(),
        }
    }

    /// Register a loader for a file extension (without the dot)
    pub fn register(&mut self, extension: impl Into<String>, loader: impl Loader + 'static) {
        self.map
            .insert(extension.into().to_lowercase(), Box::new(loader));
    }

    /// Select the loader for a path, falling back to plain text
    pub fn select(&self, path: &str) -> &dyn Loader {
        self.map
            .get(&extension_of(path))
            .map(|l| &**l)
            .unwrap_or(&*self.fallback)
    }

    /// Number of registered loaders (excluding fallback)
    pub fn loader_count(&self) -> usize {
        self.map.len()
    }

    /// Read a file from disk and extract its text
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Document, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let path_str = path.to_string_lossy().into_owned();

        let loader = self.select(&path_str);
        let lines = loader.load(&path_str, &bytes)?;
        let raw_text = loader
            .raw_text(&bytes)
            .unwrap_or_else(|| lines.join("\n"));
        info!(path = %path_str, lines = lines.len(), "document loaded");

        Ok(Document {
            extension: extension_of(&path_str),
            path: path_str,
            bytes,
            lines,
            raw_text,
        })
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
