use super::{LoadError, Loader, clean_lines};

/// Plain text loader, also the fallback for unknown extensions
pub struct TextLoader;

impl Loader for TextLoader {
    fn load(&self, _path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
        Ok(clean_lines(&String::from_utf8_lossy(bytes)))
    }

    fn raw_text(&self, bytes: &[u8]) -> Option<String> {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}
