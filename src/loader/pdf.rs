use super::{LoadError, Loader};
use crate::segment::ends_with_stop_char;

/// PDF loader: passages are merged from page lines at sentence ends
pub struct PdfLoader;

impl Loader for PdfLoader {
    fn load(&self, _path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| LoadError::Pdf(e.to_string()))?;

        Ok(passages_from_pages(&pages))
    }
}

/// Passages of every page in order; a passage never spans a page break
pub fn passages_from_pages<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| merge_page_lines(page.as_ref()))
        .collect()
}

/// Join a page's lines into passages that end on a stop character.
///
/// PDF text breaks lines at layout width; consecutive lines are concatenated
/// until one ends a sentence. A trailing unterminated run is kept as well.
pub fn merge_page_lines(page: &str) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current = String::new();

    for line in page.trim().lines().map(str::trim).filter(|l| !l.is_empty()) {
        current.push_str(line);
        if ends_with_stop_char(line) {
            passages.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        passages.push(current);
    }

    passages
}
