use crate::generate::{GenerateError, Generator};
use std::collections::BTreeSet;
use tracing::debug;

/// Lead-in of the composed keyword prompt
pub const KEYWORD_LEAD_IN: &str = "保留关键信息:";

/// Distinct, trimmed keywords collected across a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: BTreeSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a generation result on whitespace and add every token
    pub fn extend_from_output(&mut self, output: &str) {
        self.keywords.extend(
            output
                .split_whitespace()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

/// Run the extraction prompt over every chunk and collect the keywords
pub fn extract_keyword_set<G, S>(
    generator: &G,
    chunks: &[S],
    keyword_prompt: &str,
    max_length: usize,
) -> Result<KeywordSet, GenerateError>
where
    G: Generator + ?Sized,
    S: AsRef<str>,
{
    let mut keywords = KeywordSet::new();

    for chunk in chunks {
        let chunk = chunk.as_ref();
        let output = generator.generate(keyword_prompt, chunk, max_length)?;
        debug!("text len: {} ==> {}", chunk.chars().count(), output);
        keywords.extend_from_output(&output);
    }

    Ok(keywords)
}

/// Fold keywords into a prompt for a follow-up summarization pass
pub fn compose_keyword_prompt(keywords: &KeywordSet, summary_prompt: &str) -> String {
    format!("{KEYWORD_LEAD_IN}\"{},{summary_prompt}\"", keywords.joined())
}
