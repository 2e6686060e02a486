//! Question answering over passages supplied by a retriever.

use crate::generate::{Generator, PromptTemplate};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Response when the retriever finds nothing
pub const NO_REFERENCES_ANSWER: &str = "没有提供足够的相关信息";

/// Similarity search over an indexed corpus, implemented outside this crate
pub trait Retriever {
    /// Up to `topn` passages most similar to `query`, best first
    fn most_similar(&self, query: &str, topn: usize) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaOptions {
    pub topn: usize,
    /// Character budget of the rendered prompt; the context is cut to fit
    pub max_input_size: usize,
    /// Generation length limit
    pub max_length: usize,
}

impl Default for QaOptions {
    fn default() -> Self {
        Self {
            topn: 5,
            max_input_size: 1024,
            max_length: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub response: String,
    /// Numbered passages the answer was grounded on
    pub references: Vec<String>,
}

/// Prefix passages with 1-based source numbers
pub fn add_source_numbers<S: AsRef<str>>(passages: &[S]) -> Vec<String> {
    passages
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("[{}]\t \"{}\"", idx + 1, item.as_ref()))
        .collect()
}

/// Join numbered references and cut them to what fits beside the QA template
pub fn build_context<S: AsRef<str>>(references: &[S], max_input_size: usize) -> String {
    let budget = max_input_size.saturating_sub(PromptTemplate::question_answering().char_count());
    references
        .iter()
        .map(|r| r.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
        .chars()
        .take(budget)
        .collect()
}

/// Answer `query` from retrieved passages.
///
/// The context is cut to fit [`PromptTemplate::question_answering`], so the
/// generator must render that template. For [`crate::HttpGenerator`] build it
/// with `.with_template(PromptTemplate::question_answering())`; its default is
/// the summary template.
pub fn answer<G, R>(generator: &G, retriever: &R, query: &str, options: &QaOptions) -> Result<Answer>
where
    G: Generator + ?Sized,
    R: Retriever + ?Sized,
{
    let passages = retriever
        .most_similar(query, options.topn)
        .context("Retrieval failed")?;

    if passages.is_empty() {
        info!("no passages retrieved");
        return Ok(Answer {
            response: NO_REFERENCES_ANSWER.to_string(),
            references: Vec::new(),
        });
    }

    let references = add_source_numbers(&passages);
    let context = build_context(&references, options.max_input_size);
    debug!(references = references.len(), context_chars = context.chars().count(), "answering");

    let response = generator
        .generate(query, &context, options.max_length)
        .context("Generation failed")?;

    Ok(Answer {
        response,
        references,
    })
}
