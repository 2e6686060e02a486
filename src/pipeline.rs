//! Entry points over explicit arguments and an injected generator.

use crate::generate::{GenerateError, Generator};
use crate::segment::{ChunkOptions, chunk_text, join_chunks, split_chunks};
use crate::summarize::{
    Strategy, SummaryTrace, compose_keyword_prompt, extract_keyword_set, summarize_chunks,
};
use tracing::info;

/// Preprocess raw text and return its chunks joined by the chunk separator
pub fn preprocess_and_chunk(
    raw_text: &str,
    strip_threshold: usize,
    max_length: usize,
    coincide_length: usize,
) -> String {
    let options = ChunkOptions::new(max_length)
        .strip_threshold(strip_threshold)
        .coincide_length(coincide_length);
    let chunks = chunk_text(raw_text, &options);
    info!(chunks = chunks.len(), max_length, "document chunked");

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    join_chunks(&texts)
}

/// Summarize joined chunk text and return the joined partial outputs
pub fn summarize<G: Generator + ?Sized>(
    generator: &G,
    joined_chunk_text: &str,
    mode: Strategy,
    prompt: &str,
    max_length: usize,
) -> Result<String, GenerateError> {
    Ok(summarize_trace(generator, joined_chunk_text, mode, prompt, max_length)?.joined())
}

/// Like [`summarize`], keeping the partial outputs separate
pub fn summarize_trace<G: Generator + ?Sized>(
    generator: &G,
    joined_chunk_text: &str,
    mode: Strategy,
    prompt: &str,
    max_length: usize,
) -> Result<SummaryTrace, GenerateError> {
    let chunks = split_chunks(joined_chunk_text);
    info!(chunks = chunks.len(), %mode, "summarizing");

    summarize_chunks(generator, &chunks, mode, prompt, max_length)
}

/// Extract keywords from joined chunk text and fold them into a summary prompt
pub fn extract_keywords<G: Generator + ?Sized>(
    generator: &G,
    joined_chunk_text: &str,
    keyword_prompt: &str,
    summary_prompt: &str,
    max_length: usize,
) -> Result<String, GenerateError> {
    let chunks = split_chunks(joined_chunk_text);
    let keywords = extract_keyword_set(generator, &chunks, keyword_prompt, max_length)?;
    info!(chunks = chunks.len(), keywords = keywords.len(), "keywords extracted");

    Ok(compose_keyword_prompt(&keywords, summary_prompt))
}
