mod preprocess;
mod sentence;
mod splitter;


pub use preprocess::{strip_line_breaks, text_lines};
pub use sentence::{STOP_CHARS, ends_with_stop_char, is_stop_char, split_sentences};
pub use splitter::{Chunk, ChunkMetadata, ChunkOptions, chunk_text, split_in_line};

/// Separator between chunks in the joined chunk text
pub const CHUNK_SEPARATOR: &str = "\n\n\n";

/// Default character budget per chunk
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Join chunk texts into the artifact handed to the summarizers
pub fn join_chunks<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

/// Split joined chunk text back into chunks, skipping empty pieces
pub fn split_chunks(joined: &str) -> Vec<&str> {
    joined
        .split(CHUNK_SEPARATOR)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
