// Public API exports
pub mod config;
pub mod generate;
pub mod loader;
pub mod pipeline;
pub mod qa;
pub mod report;
pub mod segment;
pub mod summarize;

// Re-export main types for convenience
pub use config::Settings;

pub use segment::{
    CHUNK_SEPARATOR, Chunk, ChunkMetadata, ChunkOptions, DEFAULT_MAX_LENGTH, chunk_text,
    split_in_line, split_sentences,
};

pub use summarize::{KeywordSet, Strategy, SummaryTrace, summarize_chunks};

pub use generate::{GenerateError, Generator, HttpGenerator, ModelInfo, ModelKind, PromptTemplate};

pub use loader::{Document, LoadError, Loader, LoaderRegistry, load_document};

pub use pipeline::{extract_keywords, preprocess_and_chunk, summarize};

pub use qa::{Answer, QaOptions, Retriever};

pub use report::SummaryReport;
