use super::preprocess::{strip_line_breaks, text_lines};
use super::sentence::split_sentences;
use super::DEFAULT_MAX_LENGTH;
use tracing::debug;

/// A chunk of text ready for a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text, including any overlap fragments
    pub text: String,
    /// Metadata about the chunk
    pub metadata: ChunkMetadata,
}

/// Metadata for a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Character count of the chunk body (overlap not included)
    pub char_count: usize,
    /// Index of the source line among the document's non-empty lines
    pub line_index: usize,
    /// Number of sentence units packed into this chunk
    pub unit_count: usize,
}

/// Knobs for turning a document into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Runs of this many line breaks or more are deleted (0 disables)
    pub strip_threshold: usize,
    /// Character budget per chunk
    pub max_length: usize,
    /// Characters of neighbouring context attached to each chunk (0 disables)
    pub coincide_length: usize,
}

impl ChunkOptions {
    pub fn new(max_length: usize) -> Self {
        Self {
            strip_threshold: 0,
            max_length,
            coincide_length: 0,
        }
    }

    pub fn strip_threshold(mut self, threshold: usize) -> Self {
        self.strip_threshold = threshold;
        self
    }

    pub fn coincide_length(mut self, length: usize) -> Self {
        self.coincide_length = length;
        self
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

/// Sentence units accumulated for one chunk
#[derive(Default)]
struct Packed {
    text: String,
    char_count: usize,
    unit_count: usize,
}

/// Greedily pack a line's sentence units into chunks of `limit_length` chars.
///
/// A chunk closes as soon as its length reaches the limit, so closed chunks
/// are at least `limit_length` long. The remainder is flushed only while it
/// is still below the limit.
pub fn split_in_line(line: &str, limit_length: usize) -> Vec<String> {
    pack_units(line, limit_length)
        .into_iter()
        .map(|packed| packed.text)
        .collect()
}

fn pack_units(line: &str, limit_length: usize) -> Vec<Packed> {
    let mut outputs = Vec::new();
    let mut current = Packed::default();

    for unit in split_sentences(line) {
        current.text.push_str(unit);
        current.char_count += unit.chars().count();
        current.unit_count += 1;

        if current.char_count >= limit_length {
            outputs.push(std::mem::take(&mut current));
        }
    }

    if current.char_count < limit_length && !current.text.is_empty() {
        outputs.push(current);
    }

    outputs
}

/// Preprocess a document and build its chunks.
///
/// Lines within `max_length` become a chunk as-is; longer lines are split
/// on sentence boundaries. With a non-zero `coincide_length` every chunk is
/// wrapped in context taken from the neighbouring lines.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let text = strip_line_breaks(text, options.strip_threshold);
    let lines = text_lines(&text);
    let mut chunks = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let char_count = line.chars().count();
        let packed = if char_count <= options.max_length {
            vec![Packed {
                text: line.to_string(),
                char_count,
                unit_count: split_sentences(line).len(),
            }]
        } else {
            let packed = pack_units(line, options.max_length);
            debug!("split in line: {}", packed.len());
            packed
        };

        let (prefix, suffix) = if options.coincide_length > 0 {
            let before = idx
                .checked_sub(1)
                .map(|prev| tail_fragment(lines[prev], options.coincide_length))
                .unwrap_or_default();
            let after = lines
                .get(idx + 1)
                .map(|next| head_fragment(next, options.coincide_length))
                .unwrap_or_default();
            (before, after)
        } else {
            (String::new(), String::new())
        };

        chunks.extend(packed.into_iter().map(|p| Chunk {
            text: format!("{prefix}{}{suffix}", p.text),
            metadata: ChunkMetadata {
                char_count: p.char_count,
                line_index: idx,
                unit_count: p.unit_count,
            },
        }));
    }

    debug!("split input text: {}", chunks.len());
    chunks
}

/// Trailing context of a preceding line, at most `budget` chars
fn tail_fragment(line: &str, budget: usize) -> String {
    let last = split_in_line(line, budget).pop().unwrap_or_default();
    let skip = last.chars().count().saturating_sub(budget);
    last.chars().skip(skip).collect()
}

/// Leading context of a following line, at most `budget` chars
fn head_fragment(line: &str, budget: usize) -> String {
    split_in_line(line, budget)
        .into_iter()
        .next()
        .map(|first| first.chars().take(budget).collect())
        .unwrap_or_default()
}
