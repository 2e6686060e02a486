use super::SUMMARY_SEPARATOR;
use crate::generate::{GenerateError, Generator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How partial summaries are produced over a chunk sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every chunk is summarized on its own
    Subsection,
    /// Each chunk is folded into the summary carried from the previous one
    #[default]
    Recursive,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Subsection => "subsection",
            Strategy::Recursive => "recursive",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subsection" => Ok(Strategy::Subsection),
            "recursive" => Ok(Strategy::Recursive),
            other => Err(format!(
                "unknown strategy '{other}' (expected subsection or recursive)"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial outputs, one per chunk, in chunk order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTrace {
    pub outputs: Vec<String>,
}

impl SummaryTrace {
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Output of the last chunk; for the recursive strategy this covers the document
    pub fn last(&self) -> Option<&str> {
        self.outputs.last().map(String::as_str)
    }

    pub fn joined(&self) -> String {
        self.outputs.join(SUMMARY_SEPARATOR)
    }
}

/// Run a summarization strategy over `chunks`, one generation call per chunk.
///
/// The first failing call aborts the run and no partial trace is returned.
pub fn summarize_chunks<G, S>(
    generator: &G,
    chunks: &[S],
    strategy: Strategy,
    prompt: &str,
    max_length: usize,
) -> Result<SummaryTrace, GenerateError>
where
    G: Generator + ?Sized,
    S: AsRef<str>,
{
    let mut outputs = Vec::with_capacity(chunks.len());
    let mut summary = String::new();

    for (idx, chunk) in chunks.iter().enumerate() {
        let chunk = chunk.as_ref();

        let input = match strategy {
            Strategy::Subsection => chunk.to_string(),
            // Index 0 is summarized but never carried: index 1 starts over
            Strategy::Recursive if idx <= 1 => chunk.to_string(),
            Strategy::Recursive => format!("{summary}\n{chunk}"),
        };

        let output = generator.generate(prompt, &input, max_length)?;
        debug!(
            "summary: {} + text: {} ==> {}",
            summary.chars().count(),
            chunk.chars().count(),
            output.chars().count()
        );

        if strategy == Strategy::Recursive {
            summary.clone_from(&output);
        }
        outputs.push(output);
    }

    Ok(SummaryTrace { outputs })
}
