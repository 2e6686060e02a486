use crate::summarize::{Strategy, SummaryTrace};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Record of one summarization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub id: Uuid,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub source: Option<String>,
    /// Hex SHA-256 of the source bytes
    pub source_sha256: String,
    pub mode: Strategy,
    pub chunk_count: usize,
    pub trace: Vec<String>,
    /// Joined trace, as returned to the caller
    pub summary: String,
}

impl SummaryReport {
    pub fn new(source: Option<&str>, source_bytes: &[u8], mode: Strategy, trace: SummaryTrace) -> Self {
        let summary = trace.joined();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now().to_rfc3339(),
            source: source.map(str::to_string),
            source_sha256: sha256_hex(source_bytes),
            mode,
            chunk_count: trace.len(),
            trace: trace.outputs,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize summary report")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
