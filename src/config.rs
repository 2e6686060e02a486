use crate::segment::{ChunkOptions, DEFAULT_MAX_LENGTH};
use crate::summarize::{DEFAULT_KEYWORD_PROMPT, DEFAULT_SUMMARY_PROMPT};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings loaded from a TOML file; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub prompts: PromptSettings,
    pub model: ModelSettings,
    pub qa: QaSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Character budget per chunk
    pub max_length: usize,
    /// Delete runs of this many line breaks (0 keeps them)
    pub strip_threshold: usize,
    /// Characters of neighbouring context per chunk (0 disables)
    pub coincide_length: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            strip_threshold: 0,
            coincide_length: 0,
        }
    }
}

impl ChunkingSettings {
    pub fn options(&self) -> ChunkOptions {
        ChunkOptions::new(self.max_length)
            .strip_threshold(self.strip_threshold)
            .coincide_length(self.coincide_length)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub keyword: String,
    pub summary: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD_PROMPT.to_string(),
            summary: DEFAULT_SUMMARY_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model tag, e.g. "chatglm-6b-int4"
    pub name: String,
    /// Base URL of the generation server
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Optional LoRA adapter directory
    pub lora: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: "chatglm-6b-int4".to_string(),
            endpoint: "http://localhost:18116".to_string(),
            timeout_secs: 180,
            lora: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaSettings {
    /// Passages requested from the retriever
    pub topn: usize,
    /// Character budget of the rendered question prompt
    pub max_input_size: usize,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            topn: 5,
            max_input_size: 1024,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no file is given or it does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!(?path, "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(settings)
    }

    /// Reject values the chunking core does not guard against
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_length == 0 {
            bail!("chunking.max_length must be greater than 0");
        }
        if self.model.timeout_secs == 0 {
            bail!("model.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
