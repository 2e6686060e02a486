// model.rs - which generation model a client talks to
use super::GenerateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Model path used when a tag is not in the registry
pub const DEFAULT_MODEL_PATH: &str = "THUDM/chatglm-6b-int4";

/// Known model tags and where their weights live
pub const KNOWN_MODELS: &[(&str, &str)] = &[
    ("chatglm-6b", "THUDM/chatglm-6b"),
    ("chatglm-6b-int4", "THUDM/chatglm-6b-int4"),
    ("llama-7b", "decapoda-research/llama-7b-hf"),
    ("llama-13b", "decapoda-research/llama-13b-hf"),
    ("t5-lamini-flan-783M", "MBZUAI/LaMini-Flan-T5-783M"),
];

/// Family of a generation model, fixed when the client is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    ChatGlm,
    Llama,
    T5,
}

impl ModelKind {
    /// Chat models receive a rendered prompt template; T5 is plain text-to-text
    pub fn uses_template(self) -> bool {
        !matches!(self, ModelKind::T5)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::ChatGlm => "chatglm",
            ModelKind::Llama => "llama",
            ModelKind::T5 => "t5",
        }
    }
}

impl FromStr for ModelKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chatglm" => Ok(ModelKind::ChatGlm),
            "llama" => Ok(ModelKind::Llama),
            "t5" => Ok(ModelKind::T5),
            other => Err(GenerateError::UnknownModel(other.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved model selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Tag as chosen by the user, e.g. "chatglm-6b-int4"
    pub tag: String,
    pub kind: ModelKind,
    /// Weights location understood by the generation server
    pub path: String,
    /// Optional LoRA adapter directory
    pub lora: Option<String>,
}

impl ModelInfo {
    /// Resolve a model tag. The family comes from the text before the first `-`.
    pub fn from_tag(tag: &str) -> Result<Self, GenerateError> {
        let family = tag.split('-').next().unwrap_or_default();
        let kind = family.parse()?;
        let path = KNOWN_MODELS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, path)| *path)
            .unwrap_or(DEFAULT_MODEL_PATH);

        Ok(Self {
            tag: tag.to_string(),
            kind,
            path: path.to_string(),
            lora: None,
        })
    }

    /// Attach a LoRA adapter, kept only if the directory exists
    pub fn with_lora(mut self, lora: Option<&str>) -> Self {
        self.lora = lora
            .filter(|path| Path::new(path).exists())
            .map(str::to_string);
        self
    }
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            tag: "chatglm-6b-int4".to_string(),
            kind: ModelKind::ChatGlm,
            path: DEFAULT_MODEL_PATH.to_string(),
            lora: None,
        }
    }
}
