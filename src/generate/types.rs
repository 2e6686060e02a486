// the generation server contract
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub model_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lora: Option<String>,
    pub prompt: String,
    pub max_length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    #[serde(default)]
    pub available_models: Vec<String>,
}
