pub mod client;
pub mod model;
pub mod template;
pub mod types;


pub use client::HttpGenerator;
pub use model::{ModelInfo, ModelKind};
pub use template::PromptTemplate;
pub use types::{GenerateRequest, GenerateResponse, HealthResponse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unsupported model type: {0} (expected chatglm, llama or t5)")]
    UnknownModel(String),

    #[error("Generation failed: {0}")]
    Backend(String),
}

/// Text generation capability consumed by the summarization pipeline.
///
/// Implementations are synchronous and stateless from the caller's point of
/// view. Any error aborts the pipeline invocation that triggered it.
pub trait Generator {
    /// Generate a response for `prompt` applied to `content`
    ///
    /// # Arguments
    /// * `prompt` - Instruction, e.g. "生成以下内容的摘要:"
    /// * `content` - Text the instruction operates on
    /// * `max_length` - Generation length limit forwarded to the model
    fn generate(&self, prompt: &str, content: &str, max_length: usize)
        -> Result<String, GenerateError>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(
        &self,
        prompt: &str,
        content: &str,
        max_length: usize,
    ) -> Result<String, GenerateError> {
        (**self).generate(prompt, content, max_length)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(
        &self,
        prompt: &str,
        content: &str,
        max_length: usize,
    ) -> Result<String, GenerateError> {
        (**self).generate(prompt, content, max_length)
    }
}
