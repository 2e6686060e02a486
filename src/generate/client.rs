use super::types::{GenerateRequest, GenerateResponse, HealthResponse};
use super::{GenerateError, Generator, ModelInfo, PromptTemplate};
use reqwest::blocking::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single generation call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Blocking client for a local generation server
pub struct HttpGenerator {
    http: Client,
    endpoint: String,
    model: ModelInfo,
    template: PromptTemplate,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>, model: ModelInfo) -> Result<Self, GenerateError> {
        Self::with_timeout(endpoint, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: ModelInfo,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let http = Client::builder().timeout(timeout).build()?;
        let endpoint: String = endpoint.into();

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            template: PromptTemplate::summary(),
        })
    }

    /// Replace the prompt template used for chat models
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn model(&self) -> &ModelInfo {
        &self.model
    }

    /// Build the text sent to the model for one call
    pub fn compose(&self, prompt: &str, content: &str) -> String {
        if self.model.kind.uses_template() {
            self.template.render(prompt, content)
        } else {
            format!("{prompt}\n{content}")
        }
    }

    /// Check if the generation server is healthy
    pub fn health_check(&self) -> Result<HealthResponse, GenerateError> {
        let response = self.http.get(format!("{}/health", self.endpoint)).send()?;
        Ok(Self::check_status(response)?.json()?)
    }

    fn check_status(response: Response) -> Result<Response, GenerateError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(GenerateError::ServerError {
            status: status.as_u16(),
            body,
        })
    }
}

impl Generator for HttpGenerator {
    fn generate(
        &self,
        prompt: &str,
        content: &str,
        max_length: usize,
    ) -> Result<String, GenerateError> {
        let req = GenerateRequest {
            model: self.model.tag.clone(),
            model_path: self.model.path.clone(),
            lora: self.model.lora.clone(),
            prompt: self.compose(prompt, content),
            max_length,
        };

        debug!(model = %self.model.tag, chars = req.prompt.chars().count(), "generate");
        let response = self
            .http
            .post(format!("{}/generate", self.endpoint))
            .json(&req)
            .send()?;

        let res: GenerateResponse = Self::check_status(response)?.json()?;
        Ok(res.response)
    }
}
