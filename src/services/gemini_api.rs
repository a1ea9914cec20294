use std::env;
use std::fs;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::services::survey_import::{ImportError, StructuredGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum AiConfigError {
    #[error("failed to read AI config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse AI config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Where and how to reach the text-to-survey service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable that holds the API key.
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl AiConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, AiConfigError> {
        let contents = fs::read_to_string(filepath).map_err(|source| AiConfigError::Read {
            path: filepath.to_string(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| AiConfigError::Parse {
            path: filepath.to_string(),
            source,
        })
    }

    /// Loads the config file when one is given, defaults otherwise.
    pub fn load(filepath: Option<&str>) -> Result<Self, AiConfigError> {
        match filepath {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn api_key_from_env(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

pub struct GeminiClient {
    config: AiConfig,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig, api_key: String) -> Self {
        Self {
            config,
            api_key,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Option<String>, ImportError> {
        let body = build_request_body(prompt, schema);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ImportError::Connection(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ImportError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ImportError::RateLimited);
        }
        if !status.is_success() {
            return Err(ImportError::Service(status.as_u16()));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| ImportError::InvalidResponse(err.to_string()))?;
        Ok(extract_text(&payload))
    }
}

pub fn build_request_body(prompt: &str, schema: &Value) -> Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    })
}

/// Concatenates the text parts of the first candidate. Blank text counts as
/// no text.
pub fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}
