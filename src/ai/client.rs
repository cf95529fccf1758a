use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Name of the environment variable holding the API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Errors from the HTTP call itself. None of these are retried; only
/// JSON-recovery failures are (see `ai::recover`).
#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Api { status: u16, message: String },
    /// The API answered 200 but carried no generated text.
    NoContent,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request to Gemini API failed: {}", e),
            ClientError::Api { status, message } => {
                write!(f, "Gemini API error {}: {}", status, message)
            }
            ClientError::NoContent => write!(f, "Gemini API returned no generated text"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    config: GenerationConfig,
}

impl GeminiClient {
    /// Build a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| format!("{} is not set", API_KEY_VAR))?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            config: GenerationConfig::default(),
        }
    }

    /// POST the prompt to `generateContent` and return the raw generated
    /// text, before any JSON recovery.
    pub async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE, self.model, self.api_key);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.config.clone(),
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_generated_text(parsed).ok_or(ClientError::NoContent)
    }
}

/// Pull the error message out of an API error body, falling back to a fixed
/// string when the body is not the documented shape.
fn api_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("request rejected")
        .to_string()
}

/// The generated text sits at candidates[0].content.parts[0].text.
fn extract_generated_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
}
