use super::{Citation, GenerateOptions, ModelService, RawModelResponse};
use crate::config::ModelConfig;
use crate::error::UpstreamError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, trace};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";

/// Google Gemini `generateContent` over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiService {
    client: Client,
    config: ModelConfig,
}

impl GeminiService {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    fn chat_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_id
        )
    }

    fn chat_headers(&self) -> Vec<(&'static str, String)> {
        vec![("x-goog-api-key", self.config.api_key.clone())]
    }

    fn build_chat_body(prompt: &str, options: &GenerateOptions) -> Value {
        let mut body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });
        if options.search_grounding {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }

    /// Pull the reply text and grounding citations out of the first candidate.
    fn parse_chat_content(response: &Value) -> RawModelResponse {
        let candidate = &response["candidates"][0];

        let text: String = candidate["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter(|part| !part["thought"].as_bool().unwrap_or(false))
                    .filter_map(|part| part["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        let citations = candidate["groundingMetadata"]["groundingChunks"]
            .as_array()
            .map(|chunks| {
                chunks
                    .iter()
                    .map(|chunk| Citation {
                        title: chunk["web"]["title"].as_str().map(str::to_string),
                        uri: chunk["web"]["uri"].as_str().map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();

        RawModelResponse {
            text: (!text.is_empty()).then_some(text),
            citations,
        }
    }

    /// Best human-readable message from an error body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl ModelService for GeminiService {
    fn name(&self) -> &str {
        &self.config.model_id
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<RawModelResponse, UpstreamError> {
        let body = Self::build_chat_body(prompt, options);
        info!(
            model = %self.config.model_id,
            grounding = options.search_grounding,
            "Requesting analysis from Gemini"
        );
        debug!(prompt_bytes = prompt.len(), "Sending generateContent request");

        let mut request = self.client.post(self.chat_endpoint()).json(&body);
        for (name, value) in self.chat_headers() {
            request = request.header(name, value);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = match Self::error_message(&body) {
                m if m.is_empty() => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
                m => m,
            };
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = resp.json().await?;
        trace!("Gemini response payload: {}", payload);

        let raw = Self::parse_chat_content(&payload);
        debug!(
            text_bytes = raw.text.as_deref().map_or(0, str::len),
            citations = raw.citations.len(),
            "Received generateContent response"
        );

        Ok(raw)
    }
}
