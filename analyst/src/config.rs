use crate::providers::{DEFAULT_BASE_URL, DEFAULT_MODEL_ID};
use derive_builder::Builder;
use std::fmt;
use std::time::Duration;

/// Connection settings for the model service.
#[derive(Builder, Clone)]
pub struct ModelConfig {
    /// The API key for authentication with the model API
    #[builder(setter(into))]
    pub(crate) api_key: String,
    /// The ID of the model
    #[builder(setter(into), default = "String::from(DEFAULT_MODEL_ID)")]
    pub model_id: String,
    /// Scheme and host of the model API, without a trailing path
    #[builder(setter(into), default = "String::from(DEFAULT_BASE_URL)")]
    pub base_url: String,
    /// Overall request timeout; none by default
    #[builder(setter(strip_option), default)]
    pub timeout: Option<Duration>,
}

impl ModelConfig {
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
