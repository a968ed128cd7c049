//! Model service boundary.
//!
//! The analysis pipeline only ever talks to a [`ModelService`]; the concrete
//! HTTP transport lives in [`gemini`] and test doubles can stand in for it.

mod gemini;

pub use gemini::{GeminiService, DEFAULT_BASE_URL, DEFAULT_MODEL_ID};

use crate::analysis::Source;
use crate::error::UpstreamError;
use async_trait::async_trait;

/// Per-call switches for the model service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Let the service run a live web search and ground its answer in the results.
    pub search_grounding: bool,
}

/// A citation as delivered by the service; either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl Citation {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            uri: Some(uri.into()),
        }
    }

    /// Convert to a [`Source`] if both title and uri are present and non-empty.
    pub fn into_source(self) -> Option<Source> {
        match (self.title, self.uri) {
            (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => {
                Some(Source { title, uri })
            }
            _ => None,
        }
    }
}

/// Unprocessed output of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: Option<String>,
    pub citations: Vec<Citation>,
}

/// A text-generation service. Implementations perform exactly one request per call.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "model"
    }

    /// Generate a reply to `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<RawModelResponse, UpstreamError>;
}

/// Keep only complete citations, preserving their order.
pub fn sources_from_citations(citations: Vec<Citation>) -> Vec<Source> {
    citations
        .into_iter()
        .filter_map(Citation::into_source)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_citations_dropped() {
        let citations = vec![
            Citation {
                title: Some("CoinDesk".into()),
                uri: None,
            },
            Citation::new("Reuters", "https://reuters.com/btc"),
            Citation {
                title: None,
                uri: Some("https://example.com".into()),
            },
            Citation::new("", "https://empty-title.example"),
        ];

        let sources = sources_from_citations(citations);
        assert_eq!(
            sources,
            vec![Source {
                title: "Reuters".into(),
                uri: "https://reuters.com/btc".into()
            }]
        );
    }

    #[test]
    fn test_order_preserved() {
        let sources = sources_from_citations(vec![
            Citation::new("b", "https://b"),
            Citation::new("a", "https://a"),
        ]);
        let titles: Vec<_> = sources.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    struct Silent;

    #[async_trait]
    impl ModelService for Silent {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerateOptions,
        ) -> Result<RawModelResponse, UpstreamError> {
            Ok(RawModelResponse::default())
        }
    }

    #[tokio::test]
    async fn test_generate_is_the_only_required_method() {
        let service: &dyn ModelService = &Silent;
        assert_eq!(service.name(), "model");
        let raw = service
            .generate("prompt", &GenerateOptions::default())
            .await
            .unwrap();
        assert!(raw.text.is_none());
    }
}
