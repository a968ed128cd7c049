//! The analysis pipeline: prompt, one model call, extraction, sources.

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use crate::output::extract_analysis;
use crate::prompt::build_analysis_prompt;
use crate::providers::{sources_from_citations, GenerateOptions, ModelService};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Requests analyses from a [`ModelService`].
///
/// Holds no per-call state, so one client can serve concurrent calls.
pub struct AnalysisClient {
    service: Arc<dyn ModelService>,
}

impl AnalysisClient {
    pub fn new(service: Arc<dyn ModelService>) -> Self {
        Self { service }
    }

    /// Analyze `subject` (a coin name or symbol).
    ///
    /// Makes exactly one call to the model service. Either a fully validated
    /// result is returned or nothing is.
    pub async fn analyze(&self, subject: &str) -> Result<AnalysisResult, AnalysisError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        info!(subject, service = self.service.name(), "Starting analysis");
        let prompt = build_analysis_prompt(subject);

        let options = GenerateOptions {
            search_grounding: true,
        };
        let raw = self.service.generate(&prompt, &options).await?;

        let text = match raw.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(AnalysisError::EmptyResponse),
        };
        trace!("Raw model reply:\n{}", text);

        let mut result = extract_analysis(&text)?;
        result.subject = subject.to_string();
        result.sources = sources_from_citations(raw.citations);

        debug!(
            verdict = %result.verdict,
            confidence = result.confidence_score,
            sources = result.sources.len(),
            "Analysis extracted"
        );

        Ok(result)
    }
}
