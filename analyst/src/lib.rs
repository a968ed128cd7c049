mod analysis;
mod client;
mod config;
mod error;
mod output;
mod prompt;
mod providers;

pub use analysis::{AnalysisResult, RiskLevel, Source, TrendPoint, Verdict};
pub use client::AnalysisClient;
pub use config::{ModelConfig, ModelConfigBuilder};
pub use error::{AnalysisError, UpstreamError};
pub use output::extract_analysis;
pub use prompt::build_analysis_prompt;
pub use providers::{
    sources_from_citations, Citation, GeminiService, GenerateOptions, ModelService,
    RawModelResponse, DEFAULT_BASE_URL, DEFAULT_MODEL_ID,
};
