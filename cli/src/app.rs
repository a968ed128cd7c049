use crate::args::Cli;
use crate::config;
use crate::ui::render::render_analysis;
use crate::ui::spinner::{with_loading_steps, ANALYSIS_STEPS};
use crate::ui::subject::select_subject;
use anyhow::{Context, Result};
use crypto_analyst::{AnalysisClient, AnalysisError, AnalysisResult, GeminiService, ModelConfig};
use std::sync::Arc;
use tracing::{debug, info};

pub struct Application {
    subject: String,
    json: bool,
    model: ModelConfig,
}

impl Application {
    pub fn init() -> Result<Application> {
        // Preload environment variables from .env file if it exists before parsing CLI args
        dotenvy::dotenv().ok();

        let cli = Cli::parse_with_env_file(std::env::args_os())?;

        let subject = match &cli.subject {
            Some(subject) => subject.clone(),
            None => select_subject()?,
        };
        let model = config::setup(&cli)?;

        Ok(Application {
            subject,
            json: cli.json,
            model,
        })
    }

    pub async fn run(&self) -> Result<()> {
        let service =
            GeminiService::new(self.model.clone()).context("Failed to set up model client")?;
        let client = AnalysisClient::new(Arc::new(service));

        let analysis = if self.json {
            client.analyze(&self.subject).await
        } else {
            with_loading_steps(&ANALYSIS_STEPS, client.analyze(&self.subject)).await
        };

        let analysis = analysis.inspect_err(log_failure_details)?;
        self.display(&analysis)
    }

    fn display(&self, analysis: &AnalysisResult) -> Result<()> {
        if self.json {
            let json =
                serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")?;
            println!("{json}");
        } else {
            info!(target: "plain", "{}", render_analysis(analysis));
        }
        Ok(())
    }
}

fn log_failure_details(err: &AnalysisError) {
    if let Some(raw) = err.raw_reply() {
        debug!("Raw model reply that failed to parse:\n{}", raw);
    }
}
