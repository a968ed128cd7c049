use crate::args::Cli;
use anyhow::{Context, Result};
use crypto_analyst::ModelConfig;
use dialoguer::console::style;
use std::time::Duration;
use tracing::info;

mod load_api_key;

use load_api_key::load_api_key;

/// Resolve the model configuration from arguments, environment and, if needed, the user.
pub(crate) fn setup(cli: &Cli) -> Result<ModelConfig> {
    let api_key = load_api_key().context("Failed to load API key")?;

    let mut builder = ModelConfig::builder();
    builder.api_key(api_key);
    if let Some(model_id) = &cli.model_id {
        builder.model_id(model_id.clone());
    }
    if let Some(base_url) = &cli.api_base_url {
        builder.base_url(base_url.clone());
    }
    if let Some(secs) = cli.timeout {
        builder.timeout(Duration::from_secs(secs));
    }

    let config = builder
        .build()
        .context("Failed to build model configuration")?;

    if !cli.json {
        print_config_summary(&config);
    }

    Ok(config)
}

fn print_config_summary(config: &ModelConfig) {
    info!(target: "plain",
        "{} {} {}",
        style("⚙").dim(),
        style("Model:").dim(),
        style(&config.model_id).bold(),
    );
}
