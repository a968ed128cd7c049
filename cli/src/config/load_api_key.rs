use anyhow::{bail, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use std::env;
use std::io::IsTerminal;

/// Checked in order; the first non-empty value wins.
const API_KEY_ENV_VARS: [&str; 2] = ["MODEL_API_KEY", "API_KEY"];

/// Loads the Model API key from the environment or interactively prompts the user.
///
/// Prompting only happens on an interactive terminal; otherwise a missing key is an error.
pub(crate) fn load_api_key() -> Result<String> {
    if let Some(api_key) = api_key_from_env() {
        return Ok(api_key);
    }

    if !std::io::stdin().is_terminal() {
        bail!("The `MODEL_API_KEY` environment variable is not set");
    }

    println!("🔑 The `MODEL_API_KEY` environment variable is not set.");
    println!("An API key for the Gemini API is required to request an analysis.");
    println!("You can create one in Google AI Studio.");
    println!();

    let api_key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Please enter your Model API key")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model API key cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact()
        .context("Failed to read Model API key input")?;

    Ok(api_key.trim().to_string())
}

fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
