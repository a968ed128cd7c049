use crate::args::QUICK_SEARCHES;
use anyhow::{bail, Context, Result};
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input};
use std::io::IsTerminal;

const MANUAL_ENTRY: &str = "Enter coin name or symbol...";

/// Ask the user which coin to analyze: one of the quick picks or free text.
pub(crate) fn select_subject() -> Result<String> {
    if !std::io::stdin().is_terminal() {
        bail!("No coin given; pass one as an argument, e.g. `crypto-oracle \"Bitcoin (BTC)\"`");
    }

    let term = Term::stderr();

    let mut options: Vec<&str> = QUICK_SEARCHES.to_vec();
    options.push(MANUAL_ENTRY);

    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Coin to analyze (type to filter)")
        .items(&options)
        .default(0)
        .interact_on(&term)
        .context("Failed to get user selection")?;

    let subject = if options[selection] == MANUAL_ENTRY {
        prompt_manual(&term)?
    } else {
        options[selection].to_string()
    };

    Ok(subject)
}

fn prompt_manual(term: &Term) -> Result<String> {
    let subject: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Coin name or symbol (e.g., BTC, Pepe)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Coin name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text_on(term)
        .context("Failed to read coin name input")?;

    Ok(subject.trim().to_string())
}
