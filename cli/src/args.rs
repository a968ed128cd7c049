use anyhow::{Context, Result};
use clap::parser::ValueSource;
use clap::{CommandFactory, Parser, ValueHint};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Quick picks offered when no subject is given on the command line.
pub const QUICK_SEARCHES: [&str; 5] = [
    "Bitcoin (BTC)",
    "Ethereum (ETH)",
    "Solana (SOL)",
    "Ripple (XRP)",
    "Dogecoin (DOGE)",
];

/// CryptoOracle - grounded market analysis for any coin
///
/// Asks a Gemini model (with live Google Search) for a trading verdict,
/// risk level, trade setup and a 3-month price projection.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Coin name or symbol, e.g. "Bitcoin (BTC)" or "PEPE". Prompted for when omitted.
    pub subject: Option<String>,

    /// Specify the model to use
    #[arg(long = "model", env = "MODEL_ID")]
    pub model_id: Option<String>,

    /// Base URL of the model API (scheme and host)
    #[arg(long = "api-base-url", env = "MODEL_API_BASE_URL", value_hint = ValueHint::Url)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, env = "MODEL_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Print the analysis as JSON instead of the formatted report
    #[arg(long)]
    pub json: bool,

    /// Path to environment file (default: ./.env). Can also use APP_ENV_FILE.
    #[arg(
        long,
        value_hint = ValueHint::FilePath,
        default_value = ".env",
        env = "APP_ENV_FILE"
    )]
    pub env_file: PathBuf,
}

impl Cli {
    /// Parse `args`, load the env file they name, then parse again so the
    /// `env` fallbacks see the values from that file.
    ///
    /// A missing default `.env` is ignored; a file the user asked for must load.
    pub fn parse_with_env_file<I, T>(args: I) -> Result<Cli>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let matches = Cli::command()
            .try_get_matches_from(args.iter().cloned())
            .unwrap_or_else(|e| e.exit());
        let explicit = matches.value_source("env_file") != Some(ValueSource::DefaultValue);
        if let Some(path) = matches.get_one::<PathBuf>("env_file") {
            load_env_file(path, explicit)?;
        }

        Ok(Cli::try_parse_from(args).unwrap_or_else(|e| e.exit()))
    }
}

fn load_env_file(path: &Path, explicit: bool) -> Result<()> {
    match dotenvy::from_filename(path) {
        Ok(_) => Ok(()),
        Err(_) if !explicit => Ok(()),
        Err(err) => Err(err).with_context(|| format!("Failed to load env file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subject_and_flags() {
        let cli = Cli::try_parse_from([
            "crypto-oracle",
            "Solana (SOL)",
            "--model",
            "gemini-2.5-pro",
            "--json",
            "--timeout",
            "90",
        ])
        .unwrap();

        assert_eq!(cli.subject.as_deref(), Some("Solana (SOL)"));
        assert_eq!(cli.model_id.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.timeout, Some(90));
        assert!(cli.json);
    }

    #[test]
    fn test_subject_optional() {
        let cli = Cli::try_parse_from(["crypto-oracle", "--env-file", "other.env"]).unwrap();
        assert!(cli.subject.is_none());
        assert_eq!(cli.env_file, PathBuf::from("other.env"));
    }

    #[test]
    fn test_env_file_feeds_env_fallbacks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "MODEL_API_BASE_URL=http://127.0.0.1:9/from-env-file").unwrap();

        let path = file.path().to_str().unwrap();
        let cli = Cli::parse_with_env_file(["crypto-oracle", "BTC", "--env-file", path]).unwrap();

        assert_eq!(
            cli.api_base_url.as_deref(),
            Some("http://127.0.0.1:9/from-env-file")
        );
    }

    #[test]
    fn test_missing_explicit_env_file_is_an_error() {
        let err = Cli::parse_with_env_file([
            "crypto-oracle",
            "BTC",
            "--env-file",
            "/nonexistent/crypto-oracle.env",
        ])
        .unwrap_err();

        assert!(err.to_string().contains("/nonexistent/crypto-oracle.env"));
    }
}
