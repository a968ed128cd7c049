mod app;
mod args;
mod config;
mod ui;

use anyhow::Result;
use app::Application;
use dialoguer::console::style;
use std::io::Write;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let app = Application::init()?;
    app.run().await
}

fn init_logging() -> Result<()> {
    // plain layer (only target="plain")
    let plain_fmt = tracing_subscriber::fmt::format()
        .without_time()
        .with_level(false)
        .with_target(false)
        .compact();
    let plain_layer = tracing_subscriber::fmt::layer()
        .event_format(plain_fmt)
        .with_filter(Targets::new().with_target("plain", LevelFilter::TRACE));

    // use RUST_LOG if provided; otherwise default
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,crypto_oracle=info"));

    let rich_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(plain_layer)
        .with(rich_layer)
        .try_init()?;

    Ok(())
}

/// Errors go to stderr so `--json` output on stdout stays parseable.
fn print_error(err: &anyhow::Error) {
    let _ = write_error(&mut std::io::stderr().lock(), err);
}

fn write_error(out: &mut impl Write, err: &anyhow::Error) -> std::io::Result<()> {
    writeln!(out, "{} {}", style("✘").red(), style("Analysis failed.").bold())?;
    writeln!(out, "  {}", style(format!("{err:#}")).red())
}
