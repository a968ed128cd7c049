use dialoguer::console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::{future::Future, io::IsTerminal, time::Duration};

/// How long each loading step stays on screen before the next one is shown.
const STEP_INTERVAL: Duration = Duration::from_millis(1500);

/// Progress messages shown while an analysis is running.
pub const ANALYSIS_STEPS: [&str; 4] = [
    "Scanning real-time market data...",
    "Analyzing historical charts and patterns...",
    "Evaluating macro-economic factors...",
    "Formulating trading strategy...",
];

/// Runs `fut` while a spinner walks through `steps`, then clears the line.
///
/// Each finished step is printed with a check mark; the last step stays active until
/// the future completes. Works in TTY only; no output when stderr isn't a TTY.
pub async fn with_loading_steps<Fut, T, E>(steps: &[&str], fut: Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    if steps.is_empty() || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(steps[0].to_string());
    pb.enable_steady_tick(Duration::from_millis(80));

    // RAII guard: always clear the spinner line on exit (success or error)
    struct Guard(ProgressBar);
    impl Drop for Guard {
        fn drop(&mut self) {
            self.0.finish_and_clear();
        }
    }
    let guard = Guard(pb);

    tokio::pin!(fut);
    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + STEP_INTERVAL,
        STEP_INTERVAL,
    );
    let mut current = 0;

    loop {
        tokio::select! {
            out = &mut fut => return out,
            _ = ticker.tick(), if current + 1 < steps.len() => {
                guard.0.println(format!("{} {}", style("✔").green(), style(steps[current]).dim()));
                current += 1;
                guard.0.set_message(steps[current].to_string());
            }
        }
    }
}
