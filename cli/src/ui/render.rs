//! Terminal rendering of a finished analysis.

use crypto_analyst::{AnalysisResult, RiskLevel, TrendPoint, Verdict};
use dialoguer::console::{style, Style, StyledObject};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Format the full analysis report.
pub fn render_analysis(data: &AnalysisResult) -> String {
    let mut out = String::new();

    let sep = style("◆").cyan().bold();
    let _ = writeln!(
        out,
        "\n{sep} {} {sep}  {}",
        style(&data.subject).bold(),
        style(&data.current_price_label).cyan().bold()
    );
    let _ = writeln!(
        out,
        "{}  {} {}  {} {}\n",
        verdict_badge(data.verdict),
        style("Confidence").dim(),
        style(format!("{:.0}%", data.confidence_score)).bold(),
        style("Risk Level").dim(),
        risk_label(data.risk_level),
    );

    section(&mut out, "Summary");
    let _ = writeln!(out, "{INDENT}{}\n", data.summary);

    section(&mut out, "Trade Setup");
    for (label, value) in [
        ("Entry", &data.entry_price),
        ("Take Profit", &data.take_profit),
        ("Stop Loss", &data.stop_loss),
    ] {
        let _ = writeln!(out, "{INDENT}{:<12} {}", label, style(value).bold());
    }
    out.push('\n');

    if !data.key_factors.is_empty() {
        section(&mut out, "Key Factors");
        for factor in &data.key_factors {
            let _ = writeln!(out, "{INDENT}• {factor}");
        }
        out.push('\n');
    }

    if !data.predicted_trend.is_empty() {
        section(&mut out, "Price Projection");
        render_trend(&mut out, &data.predicted_trend);
        if let Some(change) = data.projected_change_pct() {
            let _ = writeln!(out, "{INDENT}Projected change: {}", signed_pct(change));
        }
        out.push('\n');
    }

    section(&mut out, "Detailed Analysis");
    for line in data.detailed_analysis.lines() {
        let _ = writeln!(out, "{INDENT}{line}");
    }
    out.push('\n');

    if !data.sources.is_empty() {
        section(&mut out, "Sources");
        for (i, source) in data.sources.iter().enumerate() {
            let _ = writeln!(
                out,
                "{INDENT}{}. {} {}",
                i + 1,
                source.title,
                style(format!("({})", source.uri)).dim()
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", style("Not financial advice.").dim().italic());
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", style(title).bold().underlined());
}

fn verdict_badge(verdict: Verdict) -> StyledObject<String> {
    let (icon, badge) = match verdict {
        Verdict::Buy => ("▲", Style::new().green()),
        Verdict::Sell => ("▼", Style::new().red()),
        Verdict::Hold => ("■", Style::new().yellow()),
        Verdict::Wait => ("⚠", Style::new().white().dim()),
    };
    let text: &'static str = verdict.into();
    badge.bold().apply_to(format!("[{icon} {text}]"))
}

fn risk_label(risk: RiskLevel) -> StyledObject<&'static str> {
    let text: &'static str = risk.into();
    match risk {
        RiskLevel::Low => style(text).green(),
        RiskLevel::Medium => style(text).yellow(),
        RiskLevel::High => style(text).color256(208),
        RiskLevel::Extreme => style(text).red().bold(),
    }
}

fn render_trend(out: &mut String, trend: &[TrendPoint]) {
    let base = trend[0].price;
    let width = trend.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);

    for (i, point) in trend.iter().enumerate() {
        let mut line = format!(
            "{INDENT}{:<width$}  {:>14}",
            point.label,
            format_price(point.price),
        );
        if i > 0 && base != 0.0 {
            let change = (point.price - base) / base * 100.0;
            let _ = write!(line, "  {}", signed_pct(change));
        }
        if let Some(note) = &point.annotation {
            let _ = write!(line, "  {}", style(note).dim());
        }
        let _ = writeln!(out, "{line}");
    }
}

fn signed_pct(change: f64) -> StyledObject<String> {
    let text = format!("{change:+.2}%");
    if change >= 0.0 {
        style(text).green()
    } else {
        style(text).red()
    }
}

/// `$`-prefixed price with thousands separators; sub-dollar prices keep more precision.
fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        let digits = format!("{price:.6}");
        let digits = digits.trim_end_matches('0').trim_end_matches('.');
        return format!("${digits}");
    }

    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_analyst::Source;
    use dialoguer::console::strip_ansi_codes;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            subject: "Bitcoin (BTC)".into(),
            current_price_label: "$67,250".into(),
            verdict: Verdict::Buy,
            confidence_score: 82.0,
            risk_level: RiskLevel::Medium,
            summary: "Upside favoured.".into(),
            detailed_analysis: "## Technicals\nBreakout confirmed.".into(),
            key_factors: vec!["ETF inflows".into(), "Halving".into()],
            entry_price: "$64,000".into(),
            take_profit: "$82,000".into(),
            stop_loss: "$59,500".into(),
            predicted_trend: vec![
                TrendPoint {
                    label: "Current".into(),
                    price: 67250.0,
                    annotation: None,
                },
                TrendPoint {
                    label: "Month 1".into(),
                    price: 60525.0,
                    annotation: Some("retest".into()),
                },
            ],
            sources: vec![Source {
                title: "CoinGecko".into(),
                uri: "https://www.coingecko.com".into(),
            }],
        }
    }

    #[test]
    fn test_report_contains_every_section() {
        let text = strip_ansi_codes(&render_analysis(&analysis())).to_string();

        assert!(text.contains("◆ Bitcoin (BTC) ◆  $67,250"));
        assert!(text.contains("[▲ BUY]"));
        assert!(text.contains("Confidence 82%"));
        assert!(text.contains("Risk Level MEDIUM"));
        assert!(text.contains("• ETF inflows"));
        assert!(text.contains("Take Profit  $82,000"));
        assert!(text.contains("-10.00%  retest"));
        assert!(text.contains("Projected change: -10.00%"));
        assert!(text.contains("  Breakout confirmed."));
        assert!(text.contains("1. CoinGecko (https://www.coingecko.com)"));
        assert!(text.ends_with("Not financial advice.\n"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let mut data = analysis();
        data.key_factors.clear();
        data.predicted_trend.clear();
        data.sources.clear();
        let text = strip_ansi_codes(&render_analysis(&data)).to_string();

        assert!(!text.contains("Key Factors"));
        assert!(!text.contains("Price Projection"));
        assert!(!text.contains("Sources"));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(67250.0), "$67,250.00");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(999.5), "$999.50");
        assert_eq!(format_price(0.000123), "$0.000123");
        assert_eq!(format_price(0.5), "$0.5");
    }
}
