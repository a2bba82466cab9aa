//! Library half of the aeolens CLI
//!
//! Argument parsing, rendering and file output live here so they can be
//! tested without spawning the binary.

pub mod args;
pub mod logging;
pub mod output;
pub mod render;

use aeolens_core::{
    AnalysisReport, AnalysisSession, SampleAnalyzer, SampleAnalyzerConfig, SessionConfig,
};
use anyhow::{Context, Result};

use crate::args::{AnalyzeArgs, Cli, Commands, ShowArgs, ViewArgs};
use crate::render::render_markdown;

/// Run one CLI invocation, returning everything meant for stdout.
pub async fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Analyze(args) => analyze(args).await,
        Commands::Show(args) => show(args),
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<String> {
    let analyzer = SampleAnalyzer::new(SampleAnalyzerConfig {
        latency: args.delay(),
        timestamp: None,
    });
    let session = AnalysisSession::with_config(
        analyzer,
        SessionConfig {
            timeout: args.timeout(),
        },
    );

    let report = session.submit(&args.url).await?;
    let mut output = present(&report, &args.view)?;

    if let Some(base) = args.save.as_deref() {
        let path = output::save_report(base, &report)?;
        output.push_str(&format!("\nWrote report to {}\n", path.display()));
    }

    Ok(output)
}

fn show(args: ShowArgs) -> Result<String> {
    let report = output::load_report(&args.file)?;
    present(&report, &args.view)
}

fn present(report: &AnalysisReport, view: &ViewArgs) -> Result<String> {
    let options = view.options();
    if view.json {
        // Filters still validate so `--top -1 --json` fails like markdown does.
        let recommendations = render::select_recommendations(report, &options)?;
        let filtered = AnalysisReport {
            prioritized_recommendations: recommendations,
            ..report.clone()
        };
        let mut json = filtered.to_json_pretty().context("failed to serialize report")?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_markdown(report, &options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("aeolens").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn analyze_prints_markdown() {
        let output = run(cli(&["analyze", "example.com"])).await.unwrap();
        assert!(output.contains("https://example.com"));
        assert!(output.contains("🛠️ Recommendations"));
    }

    #[tokio::test]
    async fn analyze_json_applies_filters() {
        let output = run(cli(&["analyze", "example.com", "--json", "--category", "aeo"]))
            .await
            .unwrap();
        let report = AnalysisReport::from_json(&output).unwrap();
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.prioritized_recommendations.len(), 2);
    }

    #[tokio::test]
    async fn analyze_rejects_empty_url() {
        let err = run(cli(&["analyze", "  "])).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a URL");
    }
}
