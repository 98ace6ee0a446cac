use anyhow::{ Context, Result };

use competitor_monitor::config::MonitorConfig;
use competitor_monitor::implementations::analysis_client::AnalysisClient;
use competitor_monitor::implementations::orchestrator::BatchOrchestrator;
use competitor_monitor::implementations::scraper::HttpSourceFetcher;
use competitor_monitor::traits::source_fetcher::SourceFetcher;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Fetch, analyse and report on every competitor; returns the process exit code
pub async fn execute(
    config: &MonitorConfig,
    urls: &[String],
    concurrency: Option<usize>,
    format: OutputFormat
) -> Result<i32> {
    let urls = if urls.is_empty() { config.competitor_urls.clone() } else { urls.to_vec() };
    if urls.is_empty() {
        anyhow::bail!("No competitor URLs configured");
    }

    let client = AnalysisClient::from_config(&config.api).context(
        "Failed to create analysis client"
    )?;
    let fetcher = HttpSourceFetcher::new(&config.scraper).context("Failed to create page fetcher")?;

    if format == OutputFormat::Text {
        ui::print_header("Competitor Analysis");
        ui::print_info(&format!("Competitors: {}", urls.len()));
    }

    let spinner = ui::spinner_with_message("Fetching competitor pages...");
    let sources = fetcher.fetch_all(&urls).await;
    spinner.set_message("Analysing competitors...");

    let orchestrator = BatchOrchestrator::new(&client).with_concurrency(
        concurrency.unwrap_or(config.analysis_concurrency)
    );
    let report = orchestrator.run(sources).await;
    spinner.finish_and_clear();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for outcome in report.outcomes() {
                ui::print_outcome(outcome);
            }
            ui::print_counts(&report.counts());
        }
    }

    Ok(report.exit_code())
}
