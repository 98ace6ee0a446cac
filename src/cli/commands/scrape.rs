use anyhow::{ Context, Result };

use competitor_monitor::config::MonitorConfig;
use competitor_monitor::implementations::scraper::HttpSourceFetcher;
use competitor_monitor::models::outcome::{ OutcomeCounts, PARTIAL_FAILURE_EXIT_CODE };
use competitor_monitor::traits::source_fetcher::SourceFetcher;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Fetch competitor pages and print what was scraped; returns the process exit code
pub async fn execute(config: &MonitorConfig, urls: &[String], format: OutputFormat) -> Result<i32> {
    let urls = if urls.is_empty() { config.competitor_urls.clone() } else { urls.to_vec() };
    let fetcher = HttpSourceFetcher::new(&config.scraper).context("Failed to create page fetcher")?;

    let spinner = ui::spinner_with_message("Fetching competitor pages...");
    let artifacts = fetcher.fetch_all(&urls).await;
    spinner.finish_and_clear();

    let failure = artifacts
        .iter()
        .filter(|a| a.fetch_error().is_some())
        .count();
    let counts = OutcomeCounts {
        success: artifacts.len() - failure,
        failure,
        total: artifacts.len(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&artifacts)?),
        OutputFormat::Text => {
            for artifact in &artifacts {
                ui::print_artifact(artifact);
            }
            ui::print_counts(&counts);
        }
    }

    Ok(if failure == 0 { 0 } else { PARTIAL_FAILURE_EXIT_CODE })
}
