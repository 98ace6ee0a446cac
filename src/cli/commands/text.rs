use anyhow::{ Context, Result };
use std::fs;
use std::path::Path;

use competitor_monitor::config::MonitorConfig;
use competitor_monitor::implementations::analysis_client::AnalysisClient;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Analyse text from a file, or from title/H1/paragraph given on the command line
pub async fn execute(
    config: &MonitorConfig,
    file: Option<&Path>,
    title: Option<&str>,
    h1: Option<&str>,
    paragraph: Option<&str>,
    format: OutputFormat
) -> Result<i32> {
    let client = AnalysisClient::from_config(&config.api).context(
        "Failed to create analysis client"
    )?;

    let spinner = ui::spinner_with_message("Analysing text...");
    let analysis = match file {
        Some(path) => {
            let text = fs
                ::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            client.analyze_text(&text).await
        }
        None => client.analyze_parsed_content(title, h1, paragraph).await,
    };
    spinner.finish_and_clear();
    let analysis = analysis?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => {
            ui::print_header("Text Analysis");
            ui::print_competitor_analysis(&analysis);
        }
    }

    Ok(0)
}
