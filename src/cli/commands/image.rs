use anyhow::{ Context, Result };
use std::fs;
use std::path::Path;

use competitor_monitor::config::MonitorConfig;
use competitor_monitor::implementations::analysis_client::AnalysisClient;
use competitor_monitor::implementations::prompts::detect_image_mime;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Analyse a single image file with the vision model
pub async fn execute(
    config: &MonitorConfig,
    path: &Path,
    mime_type: Option<&str>,
    format: OutputFormat
) -> Result<i32> {
    let image = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if image.is_empty() {
        anyhow::bail!("Image file {} is empty", path.display());
    }
    let mime_type = mime_type.unwrap_or_else(|| detect_image_mime(&image));

    let client = AnalysisClient::from_config(&config.api).context(
        "Failed to create analysis client"
    )?;

    let spinner = ui::spinner_with_message("Analysing image...");
    let analysis = client.analyze_image(&image, mime_type).await;
    spinner.finish_and_clear();
    let analysis = analysis?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => {
            ui::print_header("Image Analysis");
            ui::print_image_analysis(&analysis);
        }
    }

    Ok(0)
}
