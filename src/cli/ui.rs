use colored::*;
use console::Term;
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use competitor_monitor::models::analysis::{ CompetitorAnalysis, ImageAnalysis };
use competitor_monitor::models::outcome::{ AnalysisOutcome, OutcomeCounts };
use competitor_monitor::models::source::SourceArtifact;

const SEPARATOR_WIDTH: usize = 60;

fn terminal_width() -> usize {
    let width = Term::stdout().size().1 as usize;
    if width == 0 { 80 } else { width }
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping and an indent
pub fn print_wrapped(text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in text.lines() {
        for wrapped_line in wrap(line, terminal_width().saturating_sub(indent + 2).max(20)) {
            println!("{}{}", pad, wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("  {}: {}", label.bold(), value);
}

pub fn print_separator() {
    println!("{}", "-".repeat(SEPARATOR_WIDTH).dimmed());
}

/// Trim and shorten a value for one-line display
pub fn clip(value: Option<&str>, limit: usize) -> String {
    let value = match value {
        Some(v) => v.trim(),
        None => return String::new(),
    };
    match value.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &value[..idx]),
        None => value.to_string(),
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}:", label.bold());
    for item in items {
        print_wrapped(&format!("- {}", item), 4);
    }
}

pub fn print_competitor_analysis(analysis: &CompetitorAnalysis) {
    print_list("Strengths", &analysis.strengths);
    print_list("Weaknesses", &analysis.weaknesses);
    print_list("Unique offers", &analysis.unique_offers);
    print_list("Recommendations", &analysis.recommendations);
    if !analysis.summary.is_empty() {
        println!("  {}:", "Summary".bold());
        print_wrapped(&analysis.summary, 4);
    }
}

pub fn print_image_analysis(analysis: &ImageAnalysis) {
    if !analysis.description.is_empty() {
        println!("  {}:", "Description".bold());
        print_wrapped(&analysis.description, 4);
    }
    print_list("Marketing insights", &analysis.marketing_insights);
    print_result("Visual style score", &format!("{}/10", analysis.visual_style_score));
    if !analysis.visual_style_analysis.is_empty() {
        println!("  {}:", "Visual style".bold());
        print_wrapped(&analysis.visual_style_analysis, 4);
    }
    print_list("Recommendations", &analysis.recommendations);
}

/// Print one analysed source
pub fn print_outcome(outcome: &AnalysisOutcome) {
    println!("{} {}", "URL:".bold(), outcome.url());
    match outcome {
        AnalysisOutcome::Success { analysis, .. } => {
            println!("  status: {}", "OK".green().bold());
            print_competitor_analysis(analysis);
        }
        AnalysisOutcome::Failure { kind, error, .. } => {
            println!("  status: {} ({})", "ERROR".red().bold(), kind);
            println!("  error:  {}", error);
        }
    }
    print_separator();
}

/// Print one scraped source without analysis
pub fn print_artifact(artifact: &SourceArtifact) {
    println!("{} {}", "URL:".bold(), artifact.url);
    match artifact.fetch_error() {
        Some(error) => {
            println!("  status: {}", "ERROR".red().bold());
            println!("  error:  {}", error);
        }
        None => {
            println!("  status: {}", "OK".green().bold());
            println!("  title:  {}", clip(artifact.title.as_deref(), 120));
            println!("  h1:     {}", clip(artifact.h1.as_deref(), 120));
            println!("  text:   {}", clip(artifact.first_paragraph.as_deref(), 180));
            let kb = artifact.screenshot().map(|s| (s.len() as f64) / 1024.0).unwrap_or(0.0);
            println!("  shot:   {:.1} KB", kb);
        }
    }
    print_separator();
}

pub fn print_counts(counts: &OutcomeCounts) {
    let line = format!("Done. OK={}, ERROR={}, TOTAL={}", counts.success, counts.failure, counts.total);
    if counts.failure == 0 {
        print_success(&line);
    } else {
        print_warning(&line);
    }
}

pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
