use clap::{ Parser, Subcommand, ValueEnum };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "competitor-monitor",
    about = "Competitive-intelligence reports for regional news sites",
    version,
    author,
    long_about = None
)]
pub struct MonitorCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every competitor site, analyse it and print the report
    Run {
        /// Analyse these URLs instead of the configured competitors
        #[arg(short, long)]
        url: Vec<String>,

        /// Number of sources analysed at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Fetch competitor sites and print what was scraped, without analysis
    Scrape {
        /// Fetch these URLs instead of the configured competitors
        #[arg(short, long)]
        url: Vec<String>,
    },

    /// Analyse page text given on the command line or in a file
    Text {
        /// File with the text to analyse
        #[arg(short, long, conflicts_with_all = ["title", "h1", "paragraph"])]
        file: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Main page heading
        #[arg(long)]
        h1: Option<String>,

        /// First paragraph of the page
        #[arg(long)]
        paragraph: Option<String>,
    },

    /// Analyse a screenshot or banner image
    Image {
        /// Path to the image file
        path: PathBuf,

        /// MIME type; detected from the file contents when omitted
        #[arg(long)]
        mime_type: Option<String>,
    },
}
