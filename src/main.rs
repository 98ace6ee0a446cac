use anyhow::Result;
use clap::Parser;
use log::{ error, info };

use competitor_monitor::config::MonitorConfig;

mod cli;
use cli::{ Commands, MonitorCli };

#[tokio::main]
async fn main() {
    // Parse the command line arguments
    let cli = MonitorCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            cli::ui::print_error(&format!("{:#}", e));
            1
        }
    };

    std::process::exit(code);
}

async fn run(cli: &MonitorCli) -> Result<i32> {
    let config = MonitorConfig::load(cli.config.as_deref())?;
    let format = cli.output_format;

    match &cli.command {
        Commands::Run { url, concurrency } => {
            cli::commands::run::execute(&config, url, *concurrency, format).await
        }

        Commands::Scrape { url } => cli::commands::scrape::execute(&config, url, format).await,

        Commands::Text { file, title, h1, paragraph } => {
            cli::commands::text::execute(
                &config,
                file.as_deref(),
                title.as_deref(),
                h1.as_deref(),
                paragraph.as_deref(),
                format
            ).await
        }

        Commands::Image { path, mime_type } => {
            cli::commands::image::execute(&config, path, mime_type.as_deref(), format).await
        }
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder
        ::new()
        .filter_level(level)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper", log::LevelFilter::Warn)
        .init();

    info!("Logger initialized with level: {}", log_level);
}
