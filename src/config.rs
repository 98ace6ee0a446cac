use log::{ debug, info };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.proxyapi.ru/openai/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required API key: set {0}")]
    MissingApiKey(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Connection and generation settings for the OpenAI-compatible endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// API key, usually supplied through PROXY_API_KEY
    pub api_key: Option<String>,

    /// Base URL; `/chat/completions` is appended
    pub base_url: String,

    /// Model used for text-only analysis
    pub text_model: String,

    /// Model used for screenshot and image analysis
    pub vision_model: String,

    pub temperature: f32,

    pub text_max_tokens: u32,

    pub image_max_tokens: u32,

    pub combined_max_tokens: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_MODEL.to_string(),
            vision_model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            text_max_tokens: 2000,
            image_max_tokens: 2000,
            combined_max_tokens: 3000,
            request_timeout_secs: 120,
        }
    }
}

impl ApiConfig {
    /// The API key, or an error naming the variable that should hold it
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey("PROXY_API_KEY".to_string())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Key suitable for logs: only the last four characters are shown
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("**********...{}", tail)
            }
            _ => "not set".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScraperConfig {
    /// Page load timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Browserless base URL used for screenshots; no screenshots when unset
    pub browserless_url: Option<String>,

    pub browserless_token: Option<String>,

    /// How many pages are fetched at once
    pub concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 40,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browserless_url: None,
            browserless_token: None,
            concurrency: 4,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level settings for a monitoring run
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorConfig {
    pub api: ApiConfig,

    pub scraper: ScraperConfig,

    /// Competitor sites analysed on every run
    pub competitor_urls: Vec<String>,

    /// How many sources are analysed at once; 1 keeps the batch sequential
    pub analysis_concurrency: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scraper: ScraperConfig::default(),
            competitor_urls: vec![
                "https://www.chita.ru/".to_string(),
                "https://zab.ru/".to_string(),
                "https://zabnews.ru/".to_string(),
                "https://www.mkchita.ru/".to_string()
            ],
            analysis_concurrency: 1,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Read the optional config file, then apply `.env` and process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment variables from .env file");
        }

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("PROXY_API_KEY") {
            self.api.api_key = Some(key);
        }
        if let Some(url) = get("PROXY_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.api.text_model = model;
        }
        if let Some(model) = get("OPENAI_VISION_MODEL") {
            self.api.vision_model = model;
        }
        if let Some(urls) = get("COMPETITOR_URLS") {
            self.competitor_urls = parse_url_list(&urls);
        }
        if let Some(url) = get("BROWSERLESS_URL") {
            self.scraper.browserless_url = Some(url);
        }
        if let Some(token) = get("BROWSERLESS_TOKEN") {
            self.scraper.browserless_token = Some(token);
        }
        if let Some(value) = get("ANALYSIS_CONCURRENCY") {
            self.analysis_concurrency = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "ANALYSIS_CONCURRENCY".to_string(),
                    value: value.clone(),
                })?;
        }

        Ok(())
    }
}

/// Split a comma or newline separated URL list, dropping blanks
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
