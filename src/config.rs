//! Configuration management for newsfront using the prefer crate.
//!
//! Settings come from, in increasing priority: built-in defaults, a config
//! file (discovered by prefer or passed with `--config`), `NEWSFRONT_*`
//! environment variables, and the `--data` flag.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::controller::{DataPaths, PageController};
use crate::fetch::{open_fetcher, ResourceFetcher};
use crate::render::{SectionRenderer, DEFAULT_ARTICLE_PAGE};
use crate::utils::{locale_from_env, parse_locale, DateFormatter, DisplayZone};

/// Default user agent for network fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("newsfront/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the data source.
pub const ENV_DATA: &str = "NEWSFRONT_DATA";
/// Environment variable overriding the display locale.
pub const ENV_LOCALE: &str = "NEWSFRONT_LOCALE";
/// Environment variable overriding the display timezone.
pub const ENV_TIMEZONE: &str = "NEWSFRONT_TIMEZONE";

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Data source: a base URL or a site directory.
    pub data: String,
    /// Resource paths relative to the data source.
    pub paths: DataPaths,
    /// Page that article links point to.
    pub article_page: String,
    /// Display locale (None = from the environment).
    pub locale: Option<Locale>,
    /// Display timezone (None = host local time).
    pub timezone: Option<DisplayZone>,
    /// User agent for HTTP requests.
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: ".".to_string(),
            paths: DataPaths::default(),
            article_page: DEFAULT_ARTICLE_PAGE.to_string(),
            locale: None,
            timezone: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Set the display locale from a name such as `en_GB`.
    pub fn set_locale(&mut self, name: &str) -> anyhow::Result<()> {
        let locale = parse_locale(name).with_context(|| format!("Unknown locale: {}", name))?;
        self.locale = Some(locale);
        Ok(())
    }

    /// Set the display timezone from an IANA name such as `Europe/Berlin`.
    pub fn set_timezone(&mut self, name: &str) -> anyhow::Result<()> {
        let zone = DisplayZone::parse(name).with_context(|| format!("Unknown timezone: {}", name))?;
        self.timezone = Some(zone);
        Ok(())
    }

    /// Apply `NEWSFRONT_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|s| !s.is_empty());

        if let Some(data) = lookup(ENV_DATA) {
            tracing::debug!("Using {} from environment: {}", ENV_DATA, data);
            self.data = data;
        }
        if let Some(locale) = lookup(ENV_LOCALE) {
            self.set_locale(&locale)?;
        }
        if let Some(timezone) = lookup(ENV_TIMEZONE) {
            self.set_timezone(&timezone)?;
        }
        Ok(())
    }

    pub fn date_formatter(&self) -> DateFormatter {
        DateFormatter::new(
            self.locale
                .or_else(locale_from_env)
                .unwrap_or(Locale::en_US),
            self.timezone.unwrap_or(DisplayZone::Local),
        )
    }

    pub fn renderer(&self) -> SectionRenderer {
        SectionRenderer::new(self.date_formatter(), self.article_page.clone())
    }

    pub fn fetcher(&self) -> anyhow::Result<Box<dyn ResourceFetcher>> {
        open_fetcher(&self.data, &self.user_agent)
    }

    /// Build a page controller from these settings.
    pub fn controller(&self) -> anyhow::Result<PageController> {
        let fetcher = self.fetcher()?;
        Ok(PageController::new(fetcher.into(), self.renderer()).with_paths(self.paths.clone()))
    }
}

/// Configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data source: base URL or directory (relative to the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Path the config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no file is found or it can't be read.
    pub async fn load() -> Self {
        match prefer::load("newsfront").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {:#}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).context("Failed to parse TOML config")?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
            }
            _ => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory relative data paths are resolved against.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a data source that may be relative to the config file.
    /// - URLs and absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_data(&self, data: &str, base_dir: &Path) -> String {
        if data.starts_with("http://") || data.starts_with("https://") {
            return data.to_string();
        }

        let expanded = shellexpand::tilde(data);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.display().to_string()
        } else {
            base_dir.join(path).display().to_string()
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) -> anyhow::Result<()> {
        if let Some(ref data) = self.data {
            settings.data = self.resolve_data(data, base_dir);
        }
        if let Some(ref path) = self.articles_path {
            settings.paths.articles = path.clone();
        }
        if let Some(ref path) = self.events_path {
            settings.paths.events = path.clone();
        }
        if let Some(ref page) = self.article_page {
            settings.article_page = page.clone();
        }
        if let Some(ref locale) = self.locale {
            settings.set_locale(locale)?;
        }
        if let Some(ref timezone) = self.timezone {
            settings.set_timezone(timezone)?;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        Ok(())
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data source override (--data flag).
    pub data: Option<String>,
}

/// Load settings with explicit options.
pub async fn load_settings_with_options(options: LoadOptions) -> anyhow::Result<Settings> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    if let Some(ref path) = config.source_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir)?;
    settings.apply_env(|key| std::env::var(key).ok())?;

    if let Some(data) = options.data {
        settings.data = data;
    }

    Ok(settings)
}
