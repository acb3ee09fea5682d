use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Subtitle fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Transcript output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Browser to borrow cookies from when fetching subtitles
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Brave,
    Chrome,
    Chromium,
    Edge,
    Firefox,
    Opera,
    Safari,
    Vivaldi,
}

impl Browser {
    // @returns: Capitalized browser name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Brave => "Brave",
            Self::Chrome => "Chrome",
            Self::Chromium => "Chromium",
            Self::Edge => "Edge",
            Self::Firefox => "Firefox",
            Self::Opera => "Opera",
            Self::Safari => "Safari",
            Self::Vivaldi => "Vivaldi",
        }
    }

    // @returns: Identifier understood by yt-dlp's --cookies-from-browser
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Brave => "brave",
            Self::Chrome => "chrome",
            Self::Chromium => "chromium",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
            Self::Opera => "opera",
            Self::Safari => "safari",
            Self::Vivaldi => "vivaldi",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_arg())
    }
}

impl std::str::FromStr for Browser {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brave" => Ok(Self::Brave),
            "chrome" => Ok(Self::Chrome),
            "chromium" => Ok(Self::Chromium),
            "edge" => Ok(Self::Edge),
            "firefox" => Ok(Self::Firefox),
            "opera" => Ok(Self::Opera),
            "safari" => Ok(Self::Safari),
            "vivaldi" => Ok(Self::Vivaldi),
            _ => Err(anyhow!("Invalid browser: {}", s)),
        }
    }
}

/// Subtitle fetching configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    /// Language requested when none is given on the command line
    #[serde(default = "default_preferred_language")]
    pub preferred_language: String,

    /// Languages tried after the requested one, in order
    #[serde(default = "default_fallback_languages")]
    pub fallback_languages: Vec<String>,

    /// Browser whose cookies are passed to the subtitle tool
    #[serde(default)]
    pub browser: Option<Browser>,

    /// Netscape cookies file, used only when it exists
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,

    /// User agent sent by the subtitle tool
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header sent by the subtitle tool
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Path or name of the yt-dlp executable
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// Directory for downloaded subtitle files
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Subtitle tool timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            preferred_language: default_preferred_language(),
            fallback_languages: default_fallback_languages(),
            browser: None,
            cookie_file: default_cookie_file(),
            user_agent: default_user_agent(),
            referer: default_referer(),
            ytdlp_path: default_ytdlp_path(),
            temp_dir: default_temp_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Transcript output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory where saved transcripts are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Caption lines per paragraph before a forced break
    #[serde(default = "default_max_lines_per_paragraph")]
    pub max_lines_per_paragraph: usize,

    /// File name used when the video has no usable title
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_lines_per_paragraph: default_max_lines_per_paragraph(),
            default_title: default_title(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_preferred_language() -> String {
    "tr".to_string()
}

fn default_fallback_languages() -> Vec<String> {
    vec!["tr".to_string(), "en".to_string()]
}

fn default_cookie_file() -> PathBuf {
    PathBuf::from("cookies.txt")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_referer() -> String {
    "https://www.google.com/".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("subprose")
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_max_lines_per_paragraph() -> usize {
    crate::transcript::DEFAULT_MAX_LINES_PER_PARAGRAPH
}

fn default_title() -> String {
    "altyazi".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.fetch.preferred_language)
            .context("Invalid preferred subtitle language")?;

        for language in &self.fetch.fallback_languages {
            language_utils::validate_language_code(language)
                .context("Invalid fallback subtitle language")?;
        }

        if self.fetch.ytdlp_path.trim().is_empty() {
            return Err(anyhow!("yt-dlp path must not be empty"));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(anyhow!("Fetch timeout must be greater than zero"));
        }

        if self.output.max_lines_per_paragraph == 0 {
            return Err(anyhow!("max_lines_per_paragraph must be at least 1"));
        }

        Ok(())
    }

    /// Languages to request, most preferred first
    pub fn language_priority(&self, selected: Option<&str>) -> Vec<String> {
        let selected = selected.unwrap_or(&self.fetch.preferred_language);
        language_utils::language_priority(selected, &self.fetch.fallback_languages)
    }
}
