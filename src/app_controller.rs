use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Browser, Config};
use crate::fetcher::{FetchRequest, SubtitleFetcher, YtDlpFetcher};
use crate::file_utils::{FileManager, SubtitleFormat};
use crate::language_utils;
use crate::transcript::SubtitleNormalizer;

// @module: Application controller for subtitle fetching and cleaning

/// A cleaned transcript ready to print or save
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Video title, or the source file stem for local files
    pub title: String,

    /// Cleaned paragraph text
    pub content: String,

    /// Subtitle language, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Number of paragraphs in `content`
    #[serde(skip)]
    pub paragraph_count: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Source of raw subtitles
    fetcher: Arc<dyn SubtitleFetcher>,

    // @field: Subtitle cleaner configured from the output settings
    normalizer: SubtitleNormalizer,
}

impl Controller {
    // @method: Create a new controller backed by yt-dlp
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let fetcher = Arc::new(YtDlpFetcher::new(config.fetch.clone()));
        Ok(Self::with_fetcher(config, fetcher))
    }

    // @method: Create a controller with a custom fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn SubtitleFetcher>) -> Self {
        let normalizer = SubtitleNormalizer::new(config.output.max_lines_per_paragraph);
        Self {
            config,
            fetcher,
            normalizer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch subtitles for a video and clean them into paragraphs
    pub async fn fetch_transcript(
        &self,
        url: &str,
        language: Option<&str>,
        browser: Option<Browser>,
    ) -> Result<Transcript> {
        let languages = self.config.language_priority(language);
        if languages.is_empty() {
            return Err(anyhow!("No subtitle language configured"));
        }

        let names: Vec<String> = languages
            .iter()
            .map(|code| language_utils::get_language_name(code).unwrap_or_else(|_| code.clone()))
            .collect();
        info!("Fetching subtitles ({}) for: {}", names.join(", "), url);

        if let Some(browser) = browser.or(self.config.fetch.browser) {
            debug!("Using cookies from: {}", browser.display_name());
        } else {
            debug!("No browser selected, using cookie file or no cookies");
        }

        let request = FetchRequest::new(url, languages).with_browser(browser);
        let spinner = Self::create_spinner("Fetching subtitles");
        let fetched = self.fetcher.fetch(&request).await;
        spinner.finish_and_clear();

        let fetched = fetched.with_context(|| format!("Failed to fetch subtitles for {}", url))?;
        debug!(
            "Fetched {} ({} bytes, language: {})",
            fetched.file_name,
            fetched.raw.len(),
            fetched.language.as_deref().unwrap_or("unknown")
        );

        let cleaned = self.normalizer.normalize(&fetched.raw);
        let content = cleaned.to_text();
        if content.trim().is_empty() {
            warn!("Subtitles for '{}' contained no caption text", fetched.title);
        }
        info!(
            "Cleaned '{}' into {} paragraph(s)",
            fetched.title,
            cleaned.len()
        );

        Ok(Transcript {
            title: fetched.title,
            content,
            language: fetched.language,
            paragraph_count: cleaned.len(),
        })
    }

    /// Clean raw subtitle text with the configured paragraph settings
    pub fn clean_text(&self, raw: &str) -> String {
        self.normalizer.normalize_to_text(raw)
    }

    /// Read a local subtitle file and clean it
    pub fn clean_file<P: AsRef<Path>>(&self, path: P) -> Result<Transcript> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }

        let raw = FileManager::read_to_string(path)?;
        match FileManager::detect_subtitle_format(&raw) {
            SubtitleFormat::Unknown => {
                warn!("{:?} does not look like WebVTT or SRT, cleaning it as plain captions", path)
            }
            format => debug!("Detected {:?} subtitles in {:?}", format, path),
        }

        let cleaned = self.normalizer.normalize(&raw);
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.output.default_title.clone());

        Ok(Transcript {
            title,
            content: cleaned.to_text(),
            language: None,
            paragraph_count: cleaned.len(),
        })
    }

    /// Save a transcript as `<title>.txt`.
    ///
    /// Returns `None` when the file exists and `force_overwrite` is not set.
    pub fn save_transcript(
        &self,
        transcript: &Transcript,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if transcript.content.trim().is_empty() {
            return Err(anyhow!("No content to save for '{}'", transcript.title));
        }

        let output_dir = output_dir.unwrap_or(&self.config.output.output_dir);
        let output_path = FileManager::transcript_output_path(
            output_dir,
            &transcript.title,
            &self.config.output.default_title,
        );

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(None);
        }

        FileManager::write_to_file(&output_path, &transcript.content)?;
        info!("Saved transcript to: {:?}", output_path);

        Ok(Some(output_path))
    }

    fn create_spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}
