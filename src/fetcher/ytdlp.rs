/*!
 * yt-dlp subtitle fetcher.
 *
 * Each request gets a unique id used as the file name prefix inside the temp
 * directory. yt-dlp writes `<id>.<lang>.<ext>` files there; the best match for
 * the language priority is read and every file of the request is removed
 * afterwards.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use url::Url;
use uuid::Uuid;

use crate::app_config::FetchConfig;
use crate::errors::FetchError;
use crate::fetcher::{DEFAULT_VIDEO_TITLE, FetchRequest, FetchedSubtitles, SubtitleFetcher};
use crate::file_utils::FileManager;

/// Fetcher backed by the yt-dlp command-line tool
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    config: FetchConfig,
}

impl YtDlpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        YtDlpFetcher { config }
    }

    /// Check that the URL is an absolute http(s) URL with a host
    pub fn validate_url(url: &str) -> Result<Url, FetchError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(FetchError::InvalidUrl("URL is required".to_string()));
        }

        let parsed = Url::parse(trimmed)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(FetchError::InvalidUrl(format!("{} is not an http(s) URL", trimmed)));
        }

        Ok(parsed)
    }

    /// Build the yt-dlp argument list for a request
    pub fn build_args(&self, request: &FetchRequest, url: &Url, output_template: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--skip-download".into(),
            "--write-subs".into(),
            "--write-auto-subs".into(),
            "--sub-langs".into(),
            request.languages.join(","),
            "--sub-format".into(),
            "vtt/srt/best".into(),
            "--no-warnings".into(),
            "--user-agent".into(),
            self.config.user_agent.clone(),
            "--referer".into(),
            self.config.referer.clone(),
        ];

        if self.config.cookie_file.is_file() {
            args.push("--cookies".into());
            args.push(self.config.cookie_file.to_string_lossy().into_owned());
        }

        if let Some(browser) = request.browser.or(self.config.browser) {
            args.push("--cookies-from-browser".into());
            args.push(browser.as_arg().into());
        }

        // --print implies --simulate; --no-simulate keeps subtitle writing enabled
        args.extend([
            "--print".into(),
            "title".into(),
            "--no-simulate".into(),
            "-o".into(),
            output_template.to_string_lossy().into_owned(),
            url.as_str().to_string(),
        ]);

        args
    }

    /// Pick the subtitle file for the most preferred available language.
    ///
    /// Falls back to any file of the request when no language matches.
    pub fn locate_subtitle_file(
        files: &[PathBuf],
        request_id: &str,
        languages: &[String],
    ) -> Option<(PathBuf, Option<String>)> {
        let file_name = |path: &PathBuf| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let own_files: Vec<&PathBuf> = files
            .iter()
            .filter(|path| file_name(path).starts_with(request_id))
            .collect();

        for language in languages {
            let marker = format!(".{}.", language);
            if let Some(found) = own_files.iter().find(|path| file_name(path).contains(&marker)) {
                return Some(((*found).clone(), Some(language.clone())));
            }
        }

        own_files.first().map(|path| {
            let language = Self::language_from_file_name(&file_name(path), request_id);
            ((*path).clone(), language)
        })
    }

    /// Language tag between the request id and the extension (`<id>.<lang>.<ext>`)
    pub fn language_from_file_name(file_name: &str, request_id: &str) -> Option<String> {
        let rest = file_name.strip_prefix(request_id)?.strip_prefix('.')?;
        let (language, _extension) = rest.rsplit_once('.')?;
        if language.is_empty() {
            None
        } else {
            Some(language.to_string())
        }
    }

    /// Video title from the tool's stdout (first non-empty line)
    pub fn parse_title(stdout: &str) -> String {
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(DEFAULT_VIDEO_TITLE)
            .to_string()
    }

    /// Map a failed run to an error, keeping only meaningful output lines
    pub fn classify_failure(status: &str, stderr: &str) -> FetchError {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let message = if meaningful.is_empty() {
            "no error output".to_string()
        } else {
            meaningful.join("\n")
        };

        if message.contains("429") {
            FetchError::RateLimited(message)
        } else {
            FetchError::ToolFailed {
                status: status.to_string(),
                message,
            }
        }
    }

    async fn run_tool(&self, args: &[String]) -> Result<Output, FetchError> {
        let tool_future = Command::new(&self.config.ytdlp_path)
            .args(args)
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        tokio::select! {
            result = tool_future => {
                result.map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => FetchError::ToolNotFound(format!(
                        "{} ({}); install yt-dlp or set fetch.ytdlp_path",
                        self.config.ytdlp_path, e
                    )),
                    _ => FetchError::Io(e),
                })
            },
            _ = tokio::time::sleep(timeout_duration) => {
                Err(FetchError::Timeout(self.config.timeout_secs))
            }
        }
    }

    fn cleanup(&self, request_id: &str) {
        match FileManager::remove_files_with_prefix(&self.config.temp_dir, request_id) {
            Ok(0) => {}
            Ok(count) => debug!("Removed {} temp file(s) for request {}", count, request_id),
            Err(e) => warn!("Failed to clean up temp files for request {}: {}", request_id, e),
        }
    }

    async fn fetch_with_id(&self, request: &FetchRequest, url: &Url, request_id: &str) -> Result<FetchedSubtitles, FetchError> {
        let output_template = self.config.temp_dir.join(format!("{}.%(ext)s", request_id));
        let args = self.build_args(request, url, &output_template);
        debug!("Running {} {}", self.config.ytdlp_path, args.join(" "));

        let output = self.run_tool(&args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::classify_failure(&output.status.to_string(), &stderr));
        }

        let files = FileManager::find_files_with_prefix(&self.config.temp_dir, request_id)
            .map_err(|e| FetchError::Io(std::io::Error::other(e.to_string())))?;

        let (path, language) = Self::locate_subtitle_file(&files, request_id, &request.languages)
            .ok_or_else(|| FetchError::NoSubtitles(url.to_string()))?;

        let bytes = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FetchedSubtitles {
            title: Self::parse_title(&String::from_utf8_lossy(&output.stdout)),
            language,
            file_name,
            raw: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

#[async_trait]
impl SubtitleFetcher for YtDlpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedSubtitles, FetchError> {
        let url = Self::validate_url(&request.url)?;

        tokio::fs::create_dir_all(&self.config.temp_dir).await?;

        let request_id = Uuid::new_v4().to_string();
        let result = self.fetch_with_id(request, &url, &request_id).await;
        self.cleanup(&request_id);

        result
    }
}
