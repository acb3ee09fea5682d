/*!
 * Subtitle fetchers that turn a video URL into raw subtitle text.
 *
 * - `ytdlp`: runs the external yt-dlp tool
 * - `mock`: canned responses for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::Browser;
use crate::errors::FetchError;

pub mod mock;
pub mod ytdlp;

pub use self::mock::{MockBehavior, MockFetcher};
pub use self::ytdlp::YtDlpFetcher;

/// Title used when the tool reports none
pub const DEFAULT_VIDEO_TITLE: &str = "Video";

/// A request for the subtitles of one video
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Video page URL
    pub url: String,
    /// Subtitle languages, most preferred first
    pub languages: Vec<String>,
    /// Browser to take cookies from
    pub browser: Option<Browser>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, languages: Vec<String>) -> Self {
        FetchRequest {
            url: url.into(),
            languages,
            browser: None,
        }
    }

    pub fn with_browser(mut self, browser: Option<Browser>) -> Self {
        self.browser = browser;
        self
    }
}

/// Raw subtitles returned by a fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSubtitles {
    /// Video title
    pub title: String,
    /// Language of the subtitle track, when it could be determined
    pub language: Option<String>,
    /// Name of the subtitle file the text was read from
    pub file_name: String,
    /// Subtitle markup decoded as UTF-8
    pub raw: String,
}

/// Common trait for all subtitle sources
///
/// Implementations own every I/O concern: process execution, temp files and
/// decoding. Callers receive decoded text ready for normalization.
#[async_trait]
pub trait SubtitleFetcher: Send + Sync + Debug {
    /// Fetch subtitles for the request's URL in the first available language
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedSubtitles, FetchError>;
}
