/*!
 * Mock subtitle fetcher for testing.
 *
 * - `MockFetcher::returning()` - Always succeeds with a fixed document
 * - `MockFetcher::failing()` - Always fails with the given behavior
 */

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::FetchError;
use crate::fetcher::{FetchRequest, FetchedSubtitles, SubtitleFetcher};

/// Behavior mode for the mock fetcher
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Succeeds with the given subtitles
    Returns(FetchedSubtitles),
    /// Fails as if the video had no subtitles
    NoSubtitles,
    /// Fails as if the platform returned HTTP 429
    RateLimited,
    /// Fails as if yt-dlp were not installed
    ToolMissing,
}

/// Mock fetcher that records the requests it receives
#[derive(Debug)]
pub struct MockFetcher {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<FetchRequest>>,
}

impl MockFetcher {
    pub fn new(behavior: MockBehavior) -> Self {
        MockFetcher {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Mock that returns `raw` as a VTT file titled `title`
    pub fn returning(title: &str, raw: &str) -> Self {
        Self::new(MockBehavior::Returns(FetchedSubtitles {
            title: title.to_string(),
            language: Some("en".to_string()),
            file_name: "mock.en.vtt".to_string(),
            raw: raw.to_string(),
        }))
    }

    pub fn failing(behavior: MockBehavior) -> Self {
        Self::new(behavior)
    }

    /// Number of fetch calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<FetchRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SubtitleFetcher for MockFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedSubtitles, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        match &self.behavior {
            MockBehavior::Returns(subtitles) => Ok(subtitles.clone()),
            MockBehavior::NoSubtitles => Err(FetchError::NoSubtitles(request.url.clone())),
            MockBehavior::RateLimited => {
                Err(FetchError::RateLimited("HTTP Error 429: Too Many Requests".to_string()))
            }
            MockBehavior::ToolMissing => Err(FetchError::ToolNotFound("yt-dlp".to_string())),
        }
    }
}
