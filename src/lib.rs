/*!
 * # subprose - Subtitles to readable prose
 *
 * A Rust library that fetches video subtitles and rewrites them as paragraphs.
 *
 * ## Features
 *
 * - Fetch manual or automatic subtitles for a video URL through yt-dlp
 * - Language priority with fallbacks (requested language, then configured ones)
 * - Cookies from a cookies file or from an installed browser
 * - Clean WebVTT/SRT markup: headers, metadata, cue timings and inline tags
 * - Collapse repeated lines produced by progressive auto-captions
 * - Re-flow captions into paragraphs on sentence ends or a line cap
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: Pure subtitle normalization pipeline
 * - `fetcher`: Subtitle sources (`ytdlp`, `mock`)
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod fetcher;
pub mod file_utils;
pub mod language_utils;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::{Browser, Config};
pub use app_controller::{Controller, Transcript};
pub use errors::{AppError, FetchError};
pub use fetcher::{FetchRequest, FetchedSubtitles, SubtitleFetcher};
pub use transcript::{CleanedTranscript, Paragraph, SubtitleNormalizer, normalize_subtitles};
