/*!
 * Integration tests for the fetch-clean-save lifecycle
 */

use anyhow::Result;
use std::sync::Arc;
use subprose::app_config::{Browser, Config};
use subprose::app_controller::{Controller, Transcript};
use subprose::errors::FetchError;
use subprose::fetcher::{MockBehavior, MockFetcher};
use subprose::file_utils::FileManager;
use crate::common;

fn test_config(output_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.output.output_dir = output_dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_fetch_transcript_withMockFetcher_shouldCleanSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fetcher = Arc::new(MockFetcher::returning("Rust Talk", common::PROGRESSIVE_VTT));
    let controller = Controller::with_fetcher(test_config(temp_dir.path()), fetcher.clone());

    let transcript = controller.fetch_transcript("https://youtu.be/abc", None, None).await?;

    assert_eq!(transcript.title, "Rust Talk");
    assert_eq!(transcript.content, common::PROGRESSIVE_VTT_CLEANED);
    assert_eq!(transcript.language.as_deref(), Some("en"));
    assert_eq!(fetcher.call_count(), 1);
    Ok(())
}

/// The selected language is tried first, followed by the configured fallbacks
#[tokio::test]
async fn test_fetch_transcript_withSelectedLanguage_shouldRequestPriorityList() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fetcher = Arc::new(MockFetcher::returning("Talk", "Hi.\n"));
    let controller = Controller::with_fetcher(test_config(temp_dir.path()), fetcher.clone());

    controller
        .fetch_transcript("https://youtu.be/abc", Some("de"), Some(Browser::Firefox))
        .await?;
    let request = fetcher.last_request().unwrap();
    assert_eq!(request.languages, vec!["de", "tr", "en"]);
    assert_eq!(request.browser, Some(Browser::Firefox));
    assert_eq!(request.url, "https://youtu.be/abc");

    controller.fetch_transcript("https://youtu.be/abc", None, None).await?;
    assert_eq!(fetcher.last_request().unwrap().languages, vec!["tr", "en"]);
    Ok(())
}

#[tokio::test]
async fn test_fetch_transcript_withConfiguredBrowser_shouldFallBackToConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = test_config(temp_dir.path());
    config.fetch.browser = Some(Browser::Chrome);
    let fetcher = Arc::new(MockFetcher::returning("Talk", "Hi.\n"));
    let controller = Controller::with_fetcher(config, fetcher.clone());

    controller.fetch_transcript("https://youtu.be/abc", None, None).await?;

    // The request carries only the explicit choice; the fetcher applies the config default
    assert_eq!(fetcher.last_request().unwrap().browser, None);
    Ok(())
}

#[test]
fn test_fetch_transcript_withRateLimit_shouldPropagateFetchError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_fetcher(
        test_config(temp_dir.path()),
        Arc::new(MockFetcher::failing(MockBehavior::RateLimited)),
    );

    let err = tokio_test::block_on(controller.fetch_transcript("https://youtu.be/abc", None, None))
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Failed to fetch subtitles for https://youtu.be/abc"));
    assert!(message.contains("429"));
    assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::RateLimited(_))));
    Ok(())
}

#[test]
fn test_fetch_transcript_withoutSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_fetcher(
        test_config(temp_dir.path()),
        Arc::new(MockFetcher::failing(MockBehavior::NoSubtitles)),
    );

    let err = tokio_test::block_on(controller.fetch_transcript("https://youtu.be/abc", None, None))
        .unwrap_err();

    assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::NoSubtitles(_))));
    Ok(())
}

#[tokio::test]
async fn test_save_transcript_withExistingFile_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fetcher = Arc::new(MockFetcher::returning("My: Talk?", "Hello.\n"));
    let controller = Controller::with_fetcher(test_config(temp_dir.path()), fetcher);

    let transcript = controller.fetch_transcript("https://youtu.be/abc", None, None).await?;
    let expected = temp_dir.path().join("My_ Talk_.txt");

    assert_eq!(controller.save_transcript(&transcript, None, false)?, Some(expected.clone()));

    FileManager::write_to_file(&expected, "stale")?;
    assert_eq!(controller.save_transcript(&transcript, None, false)?, None);
    assert_eq!(FileManager::read_to_string(&expected)?, "stale");

    assert_eq!(controller.save_transcript(&transcript, None, true)?, Some(expected.clone()));
    assert_eq!(FileManager::read_to_string(&expected)?, "Hello.");
    Ok(())
}

#[test]
fn test_save_transcript_withEmptyContent_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_fetcher(
        test_config(temp_dir.path()),
        Arc::new(MockFetcher::returning("Empty", "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n")),
    );

    let transcript = tokio_test::block_on(controller.fetch_transcript("https://youtu.be/abc", None, None))?;
    assert!(transcript.content.is_empty());

    let err = controller.save_transcript(&transcript, None, false).unwrap_err();
    assert!(err.to_string().contains("No content to save"));
    assert!(FileManager::find_files_with_prefix(temp_dir.path(), "Empty")?.is_empty());
    Ok(())
}

#[test]
fn test_save_transcript_withBlankTitle_shouldUseDefaultTitle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_fetcher(
        test_config(temp_dir.path()),
        Arc::new(MockFetcher::returning("unused", "")),
    );
    let transcript = Transcript {
        title: "   ".to_string(),
        content: "Some text.".to_string(),
        language: None,
        paragraph_count: 1,
    };

    let saved = controller.save_transcript(&transcript, None, false)?;

    assert_eq!(saved, Some(temp_dir.path().join("altyazi.txt")));
    Ok(())
}

#[test]
fn test_transcript_json_shouldContainTitleAndContent() -> Result<()> {
    let transcript = Transcript {
        title: "Talk".to_string(),
        content: "One.\n\nTwo.".to_string(),
        language: None,
        paragraph_count: 2,
    };

    let json: serde_json::Value = serde_json::to_value(&transcript)?;

    assert_eq!(json, serde_json::json!({ "title": "Talk", "content": "One.\n\nTwo." }));
    Ok(())
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.output.max_lines_per_paragraph = 0;
    assert!(Controller::with_config(config).is_err());
}
