/*!
 * Tests for batch fan-out, failure isolation, and cancellation
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use whisub::app_config::LogLevel;
use whisub::{BatchConverter, CancellationToken, Config, Controller};

use crate::common;

/// One bad file must not affect its neighbors; every file is attempted
#[tokio::test]
async fn test_convert_all_withOneBadFile_shouldIsolateItsFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    let good_a = common::create_test_transcript(dir, "a.json")?;
    let bad = common::create_test_file(dir, "b.json", "{ not json")?;
    let good_c = common::create_test_transcript(dir, "c.json")?;

    let converter = BatchConverter::new(2);
    let outcomes = converter
        .convert_all(
            &[good_a.clone(), bad.clone(), good_c.clone()],
            &CancellationToken::new(),
            |_, _| {},
        )
        .await;

    assert_eq!(outcomes.len(), 3);

    // Outcomes come back in input order
    assert_eq!(outcomes[0].input, good_a);
    assert_eq!(outcomes[1].input, bad);
    assert_eq!(outcomes[2].input, good_c);

    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_err());
    assert!(outcomes[2].result.is_ok());

    assert!(dir.join("a.srt").exists());
    assert!(!dir.join("b.srt").exists());
    assert!(dir.join("c.srt").exists());
    Ok(())
}

/// The progress callback reports every attempted file exactly once
#[tokio::test]
async fn test_convert_all_withProgressCallback_shouldReportEachFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    let files: Vec<PathBuf> = (0..5)
        .map(|i| common::create_test_transcript(dir, &format!("f{}.json", i)))
        .collect::<Result<_>>()?;

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let converter = BatchConverter::new(3);
    let outcomes = converter
        .convert_all(&files, &CancellationToken::new(), move |completed, total| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            assert!(completed >= 1 && completed <= total);
            assert_eq!(total, 5);
        })
        .await;

    assert_eq!(outcomes.len(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    Ok(())
}

/// A pre-cancelled batch attempts every file but converts none
#[tokio::test]
async fn test_convert_all_withCancelledToken_shouldAbandonAllFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    let files = vec![
        common::create_test_transcript(dir, "a.json")?,
        common::create_test_transcript(dir, "b.json")?,
    ];

    let cancel = CancellationToken::new();
    cancel.cancel();

    let converter = BatchConverter::new(2);
    let outcomes = converter.convert_all(&files, &cancel, |_, _| {}).await;

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        let err = outcome.result.as_ref().unwrap_err();
        assert!(err.is_cancelled());
    }
    assert!(!dir.join("a.srt").exists());
    assert!(!dir.join("b.srt").exists());
    Ok(())
}

/// A zero concurrency request is clamped to one worker
#[test]
fn test_new_withZeroWorkers_shouldClampToOne() {
    let converter = BatchConverter::new(0);
    assert_eq!(converter.max_concurrent_tasks(), 1);
}

/// Controller end-to-end: discovery, conversion, and aggregate summary
#[tokio::test]
async fn test_run_withMixedDirectory_shouldReportAggregateCounts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    common::create_test_transcript(dir, "a.json")?;
    common::create_test_file(dir, "b.json", r#"{"no_transcription_here": true}"#)?;
    common::create_test_file(dir, "ignored.txt", "not a transcript")?;

    let controller = Controller::with_config(Config {
        log_level: LogLevel::Error,
        max_concurrent_tasks: Some(2),
    })?;

    let summary = controller.run(dir.to_path_buf()).await?;

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.cancelled, 0);

    assert!(dir.join("a.srt").exists());
    assert!(!dir.join("b.srt").exists());
    Ok(())
}

/// An empty directory is a normal, zero-work completion
#[tokio::test]
async fn test_run_withNoJsonFiles_shouldCompleteWithEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "# nothing to convert")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path().to_path_buf()).await?;

    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.succeeded, 0);
    Ok(())
}

/// A missing input directory is an error for the run as a whole
#[tokio::test]
async fn test_run_withMissingDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("not-there");

    let controller = Controller::with_config(Config::default())?;
    assert!(controller.run(missing).await.is_err());
    Ok(())
}

/// Generated subtitles are themselves stable across repeated runs
#[tokio::test]
async fn test_run_withRepeatedRuns_shouldOverwriteDeterministically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_transcript(dir, "a.json")?;

    let controller = Controller::with_config(Config {
        log_level: LogLevel::Error,
        max_concurrent_tasks: Some(1),
    })?;

    controller.run(dir.to_path_buf()).await?;
    let first = fs::read(dir.join("a.srt"))?;

    controller.run(dir.to_path_buf()).await?;
    let second = fs::read(dir.join("a.srt"))?;

    assert_eq!(first, second);
    Ok(())
}
