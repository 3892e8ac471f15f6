// Async digests over real tokio files
#![cfg(feature = "async-io")]

use std::io::Write;

use digestrs::{AlgorithmSet, DigestConfig, SessionOutcome, compute_for_text, digest_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::test]
async fn test_tokio_file_matches_text() {
    let data: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let handle = tokio::fs::File::open(file.path()).await.unwrap();
    let size = handle.metadata().await.unwrap().len();
    let mut reports = 0;

    let outcome = digest_async(
        handle.compat(),
        size,
        AlgorithmSet::all(),
        DigestConfig::default().with_chunk_size(64 * 1024),
    )
    .unwrap()
    .with_progress(|_| reports += 1)
    .await
    .unwrap();

    let expected = compute_for_text(&data, AlgorithmSet::all()).unwrap();
    assert_eq!(outcome, SessionOutcome::Completed(expected));
    assert_eq!(reports, 5);
}

#[tokio::test]
async fn test_tokio_file_shorter_than_declared() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"short").unwrap();
    file.flush().unwrap();

    let handle = tokio::fs::File::open(file.path()).await.unwrap();
    let err = digest_async(handle.compat(), 100, AlgorithmSet::all(), DigestConfig::default())
        .unwrap()
        .await
        .unwrap_err();
    assert!(err.is_read_failure());
}
