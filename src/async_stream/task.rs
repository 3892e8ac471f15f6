//! Async digest session.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::algorithm::AlgorithmSet;
use crate::config::DigestConfig;
use crate::digest::DigestSet;
use crate::engine::{CancelToken, SessionOutcome};
use crate::error::DigestError;
use crate::progress::Progress;

use super::AsyncChunkReader;

fn ignore_progress(_: Progress) {}

pin_project! {
    /// A future that digests an async source chunk by chunk.
    ///
    /// After every chunk the task wakes itself and returns `Poll::Pending`,
    /// so the executor regains control between chunks and a cancellation
    /// requested through the [`CancelToken`] is observed at the next chunk
    /// boundary. A cancelled task drops its digest state without finalizing.
    pub struct DigestTask<R, F> {
        #[pin]
        chunks: AsyncChunkReader<R>,
        set: Option<DigestSet>,
        progress: Progress,
        on_progress: F,
        token: CancelToken,
    }
}

/// Creates a task digesting `total_size` bytes of `reader`.
///
/// Uses `config.chunk_size()` for reads. Returns error if the algorithm set
/// is empty or the chunk size is zero.
///
/// # Example
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use digestrs::{digest_async, Algorithm, DigestConfig, SessionOutcome};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let size = file.metadata().await?.len();
/// let task = digest_async(file.compat(), size, Algorithm::Sha256, DigestConfig::default())?
///     .with_progress(|p| println!("{}%", p.percent()));
///
/// if let SessionOutcome::Completed(result) = task.await? {
///     println!("{result}");
/// }
/// ```
pub fn digest_async<R: AsyncRead>(
    reader: R,
    total_size: u64,
    algorithms: impl Into<AlgorithmSet>,
    config: DigestConfig,
) -> Result<DigestTask<R, fn(Progress)>, DigestError> {
    let algorithms = algorithms.into();
    let set = DigestSet::new(algorithms)?;
    let chunks = AsyncChunkReader::new(reader, total_size, config.chunk_size())?;

    tracing::debug!(
        algorithms = %algorithms,
        total_size,
        chunk_size = config.chunk_size(),
        "async digest started"
    );

    Ok(DigestTask {
        chunks,
        set: Some(set),
        progress: Progress::new(total_size),
        on_progress: ignore_progress as fn(Progress),
        token: CancelToken::new(),
    })
}

impl<R, F> DigestTask<R, F> {
    /// Sets a callback invoked with progress after every chunk.
    pub fn with_progress<G: FnMut(Progress)>(self, on_progress: G) -> DigestTask<R, G> {
        DigestTask {
            chunks: self.chunks,
            set: self.set,
            progress: self.progress,
            on_progress,
            token: self.token,
        }
    }

    /// Uses an existing cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    /// Returns a token that cancels this task.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Returns the progress so far.
    pub fn progress(&self) -> Progress {
        self.progress
    }
}

impl<R: AsyncRead, F: FnMut(Progress)> Future for DigestTask<R, F> {
    type Output = Result<SessionOutcome, DigestError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if this.token.is_cancelled() {
            if let Some(set) = this.set.take() {
                tracing::debug!(bytes = set.bytes_processed(), "async digest cancelled");
            }
            return Poll::Ready(Ok(SessionOutcome::Cancelled));
        }

        let Some(mut set) = this.set.take() else {
            panic!("DigestTask polled after completion");
        };

        match this.chunks.as_mut().poll_next(cx) {
            Poll::Pending => {
                *this.set = Some(set);
                Poll::Pending
            }
            Poll::Ready(Some(Ok(chunk))) => {
                set.update(&chunk);
                *this.set = Some(set);
                this.progress.advance(chunk.len());
                (this.on_progress)(*this.progress);

                // Yield between chunks
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Poll::Ready(Some(Err(error))) => {
                // Digest state is dropped here, unfinalized
                tracing::debug!(offset = this.chunks.offset(), %error, "async digest failed");
                Poll::Ready(Err(error))
            }
            Poll::Ready(None) => {
                if this.progress.bytes_processed == 0 {
                    (this.on_progress)(*this.progress);
                }
                let result = set.finalize();
                tracing::debug!(bytes = result.total_bytes(), "async digest completed");
                Poll::Ready(Ok(SessionOutcome::Completed(result)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;

    #[tokio::test]
    async fn test_async_digest_matches_text() {
        let data: Vec<u8> = (0..10_000).map(|i| (i * 7 % 256) as u8).collect();
        let expected = DigestSet::digest(&data, AlgorithmSet::all()).unwrap();

        let reader: &[u8] = &data;
        let config = DigestConfig::default().with_chunk_size(999);
        let outcome = digest_async(reader, data.len() as u64, AlgorithmSet::all(), config)
            .unwrap()
            .await
            .unwrap();

        assert_eq!(outcome.into_result(), Some(expected));
    }

    #[tokio::test]
    async fn test_async_progress_is_monotonic() {
        let data = vec![0x5Au8; 1000];
        let reader: &[u8] = &data;
        let mut seen = Vec::new();

        let config = DigestConfig::default().with_chunk_size(256);
        let outcome = digest_async(reader, 1000, Algorithm::Md5, config)
            .unwrap()
            .with_progress(|p| seen.push(p.bytes_processed))
            .await
            .unwrap();

        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(seen, vec![256, 512, 768, 1000]);
    }

    #[tokio::test]
    async fn test_async_cancel_before_poll() {
        let data = vec![0u8; 100];
        let reader: &[u8] = &data;
        let task = digest_async(reader, 100, Algorithm::Sha1, DigestConfig::default()).unwrap();
        task.cancel_token().cancel();

        assert_eq!(task.await.unwrap(), SessionOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_async_cancel_mid_stream() {
        let data = vec![0u8; 1000];
        let reader: &[u8] = &data;
        let token = CancelToken::new();
        let cancel = token.clone();
        let mut calls = 0;

        let config = DigestConfig::default().with_chunk_size(100);
        let outcome = digest_async(reader, 1000, Algorithm::Sha256, config)
            .unwrap()
            .with_cancel_token(token)
            .with_progress(|_| {
                calls += 1;
                if calls == 3 {
                    cancel.cancel();
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_async_truncated_source_fails() {
        let data = vec![0u8; 10];
        let reader: &[u8] = &data;
        let err = digest_async(reader, 20, Algorithm::Md5, DigestConfig::default())
            .unwrap()
            .await
            .unwrap_err();
        assert!(err.is_read_failure());
    }

    #[test]
    fn test_task_yields_between_chunks() {
        let data = vec![1u8; 300];
        let reader: &[u8] = &data;
        let config = DigestConfig::default().with_chunk_size(100);
        let mut task =
            tokio_test::task::spawn(digest_async(reader, 300, Algorithm::Md5, config).unwrap());

        for _ in 0..3 {
            tokio_test::assert_pending!(task.poll());
            assert!(task.is_woken());
        }
        let outcome = tokio_test::assert_ready!(task.poll()).unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
    }

    #[test]
    fn test_async_empty_algorithms_rejected() {
        let reader: &[u8] = &[];
        assert!(digest_async(reader, 0, AlgorithmSet::empty(), DigestConfig::default()).is_err());
    }
}
