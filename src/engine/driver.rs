//! DigestEngine - one session at a time, newest input wins.

use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::algorithm::AlgorithmSet;
use crate::config::{DigestConfig, validate_algorithms, validate_chunk_size};
use crate::digest::{DigestResult, DigestSet};
use crate::error::DigestError;
use crate::progress::Progress;
use crate::reader::{ChunkReader, FileSource, InputSource};

use super::Observer;
use super::session::{SessionHandle, SessionShared, SessionState, lock};
use super::worker;

/// Runs digest sessions for one caller.
///
/// At most one session is active per engine. Supplying new input cancels the
/// session in flight before the new session's digest state is created, so two
/// sessions never interleave and the abandoned one never completes.
///
/// Text input is digested synchronously. File input is digested on a
/// dedicated worker thread, one chunk at a time, yielding between chunks.
/// Dropping the engine does not cancel a running session; use
/// [`cancel`](DigestEngine::cancel) or the returned [`SessionHandle`].
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use std::sync::mpsc;
/// use digestrs::{Algorithm, DigestEngine, FileSource, SessionEvent};
///
/// let engine = DigestEngine::default();
/// let data = vec![0u8; 10_000];
/// let (tx, rx) = mpsc::channel();
///
/// let handle = engine.compute_for_file(
///     FileSource::new(Cursor::new(data), 10_000),
///     Algorithm::Sha256,
///     tx,
///     Some(4096),
/// )?;
///
/// for event in rx {
///     if let SessionEvent::Complete(result) = event {
///         assert_eq!(result.total_bytes(), 10_000);
///         break;
///     }
/// }
/// # handle.wait();
/// # Ok::<(), digestrs::DigestError>(())
/// ```
#[derive(Debug)]
pub struct DigestEngine {
    config: DigestConfig,
    current: Mutex<Option<SessionHandle>>,
    next_id: AtomicU64,
}

impl DigestEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: DigestConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Digests in-memory content synchronously.
    ///
    /// Cancels any file session in flight.
    pub fn compute_for_text(
        &self,
        content: impl AsRef<[u8]>,
        algorithms: impl Into<AlgorithmSet>,
    ) -> Result<DigestResult, DigestError> {
        let algorithms = algorithms.into();
        validate_algorithms(algorithms)?;

        self.install(None);
        let content = content.as_ref();
        tracing::debug!(
            algorithms = %algorithms,
            bytes = content.len(),
            "digesting text"
        );
        DigestSet::digest(content, algorithms)
    }

    /// Starts digesting `source` on a worker thread.
    ///
    /// `chunk_size` overrides the configured chunk size for this session.
    /// Configuration errors are returned before the current session is
    /// touched. Progress, the result or a read failure are reported to
    /// `observer`.
    pub fn compute_for_file<R, O>(
        &self,
        source: FileSource<R>,
        algorithms: impl Into<AlgorithmSet>,
        observer: O,
        chunk_size: Option<usize>,
    ) -> Result<SessionHandle, DigestError>
    where
        R: Read + Send + 'static,
        O: Observer,
    {
        let algorithms = algorithms.into();
        let chunk_size = chunk_size.unwrap_or(self.config.chunk_size());
        validate_algorithms(algorithms)?;
        validate_chunk_size(chunk_size)?;

        // The previous session must be stopped before new state exists
        self.cancel();

        let (reader, total_size) = source.into_parts();
        let reader = ChunkReader::new(reader, total_size, chunk_size)?;
        let set = DigestSet::new(algorithms)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let shared = Arc::new(SessionShared::new(
            id,
            SessionState::Running,
            Progress::new(total_size),
        ));
        let handle = SessionHandle::new(shared.clone());

        tracing::debug!(
            session = id,
            algorithms = %algorithms,
            total_size,
            chunk_size,
            "file session started"
        );

        thread::Builder::new()
            .name(format!("digest-session-{id}"))
            .spawn(move || worker::run(shared, reader, set, observer))
            .map_err(DigestError::Worker)?;

        self.install(Some(handle.clone()));
        Ok(handle)
    }

    /// Starts a session for any input.
    ///
    /// Text input completes before this returns: `observer` receives a 100%
    /// progress report and the result, and the handle is already
    /// [`Completed`](SessionState::Completed).
    pub fn start<O: Observer>(
        &self,
        input: InputSource,
        algorithms: impl Into<AlgorithmSet>,
        mut observer: O,
    ) -> Result<SessionHandle, DigestError> {
        match input {
            InputSource::File(source) => self.compute_for_file(source, algorithms, observer, None),
            InputSource::Text(content) => {
                let result = self.compute_for_text(&content, algorithms)?;
                let progress = Progress::instant(content.len() as u64);

                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let handle = SessionHandle::new(Arc::new(SessionShared::new(
                    id,
                    SessionState::Completed,
                    progress,
                )));

                observer.on_progress(progress);
                observer.on_complete(result);
                self.install(Some(handle.clone()));
                Ok(handle)
            }
        }
    }

    /// Digests with the configured default algorithms.
    pub fn start_default<O: Observer>(
        &self,
        input: InputSource,
        observer: O,
    ) -> Result<SessionHandle, DigestError> {
        self.start(input, self.config.algorithms(), observer)
    }

    /// Cancels the current session, if one is running.
    ///
    /// Returns `true` if a running session was cancelled.
    pub fn cancel(&self) -> bool {
        match self.current() {
            Some(handle) => handle.cancel(),
            None => false,
        }
    }

    /// Returns the most recent session, if any.
    pub fn current(&self) -> Option<SessionHandle> {
        lock(&self.current).clone()
    }

    /// Returns the state of the most recent session, or `Idle`.
    pub fn state(&self) -> SessionState {
        self.current()
            .map(|h| h.state())
            .unwrap_or(SessionState::Idle)
    }

    fn install(&self, next: Option<SessionHandle>) {
        let displaced = std::mem::replace(&mut *lock(&self.current), next);
        if let Some(handle) = displaced {
            if handle.cancel() {
                tracing::debug!(session = handle.id(), "previous session replaced");
            }
        }
    }
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new(DigestConfig::default())
    }
}
