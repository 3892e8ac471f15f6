//! File-mode session loop.

use std::io::Read;
use std::sync::Arc;
use std::thread;

use crate::digest::DigestSet;
use crate::progress::Progress;
use crate::reader::ChunkReader;

use super::Observer;
use super::session::{FailOnUnwind, SessionShared, SessionState};

/// Drives `reader` into `set` until exhaustion, failure or cancellation.
///
/// Each chunk step runs under the session gate, after re-checking the
/// cancellation flag, so a caller that cancels and then acquires the gate
/// knows no further update or callback will happen.
pub(crate) fn run<R: Read, O: Observer>(
    shared: Arc<SessionShared>,
    mut reader: ChunkReader<R>,
    mut set: DigestSet,
    mut observer: O,
) {
    shared.register_worker();
    let _guard = FailOnUnwind(&shared);
    let id = shared.id();
    let mut progress = Progress::new(reader.total_size());

    loop {
        // Cooperative suspension point between chunks
        thread::yield_now();
        if shared.token.is_cancelled() {
            break;
        }

        let chunk = reader.next_chunk();

        let _gate = shared.enter_gate();
        if shared.token.is_cancelled() {
            break;
        }

        match chunk {
            Ok(Some(bytes)) => {
                set.update(bytes);
                progress.advance(bytes.len());
                shared.set_progress(progress);
                tracing::trace!(
                    session = id,
                    bytes = progress.bytes_processed,
                    percent = progress.percent(),
                    "chunk digested"
                );
                observer.on_progress(progress);
            }
            Ok(None) => {
                if progress.bytes_processed == 0 {
                    // Empty source: report completion progress once
                    observer.on_progress(progress);
                }
                let result = set.finalize();
                tracing::debug!(session = id, bytes = result.total_bytes(), "session completed");
                observer.on_complete(result);
                shared.transition(SessionState::Completed);
                return;
            }
            Err(error) => {
                tracing::debug!(
                    session = id,
                    bytes = progress.bytes_processed,
                    %error,
                    "session failed"
                );
                drop(set);
                observer.on_error(error);
                shared.transition(SessionState::Failed);
                return;
            }
        }
    }

    // Cancelled: the digest state is dropped without finalizing
    tracing::debug!(
        session = id,
        bytes = set.bytes_processed(),
        "session stopped after cancellation"
    );
    shared.transition(SessionState::Cancelled);
}
