//! Session handles, states and cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Duration;

use crate::digest::DigestResult;
use crate::progress::Progress;

/// Lifecycle of a session: `Idle -> Running -> {Completed, Cancelled, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No session has been started.
    Idle,
    /// Chunks are being digested.
    Running,
    /// A result was delivered.
    Completed,
    /// Stopped by the caller; no result was delivered.
    Cancelled,
    /// The source failed; no result was delivered.
    Failed,
}

impl SessionState {
    /// Returns `true` for `Completed`, `Cancelled` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Cancelled | SessionState::Failed
        )
    }
}

/// How a session ended, for APIs that return rather than call back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// All chunks were digested.
    Completed(DigestResult),
    /// Cancelled at a chunk boundary.
    Cancelled,
}

impl SessionOutcome {
    /// Returns the result if the session completed.
    pub fn into_result(self) -> Option<DigestResult> {
        match self {
            SessionOutcome::Completed(result) => Some(result),
            SessionOutcome::Cancelled => None,
        }
    }
}

/// A shareable cancellation flag, checked at every chunk boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between a session's handles and its worker.
pub(crate) struct SessionShared {
    id: u64,
    pub(crate) token: CancelToken,
    state: Mutex<SessionState>,
    state_changed: Condvar,
    /// Held by the worker around each chunk step and final callback.
    gate: Mutex<()>,
    worker: OnceLock<ThreadId>,
    progress: Mutex<Progress>,
}

impl SessionShared {
    pub(crate) fn new(id: u64, state: SessionState, progress: Progress) -> Self {
        Self {
            id,
            token: CancelToken::new(),
            state: Mutex::new(state),
            state_changed: Condvar::new(),
            gate: Mutex::new(()),
            worker: OnceLock::new(),
            progress: Mutex::new(progress),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn state(&self) -> SessionState {
        *lock(&self.state)
    }

    /// Moves `Running` to `to`; any other state is left alone.
    pub(crate) fn transition(&self, to: SessionState) -> bool {
        let mut state = lock(&self.state);
        if *state != SessionState::Running {
            return false;
        }
        *state = to;
        self.state_changed.notify_all();
        true
    }

    pub(crate) fn enter_gate(&self) -> MutexGuard<'_, ()> {
        lock(&self.gate)
    }

    pub(crate) fn register_worker(&self) {
        let _ = self.worker.set(thread::current().id());
    }

    fn on_worker_thread(&self) -> bool {
        self.worker.get() == Some(&thread::current().id())
    }

    pub(crate) fn set_progress(&self, progress: Progress) {
        *lock(&self.progress) = progress;
    }

    fn cancel(&self) -> bool {
        if self.state() != SessionState::Running {
            return false;
        }
        self.token.cancel();

        if self.on_worker_thread() {
            // Called from inside a callback: the worker observes the flag
            // as soon as the callback returns.
            return true;
        }

        // Wait out any chunk step already past its cancellation check
        let _gate = self.enter_gate();
        self.transition(SessionState::Cancelled)
    }
}

/// Handle to a running or finished session.
///
/// Cloning is cheap; all clones refer to the same session.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<SessionShared>,
}

impl SessionHandle {
    pub(crate) fn new(shared: Arc<SessionShared>) -> Self {
        Self { shared }
    }

    /// Returns the session id, unique within its engine.
    pub fn id(&self) -> u64 {
        self.shared.id()
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Returns the last reported progress.
    pub fn progress(&self) -> Progress {
        *lock(&self.shared.progress)
    }

    /// Returns `true` while the session is running.
    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    /// Stops the session at the next chunk boundary.
    ///
    /// Only a running session can be cancelled. When called from any thread
    /// other than the session's own worker, this waits for an in-flight
    /// chunk update and its progress callback to finish, so that on return
    /// no further callback will fire and the digest state has been abandoned
    /// without finalizing.
    ///
    /// Returns `true` if the session was running and is now cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.cancel();
        if cancelled {
            tracing::debug!(session = self.id(), "session cancelled");
        }
        cancelled
    }

    /// Blocks until the session reaches a terminal state.
    pub fn wait(&self) -> SessionState {
        let mut state = lock(&self.shared.state);
        while !state.is_terminal() {
            state = self
                .shared
                .state_changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *state
    }

    /// Like [`wait`](SessionHandle::wait), but gives up after `timeout`.
    ///
    /// Returns `None` if the session is still running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<SessionState> {
        let state = lock(&self.shared.state);
        let (state, _) = self
            .shared
            .state_changed
            .wait_timeout_while(state, timeout, |s| !s.is_terminal())
            .unwrap_or_else(PoisonError::into_inner);
        state.is_terminal().then_some(*state)
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}

/// Marks the session failed if the worker unwinds before finishing.
pub(crate) struct FailOnUnwind<'a>(pub(crate) &'a SessionShared);

impl Drop for FailOnUnwind<'_> {
    fn drop(&mut self) {
        if self.0.transition(SessionState::Failed) {
            tracing::warn!(session = self.0.id(), "session worker exited unexpectedly");
        }
    }
}
