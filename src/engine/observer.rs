//! Session callbacks.

use std::fmt;
use std::sync::mpsc::Sender;

use crate::digest::DigestResult;
use crate::error::DigestError;
use crate::progress::Progress;

/// Receives progress and the final outcome of a session.
///
/// Callbacks for a file session run on the session's worker thread, one
/// at a time and in order. Once [`SessionHandle::cancel`](crate::SessionHandle::cancel)
/// returns, no further callback fires for that session.
///
/// At most one of `on_complete` and `on_error` is called, and neither is
/// called for a cancelled session.
pub trait Observer: Send + 'static {
    /// Called after every chunk, and once for an empty source.
    fn on_progress(&mut self, progress: Progress) {
        let _ = progress;
    }

    /// Called once with the final digests.
    fn on_complete(&mut self, result: DigestResult);

    /// Called once if the source could not be read.
    fn on_error(&mut self, error: DigestError) {
        let _ = error;
    }
}

/// A session notification, as delivered through a channel.
#[derive(Debug)]
pub enum SessionEvent {
    /// Progress after a chunk.
    Progress(Progress),
    /// The session completed.
    Complete(DigestResult),
    /// The session failed.
    Error(DigestError),
}

/// Forwards every callback as a [`SessionEvent`].
///
/// Events are dropped silently once the receiver is gone.
impl Observer for Sender<SessionEvent> {
    fn on_progress(&mut self, progress: Progress) {
        let _ = self.send(SessionEvent::Progress(progress));
    }

    fn on_complete(&mut self, result: DigestResult) {
        let _ = self.send(SessionEvent::Complete(result));
    }

    fn on_error(&mut self, error: DigestError) {
        let _ = self.send(SessionEvent::Error(error));
    }
}

type ProgressFn = Box<dyn FnMut(Progress) + Send>;
type CompleteFn = Box<dyn FnMut(DigestResult) + Send>;
type ErrorFn = Box<dyn FnMut(DigestError) + Send>;

/// Closure-based [`Observer`].
///
/// # Example
///
/// ```
/// use digestrs::Callbacks;
///
/// let callbacks = Callbacks::new(|result| println!("{result}"))
///     .with_progress(|p| println!("{}%", p.percent()))
///     .with_error(|e| eprintln!("{e}"));
/// ```
pub struct Callbacks {
    progress: Option<ProgressFn>,
    complete: CompleteFn,
    error: Option<ErrorFn>,
}

impl Callbacks {
    /// Creates callbacks with a completion handler.
    pub fn new(on_complete: impl FnMut(DigestResult) + Send + 'static) -> Self {
        Self {
            progress: None,
            complete: Box::new(on_complete),
            error: None,
        }
    }

    /// Sets the progress handler.
    pub fn with_progress(mut self, on_progress: impl FnMut(Progress) + Send + 'static) -> Self {
        self.progress = Some(Box::new(on_progress));
        self
    }

    /// Sets the error handler.
    pub fn with_error(mut self, on_error: impl FnMut(DigestError) + Send + 'static) -> Self {
        self.error = Some(Box::new(on_error));
        self
    }
}

impl Observer for Callbacks {
    fn on_progress(&mut self, progress: Progress) {
        if let Some(f) = self.progress.as_mut() {
            f(progress);
        }
    }

    fn on_complete(&mut self, result: DigestResult) {
        (self.complete)(result);
    }

    fn on_error(&mut self, error: DigestError) {
        if let Some(f) = self.error.as_mut() {
            f(error);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("progress", &self.progress.is_some())
            .field("error", &self.error.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sender_forwards_events() {
        let (tx, rx) = mpsc::channel();
        let mut observer = tx;
        observer.on_progress(Progress::new(10));
        observer.on_complete(DigestResult::pending(Algorithm::Md5));

        assert!(matches!(rx.recv().unwrap(), SessionEvent::Progress(_)));
        assert!(matches!(rx.recv().unwrap(), SessionEvent::Complete(_)));
    }

    #[test]
    fn test_sender_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut observer = tx;
        observer.on_complete(DigestResult::pending(Algorithm::Md5));
    }

    #[test]
    fn test_callbacks_dispatch() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (p, c, e) = (seen.clone(), seen.clone(), seen.clone());
        let mut callbacks = Callbacks::new(move |_| c.lock().unwrap().push("complete"))
            .with_progress(move |_| p.lock().unwrap().push("progress"))
            .with_error(move |_| e.lock().unwrap().push("error"));

        callbacks.on_progress(Progress::new(1));
        callbacks.on_error(DigestError::InvalidConfig { message: "x" });
        callbacks.on_complete(DigestResult::pending(Algorithm::Md5));

        assert_eq!(*seen.lock().unwrap(), vec!["progress", "error", "complete"]);
    }
}
