use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, PoisonError, RwLock};

use super::{ErrorKind, WireError};

/// Receives every failure surfaced by the top-level entry points in
/// [`api`](crate::api), once, at the point the call returns.
///
/// The error is still returned to the caller afterwards; a handler only observes.
pub trait ErrorHandler: Send + Sync {
    fn report(&self, kind: ErrorKind, error: &WireError);
}

/// The default handler: forwards to [`log::error!`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn report(&self, kind: ErrorKind, error: &WireError) {
        log::error!("{kind}: {error}");
    }
}

/// Records every report as `(kind, message)`.
#[derive(Debug, Default)]
pub struct CollectingErrorHandler {
    entries: Mutex<Vec<(ErrorKind, String)>>,
}

impl CollectingErrorHandler {
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Drain the recorded reports.
    pub fn take(&self) -> Vec<(ErrorKind, String)> {
        core::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ErrorHandler for CollectingErrorHandler {
    fn report(&self, kind: ErrorKind, error: &WireError) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, error.to_string()));
    }
}

impl<H: ErrorHandler + ?Sized> ErrorHandler for Arc<H> {
    #[inline]
    fn report(&self, kind: ErrorKind, error: &WireError) {
        (**self).report(kind, error);
    }
}

static HANDLER: RwLock<Option<Arc<dyn ErrorHandler>>> = RwLock::new(None);

/// Replace the process-wide error handler.
pub fn set_error_handler<H: ErrorHandler + 'static>(handler: H) {
    *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
}

/// Restore the default [`LogErrorHandler`].
pub fn reset_error_handler() {
    *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// The current process-wide error handler.
pub fn error_handler() -> Arc<dyn ErrorHandler> {
    match &*HANDLER.read().unwrap_or_else(PoisonError::into_inner) {
        Some(handler) => Arc::clone(handler),
        None => Arc::new(LogErrorHandler),
    }
}

/// Report a failed `result` to `handler` and pass it through unchanged.
#[inline]
pub fn report_with<T>(
    handler: &dyn ErrorHandler,
    result: Result<T, WireError>,
) -> Result<T, WireError> {
    if let Err(error) = &result {
        handler.report(error.kind(), error);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_with_records_failures_once() {
        let handler = CollectingErrorHandler::new();

        let ok: Result<u8, WireError> = Ok(1);
        assert_eq!(report_with(&handler, ok).unwrap(), 1);
        assert_eq!(handler.len(), 0);

        let failed: Result<u8, WireError> = Err(WireError::unexpected_eof(2));
        assert!(report_with(&handler, failed).is_err());

        let entries = handler.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, ErrorKind::ShortRead);
        assert!(entries[0].1.contains("2 more byte"));
        assert_eq!(handler.len(), 0);
    }
}
